//! Channel Miner - A two-line digging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, collisions, game state)
//! - `renderer`: Draw-command contract for the presentation layer
//! - `audio`: Sound cue table for simulation events
//! - `scene`: Title/game scene switching
//! - `tuning`: Data-driven game balance
//! - `logging`: Logger setup for the headless runner

pub mod audio;
pub mod logging;
pub mod renderer;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: f32 = 240.0;
    pub const SCREEN_HEIGHT: f32 = 136.0;

    /// Track layout
    pub const LINE_COUNT: usize = 2;
    pub const LANE_COUNT: usize = 2;
    pub const LINE_BASE_Y: f32 = 24.0;
    pub const LINE_SPACING: f32 = 56.0;
    pub const LANE_SPACING: f32 = 16.0;

    /// Entity footprints (pixels, square)
    pub const ITEM_SIZE: f32 = 16.0;
    pub const PLAYER_SIZE: f32 = 16.0;

    /// Path generator grid step
    pub const GRID_SIZE: f32 = 24.0;

    /// Background map, wrapped for infinite scroll
    pub const TILE_SIZE: i32 = 8;
    pub const MAP_WIDTH_TILES: i32 = 240;
    pub const MAP_HEIGHT_TILES: i32 = 18;
}

/// Round to nearest integer, halves away from zero
#[inline]
pub fn round(x: f32) -> i32 {
    if x < 0.0 {
        (x - 0.5) as i32
    } else {
        (x + 0.5) as i32
    }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-in-out over t in [0, 1]
#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Piecewise-linear ease that reaches `mid` at t = 0.5
#[inline]
pub fn ease_half_linear(t: f32, mid: f32) -> f32 {
    if t < 0.5 {
        t * 2.0 * mid
    } else {
        mid + (t - 0.5) * 2.0 * (1.0 - mid)
    }
}
