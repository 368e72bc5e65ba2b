//! Data-driven game balance
//!
//! Every gameplay number that a designer might want to tweak lives here.
//! Geometry (screen, lanes, footprints) stays in `consts`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    // === Progression ===
    /// Scroll speed at level 1 (px/s)
    pub base_speed: f32,
    /// Scroll speed added per level (px/s)
    pub speed_per_level: f32,
    /// Distance covered per level (px)
    pub goal_distance: f32,
    /// Score bonus on level-up
    pub level_bonus: f32,

    // === Energy ===
    pub initial_energy: f32,
    pub energy_cap: f32,
    /// Passive drain (energy/s)
    pub energy_drain: f32,
    /// Energy lost per obstacle hit
    pub damage: f32,
    /// Energy gained per food
    pub food_energy: f32,

    // === Score ===
    /// Passive score gain (points/s)
    pub score_rate: f32,
    /// Score for digging through a gold rock
    pub gold_bonus: f32,

    // === Timers ===
    /// Player hurt feedback window (s)
    pub hurt_duration: f32,
    /// Delay after game over before input returns to title (s)
    pub return_delay: f32,

    // === Camera / world ===
    /// Camera center sits this far ahead of the front-most player
    pub camera_lead: f32,
    /// Camera X beyond which all world coordinates are shifted back
    pub reset_threshold: f32,
    /// Camera X after a coordinate reset
    pub reset_target: f32,
    /// Items further than this behind the camera center expire
    pub expiry_margin: f32,
    /// Player world X at run start
    pub player_start_x: f32,
    /// Vertical lane-change step (px per frame)
    pub lane_step: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: 64.0,
            speed_per_level: 8.0,
            goal_distance: 3000.0,
            level_bonus: 1000.0,

            initial_energy: 100.0,
            energy_cap: 300.0,
            energy_drain: 5.0,
            damage: 30.0,
            food_energy: 20.0,

            score_rate: 10.0,
            gold_bonus: 500.0,

            hurt_duration: 0.5,
            return_delay: 1.5,

            camera_lead: 60.0,
            reset_threshold: 1000.0,
            reset_target: 100.0,
            expiry_margin: 140.0,
            player_start_x: 120.0,
            lane_step: 4.0,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Scroll speed for a given level
    pub fn speed_for_level(&self, level: u32) -> f32 {
        self.base_speed + level.saturating_sub(1) as f32 * self.speed_per_level
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field, reason| Err(TuningError::Invalid { field, reason });

        if self.goal_distance <= 0.0 {
            return invalid("goal_distance", "must be positive");
        }
        if self.energy_cap <= 0.0 {
            return invalid("energy_cap", "must be positive");
        }
        if self.initial_energy <= 0.0 || self.initial_energy > self.energy_cap {
            return invalid("initial_energy", "must be in (0, energy_cap]");
        }
        if self.base_speed < 0.0 || self.speed_per_level < 0.0 {
            return invalid("base_speed", "speeds must not be negative");
        }
        if self.energy_drain < 0.0 || self.score_rate < 0.0 {
            return invalid("energy_drain", "rates must not be negative");
        }
        if self.reset_target >= self.reset_threshold {
            return invalid("reset_target", "must be below reset_threshold");
        }
        if self.lane_step <= 0.0 {
            return invalid("lane_step", "must be positive");
        }
        Ok(())
    }
}
