//! The digging player on each line

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_SIZE;

/// Animation loop length (s)
pub const ANIM_PERIOD: f32 = 0.2;
/// Squared distance the player travels between dig holes (8 px)
const HOLE_SPACING_SQ: f32 = 64.0;
/// Hole sits at the center of the player sprite
const HOLE_OFFSET: Vec2 = Vec2::new(8.0, 8.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Remaining hurt feedback time (s)
    pub hurt_timer: f32,
    /// Animation clock, wraps at `ANIM_PERIOD`
    pub anim_time: f32,
    /// Position where the last hole was dug
    pub last_hole_pos: Vec2,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            hurt_timer: 0.0,
            anim_time: 0.0,
            last_hole_pos: pos,
        }
    }

    /// Scroll right at `speed`, ease toward `target_y` by `lane_step` px.
    ///
    /// Returns where a new dig hole should appear, if the player has moved far
    /// enough since the last one.
    pub fn update(&mut self, dt: f32, speed: f32, target_y: f32, lane_step: f32) -> Option<Vec2> {
        self.pos.x += speed * dt;

        if self.pos.y < target_y {
            self.pos.y = (self.pos.y + lane_step).min(target_y);
        } else if self.pos.y > target_y {
            self.pos.y = (self.pos.y - lane_step).max(target_y);
        }

        let hole = if (self.pos - self.last_hole_pos).length_squared() > HOLE_SPACING_SQ {
            self.last_hole_pos = self.pos;
            Some(self.pos + HOLE_OFFSET)
        } else {
            None
        };

        self.anim_time += dt;
        if self.anim_time >= ANIM_PERIOD {
            self.anim_time -= ANIM_PERIOD;
        }

        if self.hurt_timer > 0.0 {
            self.hurt_timer -= dt;
        }

        hole
    }

    pub fn hurt(&mut self, duration: f32) {
        self.hurt_timer = duration;
    }

    pub fn is_hurt(&self) -> bool {
        self.hurt_timer > 0.0
    }

    /// Collision box (top-left, size)
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.pos, Vec2::splat(PLAYER_SIZE))
    }

    /// Walk-cycle frame: 0 or 1
    pub fn anim_frame(&self) -> usize {
        if self.anim_time < ANIM_PERIOD / 2.0 { 0 } else { 1 }
    }

    pub fn on_coordinate_reset(&mut self, offset: f32) {
        self.pos.x -= offset;
        self.last_hole_pos.x -= offset;
    }
}
