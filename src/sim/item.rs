//! Obstacles and pickups placed on a line

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Item types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Plain obstacle, dug through with the pickaxe
    Rock,
    /// Obstacle worth a score bonus when dug through
    GoldRock,
    /// Obstacle that cannot be dug through
    HardRock,
    /// Restores energy
    Food,
}

impl ItemKind {
    pub fn is_obstacle(self) -> bool {
        !matches!(self, ItemKind::Food)
    }

    /// Whether the pickaxe can break this obstacle
    pub fn is_destructible(self) -> bool {
        !matches!(self, ItemKind::HardRock)
    }
}

/// World Y of a lane on a line
#[inline]
pub fn lane_y(line: usize, lane: usize) -> f32 {
    LINE_BASE_Y + line as f32 * LINE_SPACING + lane as f32 * LANE_SPACING
}

/// An item entity. Items never move; the camera scrolls past them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    /// Index of the line holding this item
    pub line: usize,
    pub lane: usize,
    pub pos: Vec2,
    /// Player was overlapping this item last frame.
    ///
    /// Damaging obstacles are not removed on a hit, so without this latch
    /// every overlapping frame would cost energy again. Damage applies on the
    /// frame a contact begins; a new contact after separating hits again.
    #[serde(default)]
    pub in_contact: bool,
}

impl Item {
    pub fn new(kind: ItemKind, line: usize, x: f32, lane: usize) -> Self {
        Self {
            kind,
            line,
            lane,
            pos: Vec2::new(x, lane_y(line, lane)),
            in_contact: false,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::splat(ITEM_SIZE)
    }

    /// Per-frame update. Items are static.
    pub fn update(&mut self, _dt: f32) {}

    /// AABB overlap against a box at `pos` with the given size
    pub fn collides_with(&self, pos: Vec2, size: Vec2) -> bool {
        self.pos.x < pos.x + size.x
            && self.pos.x + ITEM_SIZE > pos.x
            && self.pos.y < pos.y + size.y
            && self.pos.y + ITEM_SIZE > pos.y
    }

    /// Fallen far enough behind the camera to drop
    pub fn is_expired(&self, camera_x: f32, margin: f32) -> bool {
        self.pos.x < camera_x - margin
    }
}
