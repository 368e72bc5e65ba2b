//! World-to-screen projection
//!
//! The camera is centered horizontally: a world point at the camera's X lands
//! in the middle of the screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec2,
    /// Zoom (1.0 = native)
    pub scale: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Camera {
    /// Project a world point. The vertical origin is the top of the screen.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let center = Vec2::new(SCREEN_WIDTH / 2.0, 0.0);
        (world - self.position) * self.scale + center
    }

    pub fn world_to_screen_x(&self, world_x: f32) -> f32 {
        (world_x - self.position.x) * self.scale + SCREEN_WIDTH / 2.0
    }

    /// Y relative to the screen's vertical center
    pub fn world_to_screen_y(&self, world_y: f32) -> f32 {
        (world_y - self.position.y) * self.scale + SCREEN_HEIGHT / 2.0
    }

    /// World X of the screen's left edge
    pub fn left_edge(&self) -> f32 {
        self.position.x - SCREEN_WIDTH / 2.0 / self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_center_maps_to_screen_center() {
        let camera = Camera {
            position: Vec2::new(500.0, 0.0),
            scale: 1.0,
        };
        let screen = camera.world_to_screen(Vec2::new(500.0, 24.0));
        assert_eq!(screen, Vec2::new(120.0, 24.0));
    }

    #[test]
    fn test_scale_applies_around_camera() {
        let camera = Camera {
            position: Vec2::new(100.0, 0.0),
            scale: 2.0,
        };
        assert_eq!(camera.world_to_screen_x(110.0), 140.0);
        assert_eq!(camera.world_to_screen_y(0.0), 68.0);
        assert_eq!(camera.left_edge(), 40.0);
    }
}
