//! Camera follow policy
//!
//! The view zooms to fit the reference screen size into the window and eases
//! toward the player, clamped so it never shows past the arena edges.

use glam::Vec2;

use crate::consts::*;
use crate::{clamp_loose, lerp};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World point shown at the window center
    pub target: Vec2,
    /// Window point the target maps to (window center)
    pub offset: Vec2,
    pub zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Vec2::ZERO,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Refit the zoom to the window and ease toward `focus`.
    ///
    /// A window with no area (minimized) leaves the camera as it was.
    pub fn update(&mut self, focus: Vec2, window_size: Vec2) {
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            return;
        }

        self.zoom = (window_size.x / SCREEN_WIDTH).min(window_size.y / SCREEN_HEIGHT);

        let half_view = window_size / (2.0 * self.zoom);

        let target_x = clamp_loose(focus.x, half_view.x, LEVEL_WIDTH - half_view.x);
        let target_y = clamp_loose(focus.y, half_view.y, LEVEL_HEIGHT - half_view.y);

        self.target.x = lerp(self.target.x, target_x, CAMERA_LERP_RATE);
        self.target.y = lerp(self.target.y, target_y, CAMERA_LERP_RATE);

        self.offset = window_size / 2.0;
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.offset) / self.zoom + self.target
    }

    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.target) * self.zoom + self.offset
    }
}
