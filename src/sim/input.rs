//! Raw input and its mapping to per-frame intent
//!
//! The platform layer fills a [`RawInput`] every frame. The simulation only
//! ever sees the [`Intent`] derived from it plus the world-space cursor.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::state::Direction;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::settings::KeyBindings;

/// Keyboard keys the game can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KeyCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
}

/// Device state for one frame, as polled by the platform
#[derive(Debug, Clone)]
pub struct RawInput {
    /// Keys currently held
    pub keys_down: BTreeSet<KeyCode>,
    /// Keys that went down since the previous frame
    pub keys_pressed: BTreeSet<KeyCode>,
    /// Mouse motion since the previous frame, window pixels
    pub mouse_delta: Vec2,
    /// Absolute mouse position, window pixels
    pub mouse_position: Vec2,
    /// Primary button held (fire)
    pub fire_down: bool,
    /// Secondary button went down this frame (dash)
    pub dash_pressed: bool,
    /// Pointer is locked to the window and reports relative motion
    pub cursor_captured: bool,
    pub window_size: Vec2,
}

impl Default for RawInput {
    fn default() -> Self {
        Self {
            keys_down: BTreeSet::new(),
            keys_pressed: BTreeSet::new(),
            mouse_delta: Vec2::ZERO,
            mouse_position: Vec2::ZERO,
            fire_down: false,
            dash_pressed: false,
            cursor_captured: true,
            window_size: Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }
}

impl RawInput {
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }
}

/// What the player asked for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    /// Held movement directions
    pub movement: Direction,
    /// Dash button edge
    pub dash: bool,
    /// Fire button held
    pub fire: bool,
    /// Shader reload key edge
    pub reload_shaders: bool,
}

impl Intent {
    pub fn from_input(input: &RawInput, bindings: &KeyBindings) -> Self {
        let mut movement = Direction::NONE;
        for (key, direction) in [
            (bindings.up, Direction::UP),
            (bindings.left, Direction::LEFT),
            (bindings.down, Direction::DOWN),
            (bindings.right, Direction::RIGHT),
        ] {
            if input.is_down(key) {
                movement.insert(direction);
            }
        }

        Self {
            movement,
            dash: input.dash_pressed,
            fire: input.fire_down,
            reload_shaders: input.is_pressed(bindings.reload_shaders),
        }
    }
}

/// Software cursor: tracked in window space, projected into the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub screen: Vec2,
    pub world: Vec2,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            screen: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 6.0),
            world: Vec2::ZERO,
        }
    }
}

impl Cursor {
    /// Move the cursor for this frame and project it through `camera`
    pub fn update(&mut self, input: &RawInput, sensitivity: f32, camera: &Camera) {
        if input.cursor_captured {
            self.screen += input.mouse_delta * sensitivity;
            self.screen = self.screen.clamp(Vec2::ZERO, input.window_size.max(Vec2::ZERO));
        } else {
            self.screen = input.mouse_position;
        }

        self.world = camera.screen_to_world(self.screen);
    }
}
