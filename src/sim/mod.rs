//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic for a
//! given seed and input sequence:
//! - Seeded RNG only
//! - Stable iteration order (slot index, spawn order)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod input;
pub mod pool;
pub mod state;
pub mod thrusters;
pub mod tick;

pub use camera::Camera;
pub use collision::{Circle, Edge, Rect, circles_collide, rotated_rect_circle_collision, separation_offset};
pub use input::{Cursor, Intent, KeyCode, RawInput};
pub use pool::{Slot, SlotHandle, SlotPool};
pub use state::{
    Asteroid, BackgroundAsteroid, Boss, Direction, GameEvent, GameState, Player, Projectile,
    ProjectileShape, ThrusterTrail,
};
pub use thrusters::{Facing, Thrusters, thrusters_for};
pub use tick::{FrameReport, capture_thruster_trail, tick};
