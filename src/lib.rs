//! Stribun - a top-down arena shooter core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, cooldowns, input mapping)
//! - `renderer`: Layered render composition against an abstract draw sink
//! - `audio`: Fire-and-forget sound cues with volume mixing
//! - `settings`: Player preferences and key bindings
//! - `sprites`: Atlas layout and hitbox templates

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod sprites;

pub use settings::{KeyBindings, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (world space)
    pub const LEVEL_WIDTH: f32 = 1536.0;
    pub const LEVEL_HEIGHT: f32 = 1536.0;

    /// Reference window size the camera zoom is computed against
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// All sprites are drawn (and their hitboxes scaled) by this factor
    pub const SPRITES_SCALE: f32 = 3.5;

    /// Extra margin of the background layer on every side, for parallax
    pub const BACKGROUND_PARALLAX_OFFSET: f32 = 16.0;

    /// Player
    pub const MAX_PLAYER_HEALTH: i32 = 10;
    pub const PLAYER_HITBOX_RADIUS: f32 = 16.0;
    /// Pixels per frame, per held direction key
    pub const PLAYER_MOVEMENT_SPEED: f32 = 6.0;
    pub const PLAYER_DASH_DISTANCE: f32 = 128.0;
    pub const PLAYER_DASH_COOLDOWN: f32 = 0.5;
    /// Fraction of the dash displacement removed every frame
    pub const DASH_DELTA_LERP_RATE: f32 = 0.5;
    /// Glow level set the frame the dash becomes available again
    pub const DASH_READY_FLASH: f32 = 0.5;
    /// Upper bound of every player cooldown
    pub const COOLDOWN_MAX: f32 = 10.0;
    pub const PLAYER_BULLET_SPREAD: i32 = 1;

    /// Player weapon
    pub const PLAYER_FIRE_COOLDOWN: f32 = 0.15;
    pub const PLAYER_PROJECTILE_RADIUS: f32 = 9.0;
    /// Pixels per frame
    pub const PLAYER_PROJECTILE_SPEED: f32 = 30.0;
    /// Distance in front of the ship where shots spawn
    pub const PLAYER_MUZZLE_OFFSET: f32 = 35.0;

    /// Projectiles
    pub const PROJECTILES_MAX: usize = 1024;
    /// Linger time of a shot that left the arena
    pub const PROJECTILE_BORDER_HIT_TIMER: f32 = 0.05;
    pub const PROJECTILE_TIMER_MAX: f32 = 1.0;

    /// Thruster trails
    pub const THRUSTER_TRAILS_MAX: usize = 10;
    /// Alpha removed from every trail per frame
    pub const THRUSTER_TRAIL_FADE: f32 = 0.2;

    /// Asteroid batch size is drawn from [MIN_ASTEROIDS, MAX_ASTEROIDS)
    pub const MIN_ASTEROIDS: usize = 4;
    pub const MAX_ASTEROIDS: usize = 10;
    pub const MAX_BOUNDING_CIRCLES: usize = 10;

    /// Decorative background asteroid
    pub const BACKGROUND_ASTEROID_SCALE: f32 = 15.0;

    /// Boss
    pub const BOSS_MARINE_MAX_HEALTH: i32 = 512;
    pub const BOSS_MARINE_BOUNDING_CIRCLES: usize = 12;
    /// Exponential approach rate of the weapon toward its ideal angle
    pub const BOSS_WEAPON_LERP_RATE: f32 = 0.1;

    /// Camera follow rate per frame
    pub const CAMERA_LERP_RATE: f32 = 0.1;

    pub const MOUSE_CURSOR_SCALE: f32 = 2.0;
}

/// Wrap `v` into `[0, max)`.
///
/// Negative values wrap from the top: `max - (|v| mod max)`. Angles fed
/// through this stay continuous when they cross zero.
#[inline]
pub fn wrap_to_range(v: f32, max: f32) -> f32 {
    if v >= max {
        return v % max;
    }

    if v < 0.0 {
        let rem = (-v) % max;
        let wrapped = max - rem;
        // rem == 0 or a rem too small to survive the subtraction lands on max itself
        return if wrapped >= max { 0.0 } else { wrapped };
    }

    v
}

/// Signed angle in degrees of the direction from `p1` to `p2`.
///
/// Screen convention: straight up (negative y) is 0°, angles grow clockwise
/// and the result lies in `[0, 360)`. Coincident points yield 0°.
pub fn angle_between(p1: Vec2, p2: Vec2) -> f32 {
    let d = p1 - p2;
    let dist = d.length();
    if dist == 0.0 {
        return 0.0;
    }

    let mut alpha = (d.x / dist).clamp(-1.0, 1.0).asin().to_degrees();

    if d.y > 0.0 {
        alpha = (180.0 - alpha.abs()).copysign(alpha);
    }

    alpha += 180.0;

    if alpha >= 360.0 { alpha - 360.0 } else { alpha }
}

/// Signed angle in degrees from screen-up to `direction` (clockwise positive, (-180, 180])
#[inline]
pub fn angle_from_up(direction: Vec2) -> f32 {
    let up = Vec2::NEG_Y;
    up.perp_dot(direction).atan2(up.dot(direction)).to_degrees()
}

/// Rotate `v` clockwise (screen space) by `degrees`
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Reflect `v` about a unit `normal`: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: Vec2, normal: Vec2) -> Vec2 {
    v - 2.0 * v.dot(normal) * normal
}

/// Linear interpolation from `start` toward `end` by `amount`
#[inline]
pub fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    start + amount * (end - start)
}

/// Clamp that tolerates `min > max` (min wins, then max), like a two-step clamp.
#[inline]
pub fn clamp_loose(value: f32, min: f32, max: f32) -> f32 {
    let v = if value < min { min } else { value };
    if v > max { max } else { v }
}
