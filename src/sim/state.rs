//! Game state and entity records
//!
//! Everything the frame loop reads or writes is owned by [`GameState`].
//! Entities are plain data; behaviour lives in `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::camera::Camera;
use super::collision::Circle;
use super::input::Cursor;
use super::pool::{Slot, SlotPool};
use super::thrusters::Thrusters;
use crate::consts::*;
use crate::sprites::{self, AsteroidSprite, ASTEROID_SPRITES};
use crate::{angle_from_up, rotate_deg};

/// Notable things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The player started a dash
    Dashed,
    /// The player fired a shot
    ShotFired,
    /// The dash cooldown ran out this frame
    DashReady,
}

/// Set of cardinal directions, one bit each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Direction(pub u8);

impl Direction {
    pub const NONE: Self = Self(0);
    pub const UP: Self = Self(0b0001);
    pub const DOWN: Self = Self(0b0010);
    pub const LEFT: Self = Self(0b0100);
    pub const RIGHT: Self = Self(0b1000);

    /// Directions in the order held keys are applied, with their unit step
    pub const STEPS: [(Direction, Vec2); 4] = [
        (Direction::UP, Vec2::NEG_Y),
        (Direction::LEFT, Vec2::NEG_X),
        (Direction::DOWN, Vec2::Y),
        (Direction::RIGHT, Vec2::X),
    ];

    #[inline]
    pub fn contains(self, other: Direction) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Direction) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Direction {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub health: i32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    /// Seconds until the next dash is allowed
    pub dash_cooldown: f32,
    /// Held movement keys this frame
    pub movement_direction: Direction,
    /// Keyboard displacement applied this frame
    pub movement_delta: Vec2,
    /// Glow shown when the dash comes back; visual only
    pub dash_reactivation_effect_alpha: f32,
    /// Remaining dash displacement, halves every frame
    pub dash_delta: Vec2,
    /// Full angular width of the shot cone in whole degrees
    pub bullet_spread: i32,
    pub is_invincible: bool,
    /// Unit vector from the ship toward the cursor
    pub looking_direction: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec2::new(LEVEL_WIDTH / 2.0, LEVEL_HEIGHT - LEVEL_HEIGHT / 6.0),
            health: MAX_PLAYER_HEALTH,
            fire_cooldown: 0.0,
            dash_cooldown: 0.0,
            movement_direction: Direction::NONE,
            movement_delta: Vec2::ZERO,
            dash_reactivation_effect_alpha: 0.0,
            dash_delta: Vec2::ZERO,
            bullet_spread: PLAYER_BULLET_SPREAD,
            is_invincible: false,
            looking_direction: Vec2::ZERO,
        }
    }
}

impl Player {
    /// Facing in degrees, clockwise from screen-up, in (-180, 180]
    pub fn looking_angle(&self) -> f32 {
        angle_from_up(self.looking_direction)
    }

    pub fn hitbox(&self) -> Circle {
        Circle {
            center: self.position,
            radius: PLAYER_HITBOX_RADIUS,
        }
    }
}

/// A drifting, spinning asteroid
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub sprite: &'static AsteroidSprite,
    /// Degrees, kept in [-180, 180)
    pub angle: f32,
    /// Degrees per frame
    pub angle_delta: f32,
    pub position: Vec2,
    /// Pixels per frame
    pub delta: Vec2,
    /// Template hitboxes rotated and scaled for the current angle, centered on the asteroid
    processed: [Circle; MAX_BOUNDING_CIRCLES],
}

impl Asteroid {
    pub fn new(sprite: &'static AsteroidSprite, position: Vec2, angle: f32) -> Self {
        let mut asteroid = Self {
            sprite,
            angle,
            angle_delta: 0.0,
            position,
            delta: Vec2::ZERO,
            processed: [Circle::default(); MAX_BOUNDING_CIRCLES],
        };
        asteroid.refresh_bounding_circles();
        asteroid
    }

    pub fn with_motion(mut self, delta: Vec2, angle_delta: f32) -> Self {
        self.delta = delta;
        self.angle_delta = angle_delta;
        self
    }

    /// Rebuild the processed hitboxes from the sprite template and current angle
    pub fn refresh_bounding_circles(&mut self) {
        let count = self.sprite.bounding_circles.len().min(MAX_BOUNDING_CIRCLES);
        for (processed, template) in self.processed[..count]
            .iter_mut()
            .zip(self.sprite.bounding_circles)
        {
            processed.center = rotate_deg(template.center, self.angle) * SPRITES_SCALE;
            processed.radius = template.radius * SPRITES_SCALE;
        }
    }

    /// Processed hitboxes relative to the asteroid position
    pub fn processed_bounding_circles(&self) -> &[Circle] {
        let count = self.sprite.bounding_circles.len().min(MAX_BOUNDING_CIRCLES);
        &self.processed[..count]
    }

    /// Processed hitboxes in world space
    pub fn hitboxes(&self) -> impl Iterator<Item = Circle> + '_ {
        self.processed_bounding_circles()
            .iter()
            .map(move |c| c.translated(self.position))
    }
}

/// Oversized decorative asteroid drifting behind the arena
#[derive(Debug, Clone, Default)]
pub struct BackgroundAsteroid {
    pub position: Vec2,
    pub angle: f32,
    pub position_delta: Vec2,
    pub angle_delta: f32,
}

/// The boss: a stationary marine that tracks the player with its weapon
#[derive(Debug, Clone)]
pub struct Boss {
    pub position: Vec2,
    pub health: i32,
    /// Scaled hitboxes relative to the boss center, as drawn facing right
    pub bounding_circles: [Circle; BOSS_MARINE_BOUNDING_CIRCLES],
    /// -1 when facing left, 1 when facing right
    pub horizontal_flip: f32,
    /// Hitboxes for the current facing, in world space
    pub processed_bounding_circles: [Circle; BOSS_MARINE_BOUNDING_CIRCLES],
    /// Muzzle position in world space
    pub bullet_origin: Vec2,
    /// Degrees
    pub weapon_angle: f32,
    /// Angle the weapon is easing toward
    pub ideal_weapon_angle: f32,
}

impl Boss {
    pub fn new(position: Vec2) -> Self {
        let bounding_circles = sprites::BOSS_MARINE_BOUNDING_CIRCLES.map(|c| Circle {
            center: c.center * SPRITES_SCALE,
            radius: c.radius * SPRITES_SCALE,
        });

        Self {
            position,
            health: BOSS_MARINE_MAX_HEALTH,
            bounding_circles,
            horizontal_flip: 1.0,
            processed_bounding_circles: bounding_circles.map(|c| c.translated(position)),
            bullet_origin: position,
            weapon_angle: 0.0,
            ideal_weapon_angle: 0.0,
        }
    }

    /// Weapon pivot relative to the boss center for the current facing
    pub fn weapon_offset(&self) -> Vec2 {
        let offset = sprites::BOSS_MARINE_WEAPON_OFFSET * SPRITES_SCALE;
        Vec2::new(self.horizontal_flip * offset.x, offset.y)
    }

    /// Take damage; health never drops below zero.
    ///
    /// Nothing in the frame loop deals damage to the boss yet, and reaching
    /// zero has no effect.
    pub fn apply_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).clamp(0, BOSS_MARINE_MAX_HEALTH);
    }
}

/// Projectile hitbox shape
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ProjectileShape {
    /// Unused slot
    #[default]
    None,
    /// Round shot
    Regular { radius: f32 },
    /// Rectangular shot, rotated by the projectile angle
    Squared { size: Vec2 },
}

/// A shot in flight, or dying
#[derive(Debug, Clone, Default)]
pub struct Projectile {
    pub shape: ProjectileShape,
    /// Pixels per frame
    pub delta: Vec2,
    /// Center, world space
    pub origin: Vec2,
    /// Degrees, clockwise from screen-up
    pub angle: f32,
    /// Set once the shot hit something; it stops and is freed when the timer runs out
    pub will_be_destroyed: bool,
    pub destruction_timer: f32,
    /// Shots from the player never hurt the player
    pub is_hurtful_for_player: bool,
}

impl Slot for Projectile {
    fn is_free(&self) -> bool {
        self.shape == ProjectileShape::None
    }
}

impl Projectile {
    /// Mark for destruction, lingering for `timer` seconds
    pub fn destroy_after(&mut self, timer: f32) {
        self.will_be_destroyed = true;
        self.destruction_timer = timer;
    }
}

/// A fading snapshot of the ship's thruster flames
#[derive(Debug, Clone, Default)]
pub struct ThrusterTrail {
    /// Index of the off-screen buffer owned by this slot
    pub buffer: usize,
    pub alpha: f32,
    pub origin: Vec2,
    /// Degrees
    pub angle: f32,
    /// Flames drawn into the buffer at capture time
    pub thrusters: Thrusters,
}

impl Slot for ThrusterTrail {
    fn is_free(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Seconds since session start (drives shader animation)
    pub time: f32,
    /// Frames simulated
    pub frame: u64,
    pub player: Player,
    pub asteroids: Vec<Asteroid>,
    pub background_asteroid: BackgroundAsteroid,
    pub boss: Boss,
    pub projectiles: SlotPool<Projectile>,
    pub trails: SlotPool<ThrusterTrail>,
    pub camera: Camera,
    pub cursor: Cursor,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self::empty(seed);
        state.spawn_asteroids();
        state.spawn_background_asteroid();

        log::info!(
            "Session created with seed {} ({} asteroids)",
            seed,
            state.asteroids.len()
        );

        state
    }

    /// A session with no asteroids and a still background
    pub fn empty(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            frame: 0,
            player: Player::default(),
            asteroids: Vec::with_capacity(MAX_ASTEROIDS),
            background_asteroid: BackgroundAsteroid::default(),
            boss: Boss::new(Vec2::new(LEVEL_WIDTH / 2.0, LEVEL_HEIGHT / 2.0)),
            projectiles: SlotPool::new(PROJECTILES_MAX),
            trails: SlotPool::with_init(THRUSTER_TRAILS_MAX, |buffer| ThrusterTrail {
                buffer,
                ..Default::default()
            }),
            camera: Camera::default(),
            cursor: Cursor::default(),
        }
    }

    /// Scatter a random batch of asteroids over the arena
    pub fn spawn_asteroids(&mut self) {
        let count = self.rng.random_range(MIN_ASTEROIDS..MAX_ASTEROIDS);

        self.asteroids.clear();
        for _ in 0..count {
            let sprite = &ASTEROID_SPRITES[self.rng.random_range(0..ASTEROID_SPRITES.len())];
            let w = sprite.rect.width as i32;
            let h = sprite.rect.height as i32;

            let angle = self.rng.random_range(0..=360) as f32 - 180.0;
            let angle_delta = self.rng.random_range(-8..=8) as f32 / 64.0;
            let position = Vec2::new(
                self.rng.random_range(w..=LEVEL_WIDTH as i32 - w) as f32,
                self.rng.random_range(h..=LEVEL_HEIGHT as i32 - h) as f32,
            );
            let delta = Vec2::new(
                self.rng.random_range(-8..=8) as f32 / 64.0,
                self.rng.random_range(-8..=8) as f32 / 64.0,
            );

            self.asteroids
                .push(Asteroid::new(sprite, position, angle).with_motion(delta, angle_delta));
        }
    }

    /// Place the decorative asteroid with a random slow drift
    pub fn spawn_background_asteroid(&mut self) {
        self.background_asteroid = BackgroundAsteroid {
            position: Vec2::new(
                self.rng.random_range(0..=LEVEL_WIDTH as i32) as f32,
                self.rng.random_range(0..=LEVEL_HEIGHT as i32) as f32,
            ),
            angle: self.rng.random_range(0..=360) as f32,
            position_delta: Vec2::new(
                self.rng.random_range(-1..=1) as f32 * 0.05,
                self.rng.random_range(-1..=1) as f32 * 0.05,
            ),
            angle_delta: self.rng.random_range(-1..=1) as f32 * 0.005,
        };
    }
}
