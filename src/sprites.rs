//! Sprite sheet layout and hitbox templates
//!
//! Every entity is drawn from one texture atlas. Rects are in atlas pixels;
//! hitbox templates are in unscaled sprite pixels relative to the sprite
//! center and get multiplied by `SPRITES_SCALE` when used.

use glam::Vec2;

use crate::sim::collision::Circle;

/// A region of the sprite atlas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SpriteRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

pub const PLAYER: SpriteRect = SpriteRect::new(0.0, 16.0, 17.0, 19.0);
pub const MOUSE_CURSOR: SpriteRect = SpriteRect::new(0.0, 0.0, 15.0, 15.0);
pub const BACKGROUND_ASTEROID: SpriteRect = SpriteRect::new(121.0, 0.0, 35.0, 29.0);

pub const BOSS_MARINE: SpriteRect = SpriteRect::new(0.0, 35.0, 71.0, 71.0);
pub const BOSS_MARINE_WEAPON: SpriteRect = SpriteRect::new(76.0, 61.0, 85.0, 37.0);
/// Weapon pivot relative to the boss center, before horizontal flip
pub const BOSS_MARINE_WEAPON_OFFSET: Vec2 = Vec2::new(14.0, 6.0);
/// Muzzle height relative to the weapon pivot
pub const BOSS_MARINE_MUZZLE_Y: f32 = -6.0;

pub const BOSS_MARINE_BOUNDING_CIRCLES: [Circle; 12] = [
    Circle::new(4.0, -25.0, 12.0),
    Circle::new(25.0, -14.0, 5.0),
    Circle::new(2.0, 22.0, 15.0),
    Circle::new(0.0, 12.0, 14.0),
    Circle::new(7.0, 10.0, 12.0),
    Circle::new(13.0, 0.0, 7.0),
    Circle::new(-14.0, 2.0, 8.0),
    Circle::new(-23.0, -9.0, 12.0),
    Circle::new(-10.0, -8.0, 14.0),
    Circle::new(6.0, -8.0, 8.0),
    Circle::new(17.0, -11.0, 9.0),
    Circle::new(27.0, -5.0, 8.0),
];

/// Thruster flames, stamped over the ship inside its own buffer
pub const THRUSTER_BOTTOM: SpriteRect = SpriteRect::new(17.0, 30.0, 17.0, 4.0);
pub const THRUSTER_TOP: SpriteRect = SpriteRect::new(17.0, 16.0, 17.0, 4.0);
pub const THRUSTER_LEFT: SpriteRect = SpriteRect::new(17.0, 16.0, 3.0, 18.0);
pub const THRUSTER_RIGHT: SpriteRect = SpriteRect::new(31.0, 16.0, 3.0, 18.0);

/// A fixed asteroid shape: its atlas region plus its hitbox template
#[derive(Debug)]
pub struct AsteroidSprite {
    pub rect: SpriteRect,
    pub bounding_circles: &'static [Circle],
}

pub static ASTEROID_SPRITES: [AsteroidSprite; 3] = [
    AsteroidSprite {
        rect: SpriteRect::new(34.0, 0.0, 19.0, 19.0),
        bounding_circles: &[Circle::new(0.0, 0.0, 9.0)],
    },
    AsteroidSprite {
        rect: SpriteRect::new(55.0, 0.0, 35.0, 25.0),
        bounding_circles: &[
            Circle::new(6.0, -2.0, 11.0),
            Circle::new(4.0, 7.0, 5.0),
            Circle::new(-6.0, 1.0, 12.0),
        ],
    },
    AsteroidSprite {
        rect: SpriteRect::new(91.0, 0.0, 27.0, 25.0),
        bounding_circles: &[Circle::new(0.0, 0.0, 13.0)],
    },
];
