//! Render composition module
//!
//! The game never talks to a GPU directly. [`compose::Renderer`] walks the
//! game state and issues draw calls against a [`DrawSink`]; the platform
//! implements the sink on top of whatever graphics API it has. Everything
//! here uses raylib-style conventions: a destination rectangle's `x, y` is
//! where the pivot lands, rotation is in degrees clockwise, and a negative
//! source width or height mirrors the image.

pub mod compose;
pub mod draw_list;
pub mod uniforms;

use glam::Vec2;

use crate::sim::camera::Camera;
use crate::sprites::SpriteRect;

pub use compose::{OffscreenTarget, Renderer};
pub use draw_list::{DrawCommand, DrawList};
pub use uniforms::{ArenaBorderUniforms, DashGlowUniforms, StarsUniforms};

/// Where draw calls currently land
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderTarget {
    /// The window backbuffer
    Screen,
    /// Arena-sized buffer holding the whole world layer
    World,
    /// Ship-sized buffer the player sprite and its flames are composed in
    PlayerShip,
    /// Ship-sized buffer owned by one trail slot
    Trail(usize),
}

/// Image a textured draw samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// The sprite atlas
    Sprites,
    /// Procedural noise behind the stars shader
    NebulaNoise,
    /// A previously rendered off-screen buffer
    Target(RenderTarget),
}

/// Externally compiled shader programs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderId {
    Stars,
    ArenaBorder,
    DashGlow,
}

/// Normalized RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tint(pub [f32; 4]);

impl Tint {
    pub const fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ])
    }

    /// Same color with alpha replaced by `alpha` (clamped to [0, 1])
    pub fn fade(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Self([r, g, b, alpha.clamp(0.0, 1.0)])
    }

    pub fn alpha(self) -> f32 {
        self.0[3]
    }
}

/// Palette
pub mod colors {
    use super::Tint;

    pub const WHITE: Tint = Tint::rgba8(255, 255, 255, 255);
    pub const GRAY: Tint = Tint::rgba8(130, 130, 130, 255);
    pub const BLUE: Tint = Tint::rgba8(0, 121, 241, 255);
    pub const DARKBLUE: Tint = Tint::rgba8(0, 82, 172, 255);
    pub const SKYBLUE: Tint = Tint::rgba8(102, 191, 255, 255);
    pub const RED: Tint = Tint::rgba8(230, 41, 55, 255);
    pub const BLACK: Tint = Tint::rgba8(0, 0, 0, 255);
    /// Fully transparent
    pub const BLANK: Tint = Tint::rgba8(0, 0, 0, 0);
    /// Deep purple under the star field
    pub const SPACE: Tint = Tint::rgba8(41, 1, 53, 69);
}

/// Rectangle in pixels; `width`/`height` may be negative on source rects
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of `size` with its reference point at `position`
    pub fn at(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

impl From<SpriteRect> for Rectangle {
    fn from(rect: SpriteRect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// A textured, rotated quad
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureDraw {
    pub texture: TextureId,
    pub source: Rectangle,
    /// `x, y` is where `pivot` lands
    pub dest: Rectangle,
    /// Rotation center, relative to the destination's top-left corner
    pub pivot: Vec2,
    /// Degrees, clockwise
    pub rotation: f32,
    pub tint: Tint,
}

/// Drawing backend supplied by the platform
///
/// Begin/end calls are always issued in matched pairs and never interleave
/// across kinds (a shader scope is always closed inside the target scope
/// that opened it).
pub trait DrawSink {
    /// Redirect draws to `target` until the matching [`DrawSink::end_target`]
    fn begin_target(&mut self, target: RenderTarget);
    fn end_target(&mut self);

    /// Fill the current target
    fn clear(&mut self, color: Tint);

    /// Push raw uniform bytes for `shader`; the layout matches the shader's uniform block
    fn set_uniforms(&mut self, shader: ShaderId, bytes: &[u8]);
    fn begin_shader(&mut self, shader: ShaderId);
    fn end_shader(&mut self);

    /// Transform subsequent draws through `camera`
    fn begin_camera(&mut self, camera: &Camera);
    fn end_camera(&mut self);

    fn draw_texture(&mut self, draw: &TextureDraw);
    /// Solid rectangle; `rect.x, rect.y` is where `pivot` lands
    fn draw_rect(&mut self, rect: Rectangle, pivot: Vec2, rotation: f32, color: Tint);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Tint);
    fn draw_pixel(&mut self, position: Vec2, color: Tint);
    /// Frame-rate overlay with its top-left corner at `position`
    fn draw_fps(&mut self, position: Vec2);
}
