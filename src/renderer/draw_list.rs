//! Recording draw sink
//!
//! Stores every call as a [`DrawCommand`]. Used by the headless binary and to
//! assert on draw order in tests.

use glam::Vec2;

use super::{DrawSink, Rectangle, RenderTarget, ShaderId, TextureDraw, TextureId, Tint};
use crate::sim::camera::Camera;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginTarget(RenderTarget),
    EndTarget,
    Clear(Tint),
    SetUniforms { shader: ShaderId, bytes: Vec<u8> },
    BeginShader(ShaderId),
    EndShader,
    BeginCamera(Camera),
    EndCamera,
    Texture(TextureDraw),
    Rect {
        rect: Rectangle,
        pivot: Vec2,
        rotation: f32,
        color: Tint,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Tint,
    },
    Pixel {
        position: Vec2,
        color: Tint,
    },
    Fps(Vec2),
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every recorded command
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Textured draws sampling `texture`, in issue order
    pub fn textures_from(&self, texture: TextureId) -> impl Iterator<Item = (usize, &TextureDraw)> {
        self.commands
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| match c {
                DrawCommand::Texture(draw) if draw.texture == texture => Some((i, draw)),
                _ => None,
            })
    }

    /// Index of the first command matching `pred`
    pub fn position(&self, pred: impl Fn(&DrawCommand) -> bool) -> Option<usize> {
        self.commands.iter().position(pred)
    }

    /// Every begin has a matching end, scopes nest, and no shader or camera
    /// scope outlives its target scope
    pub fn is_well_nested(&self) -> bool {
        #[derive(PartialEq)]
        enum Scope {
            Target,
            Shader,
            Camera,
        }

        let mut stack = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::BeginTarget(_) => {
                    if !stack.is_empty() {
                        return false;
                    }
                    stack.push(Scope::Target);
                }
                DrawCommand::BeginShader(_) => stack.push(Scope::Shader),
                DrawCommand::BeginCamera(_) => stack.push(Scope::Camera),
                DrawCommand::EndTarget => {
                    if stack.pop() != Some(Scope::Target) {
                        return false;
                    }
                }
                DrawCommand::EndShader => {
                    if stack.pop() != Some(Scope::Shader) {
                        return false;
                    }
                }
                DrawCommand::EndCamera => {
                    if stack.pop() != Some(Scope::Camera) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        stack.is_empty()
    }
}

impl DrawSink for DrawList {
    fn begin_target(&mut self, target: RenderTarget) {
        self.commands.push(DrawCommand::BeginTarget(target));
    }

    fn end_target(&mut self) {
        self.commands.push(DrawCommand::EndTarget);
    }

    fn clear(&mut self, color: Tint) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_uniforms(&mut self, shader: ShaderId, bytes: &[u8]) {
        self.commands.push(DrawCommand::SetUniforms {
            shader,
            bytes: bytes.to_vec(),
        });
    }

    fn begin_shader(&mut self, shader: ShaderId) {
        self.commands.push(DrawCommand::BeginShader(shader));
    }

    fn end_shader(&mut self) {
        self.commands.push(DrawCommand::EndShader);
    }

    fn begin_camera(&mut self, camera: &Camera) {
        self.commands.push(DrawCommand::BeginCamera(*camera));
    }

    fn end_camera(&mut self) {
        self.commands.push(DrawCommand::EndCamera);
    }

    fn draw_texture(&mut self, draw: &TextureDraw) {
        self.commands.push(DrawCommand::Texture(*draw));
    }

    fn draw_rect(&mut self, rect: Rectangle, pivot: Vec2, rotation: f32, color: Tint) {
        self.commands.push(DrawCommand::Rect {
            rect,
            pivot,
            rotation,
            color,
        });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Tint) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_pixel(&mut self, position: Vec2, color: Tint) {
        self.commands.push(DrawCommand::Pixel { position, color });
    }

    fn draw_fps(&mut self, position: Vec2) {
        self.commands.push(DrawCommand::Fps(position));
    }
}
