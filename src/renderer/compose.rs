//! Two-phase frame composition
//!
//! Phase one draws the whole world into the arena-sized [`RenderTarget::World`]
//! buffer, back to front. The ship is composed first in its own small buffer
//! so the flames stay glued to it under rotation. Phase two presents the world
//! buffer through the camera and adds the FPS overlay.

use glam::Vec2;

use super::uniforms::{ArenaBorderUniforms, DashGlowUniforms, StarsUniforms};
use super::{DrawSink, Rectangle, RenderTarget, TextureDraw, TextureId, Tint, colors};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::state::{GameState, ProjectileShape};
use crate::sim::thrusters::{Thrusters, thrusters_for};
use crate::sim::tick::capture_thruster_trail;
use crate::sprites::{self, SpriteRect};

/// Background layer: the arena plus the parallax margin on both sides
const BACKGROUND_SIZE: f32 = LEVEL_WIDTH + 2.0 * BACKGROUND_PARALLAX_OFFSET;
/// Nebula noise is generated at a quarter of the background resolution
const NEBULA_NOISE_DOWNSCALE: f32 = 4.0;
pub const NEBULA_NOISE_SIZE: f32 = BACKGROUND_SIZE / NEBULA_NOISE_DOWNSCALE;

/// Width of the outline around a live projectile
const PROJECTILE_BORDER: f32 = 3.0;
/// Dying projectiles flash bigger
const PROJECTILE_DYING_SCALE: f32 = 1.5;

const THRUSTER_TINT_ALPHA: f32 = 0.85;
const DASH_GLOW_ALPHA: f32 = 0.1;

/// An off-screen buffer the platform must allocate before the first frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffscreenTarget {
    pub target: RenderTarget,
    pub width: u32,
    pub height: u32,
}

/// Flame sprites and where they sit inside the ship buffer
const THRUSTER_PLACEMENT: [(Thrusters, SpriteRect, Vec2); 4] = [
    (Thrusters::BOTTOM, sprites::THRUSTER_BOTTOM, Vec2::new(0.0, 14.0)),
    (Thrusters::TOP, sprites::THRUSTER_TOP, Vec2::ZERO),
    (Thrusters::LEFT, sprites::THRUSTER_LEFT, Vec2::ZERO),
    (Thrusters::RIGHT, sprites::THRUSTER_RIGHT, Vec2::new(14.0, 0.0)),
];

/// Draws a [`GameState`] into a [`DrawSink`]
#[derive(Debug, Clone)]
pub struct Renderer {
    pub show_fps: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { show_fps: true }
    }
}

impl Renderer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            show_fps: settings.show_fps,
        }
    }

    /// Every off-screen buffer the renderer draws into, with its pixel size
    pub fn offscreen_targets() -> Vec<OffscreenTarget> {
        let ship_w = sprites::PLAYER.width as u32;
        let ship_h = sprites::PLAYER.height as u32;

        let mut targets = vec![
            OffscreenTarget {
                target: RenderTarget::World,
                width: LEVEL_WIDTH as u32,
                height: LEVEL_HEIGHT as u32,
            },
            OffscreenTarget {
                target: RenderTarget::PlayerShip,
                width: ship_w,
                height: ship_h,
            },
        ];
        targets.extend((0..THRUSTER_TRAILS_MAX).map(|i| OffscreenTarget {
            target: RenderTarget::Trail(i),
            width: ship_w,
            height: ship_h,
        }));
        targets
    }

    /// Render a full frame: world layer, then presentation
    ///
    /// Takes the state mutably because drawing the ship may capture a new
    /// thruster trail.
    pub fn render_frame(&self, state: &mut GameState, sink: &mut impl DrawSink) {
        self.render_phase1(state, sink);
        self.render_final(state, sink);
    }

    /// Compose the ship buffer, capture a trail if flames are lit, and draw
    /// the world layer
    pub fn render_phase1(&self, state: &mut GameState, sink: &mut impl DrawSink) {
        render_player_texture(state, sink);

        sink.begin_target(RenderTarget::World);
        sink.clear(colors::BLACK);

        render_background(state, sink);
        render_background_asteroid(state, sink);
        render_arena_border(state, sink);
        render_asteroids(state, sink);
        render_boss(state, sink);
        render_thruster_trails(state, sink);
        render_player(state, sink);
        render_projectiles(state, sink);
        render_mouse_cursor(state, sink);

        sink.end_target();
    }

    /// Present the world buffer through the camera
    pub fn render_final(&self, state: &GameState, sink: &mut impl DrawSink) {
        sink.begin_target(RenderTarget::Screen);
        sink.clear(colors::BLACK);

        sink.begin_camera(&state.camera);
        // Render targets are stored bottom-up: sample with a negative height
        sink.draw_texture(&TextureDraw {
            texture: TextureId::Target(RenderTarget::World),
            source: Rectangle::new(0.0, 0.0, LEVEL_WIDTH, -LEVEL_HEIGHT),
            dest: Rectangle::new(0.0, 0.0, LEVEL_WIDTH, LEVEL_HEIGHT),
            pivot: Vec2::ZERO,
            rotation: 0.0,
            tint: colors::WHITE,
        });
        sink.end_camera();

        if self.show_fps {
            sink.draw_fps(Vec2::ZERO);
        }

        sink.end_target();
    }
}

/// Atlas sprite scaled by `scale` and rotated about its center, centered on `position`
fn centered_sprite(rect: SpriteRect, position: Vec2, scale: f32, rotation: f32, tint: Tint) -> TextureDraw {
    let size = rect.size() * scale;
    TextureDraw {
        texture: TextureId::Sprites,
        source: rect.into(),
        dest: Rectangle::at(position, size),
        pivot: size / 2.0,
        rotation,
        tint,
    }
}

/// An off-screen ship-sized buffer stamped into the world
fn ship_buffer(target: RenderTarget, position: Vec2, rotation: f32, tint: Tint) -> TextureDraw {
    let size = sprites::PLAYER.size();
    TextureDraw {
        texture: TextureId::Target(target),
        source: Rectangle::new(0.0, 0.0, size.x, -size.y),
        dest: Rectangle::at(position, size * SPRITES_SCALE),
        pivot: size * SPRITES_SCALE / 2.0,
        rotation,
        tint,
    }
}

fn render_thrusters(thrusters: Thrusters, sink: &mut impl DrawSink) {
    let tint = colors::WHITE.fade(THRUSTER_TINT_ALPHA);

    for (flag, rect, offset) in THRUSTER_PLACEMENT {
        if !thrusters.contains(flag) {
            continue;
        }
        sink.draw_texture(&TextureDraw {
            texture: TextureId::Sprites,
            source: rect.into(),
            dest: Rectangle::at(offset, rect.size()),
            pivot: Vec2::ZERO,
            rotation: 0.0,
            tint,
        });
    }
}

fn render_player_texture(state: &mut GameState, sink: &mut impl DrawSink) {
    let player = &state.player;
    let thrusters = thrusters_for(player.looking_angle(), player.movement_direction);

    sink.begin_target(RenderTarget::PlayerShip);
    sink.clear(colors::BLANK);

    let glow = DashGlowUniforms::new(
        colors::SKYBLUE.fade(DASH_GLOW_ALPHA),
        player.dash_reactivation_effect_alpha,
    );
    sink.set_uniforms(DashGlowUniforms::SHADER, bytemuck::bytes_of(&glow));

    sink.begin_shader(DashGlowUniforms::SHADER);
    sink.draw_texture(&TextureDraw {
        texture: TextureId::Sprites,
        source: sprites::PLAYER.into(),
        dest: Rectangle::at(Vec2::ZERO, sprites::PLAYER.size()),
        pivot: Vec2::ZERO,
        rotation: 0.0,
        tint: colors::WHITE,
    });
    sink.end_shader();

    render_thrusters(thrusters, sink);
    sink.end_target();

    if let Some(buffer) = capture_thruster_trail(state, thrusters) {
        sink.begin_target(RenderTarget::Trail(buffer));
        sink.clear(colors::BLANK);
        render_thrusters(thrusters, sink);
        sink.end_target();
    }
}

fn render_background(state: &GameState, sink: &mut impl DrawSink) {
    // The noise window slides with the player for a slight parallax
    let offset = Vec2::new(
        crate::lerp(0.0, BACKGROUND_PARALLAX_OFFSET, state.player.position.x / LEVEL_WIDTH),
        crate::lerp(0.0, BACKGROUND_PARALLAX_OFFSET, state.player.position.y / LEVEL_HEIGHT),
    );

    let stars = StarsUniforms::new([BACKGROUND_SIZE, BACKGROUND_SIZE], state.time);
    sink.set_uniforms(StarsUniforms::SHADER, bytemuck::bytes_of(&stars));

    sink.clear(colors::SPACE);
    sink.begin_shader(StarsUniforms::SHADER);
    sink.draw_texture(&TextureDraw {
        texture: TextureId::NebulaNoise,
        source: Rectangle::new(
            offset.x,
            offset.y,
            NEBULA_NOISE_SIZE - BACKGROUND_PARALLAX_OFFSET,
            NEBULA_NOISE_SIZE - BACKGROUND_PARALLAX_OFFSET,
        ),
        dest: Rectangle::new(0.0, 0.0, LEVEL_WIDTH, LEVEL_HEIGHT),
        pivot: Vec2::ZERO,
        rotation: 0.0,
        tint: colors::WHITE,
    });
    sink.end_shader();
}

fn render_background_asteroid(state: &GameState, sink: &mut impl DrawSink) {
    let asteroid = &state.background_asteroid;
    sink.draw_texture(&centered_sprite(
        sprites::BACKGROUND_ASTEROID,
        asteroid.position,
        BACKGROUND_ASTEROID_SCALE,
        asteroid.angle,
        colors::GRAY,
    ));
}

fn render_arena_border(state: &GameState, sink: &mut impl DrawSink) {
    let border = ArenaBorderUniforms::new(
        colors::DARKBLUE,
        colors::BLUE,
        [LEVEL_WIDTH, LEVEL_HEIGHT],
        state.time,
    );
    sink.set_uniforms(ArenaBorderUniforms::SHADER, bytemuck::bytes_of(&border));

    sink.begin_shader(ArenaBorderUniforms::SHADER);
    sink.draw_rect(
        Rectangle::new(0.0, 0.0, LEVEL_WIDTH, LEVEL_HEIGHT),
        Vec2::ZERO,
        0.0,
        colors::BLUE,
    );
    sink.end_shader();
}

fn render_asteroids(state: &GameState, sink: &mut impl DrawSink) {
    for asteroid in &state.asteroids {
        sink.draw_texture(&centered_sprite(
            asteroid.sprite.rect,
            asteroid.position,
            SPRITES_SCALE,
            asteroid.angle,
            colors::WHITE,
        ));
    }
}

fn render_boss(state: &GameState, sink: &mut impl DrawSink) {
    let boss = &state.boss;

    // A negative source width mirrors the sprite when facing left
    let mut body = centered_sprite(sprites::BOSS_MARINE, boss.position, SPRITES_SCALE, 0.0, colors::WHITE);
    body.source.width *= boss.horizontal_flip;
    sink.draw_texture(&body);

    let mut weapon = centered_sprite(
        sprites::BOSS_MARINE_WEAPON,
        boss.position + boss.weapon_offset(),
        SPRITES_SCALE,
        boss.weapon_angle,
        colors::WHITE,
    );
    weapon.source.width *= boss.horizontal_flip;
    sink.draw_texture(&weapon);

    sink.draw_pixel(boss.bullet_origin, colors::RED);
}

fn render_thruster_trails(state: &GameState, sink: &mut impl DrawSink) {
    for (_, trail) in state.trails.iter_live() {
        sink.draw_texture(&ship_buffer(
            RenderTarget::Trail(trail.buffer),
            trail.origin,
            trail.angle,
            colors::WHITE.fade(trail.alpha),
        ));
    }
}

fn render_player(state: &GameState, sink: &mut impl DrawSink) {
    let player = &state.player;
    sink.draw_texture(&ship_buffer(
        RenderTarget::PlayerShip,
        player.position,
        player.looking_angle(),
        colors::WHITE,
    ));
}

fn render_projectiles(state: &GameState, sink: &mut impl DrawSink) {
    for (_, projectile) in state.projectiles.iter_live() {
        let scale = if projectile.will_be_destroyed { PROJECTILE_DYING_SCALE } else { 1.0 };

        match projectile.shape {
            ProjectileShape::None => {}
            ProjectileShape::Regular { radius } => {
                sink.draw_circle(projectile.origin, radius * scale, colors::BLUE);
                if !projectile.will_be_destroyed {
                    sink.draw_circle(projectile.origin, radius - PROJECTILE_BORDER, colors::DARKBLUE);
                }
            }
            ProjectileShape::Squared { size } => {
                let outer = size * scale;
                sink.draw_rect(
                    Rectangle::at(projectile.origin, outer),
                    outer / 2.0,
                    projectile.angle,
                    colors::BLUE,
                );
                if !projectile.will_be_destroyed {
                    let inner = outer - Vec2::splat(PROJECTILE_BORDER * 2.0);
                    sink.draw_rect(
                        Rectangle::at(projectile.origin, inner),
                        inner / 2.0,
                        projectile.angle,
                        colors::DARKBLUE,
                    );
                }
            }
        }
    }
}

fn render_mouse_cursor(state: &GameState, sink: &mut impl DrawSink) {
    sink.draw_texture(&centered_sprite(
        sprites::MOUSE_CURSOR,
        state.cursor.world,
        MOUSE_CURSOR_SCALE,
        0.0,
        colors::WHITE,
    ));
}
