//! Per-frame simulation step
//!
//! One call to [`tick`] advances every system once, in a fixed order: later
//! systems read what earlier ones wrote this frame (the boss aims at the
//! player's already-updated position, for instance). Movement is in pixels
//! per frame; cooldowns and timers count down in seconds.

use glam::Vec2;
use rand::Rng;

use super::collision::{
    Circle, border_edge, bounce_off_edge, circles_collide, rotated_rect_circle_collision,
    separation_offset,
};
use super::input::{Intent, RawInput};
use super::pool::SlotPool;
use super::state::{
    Asteroid, BackgroundAsteroid, Boss, Direction, GameEvent, GameState, Player, Projectile,
    ProjectileShape, ThrusterTrail,
};
use super::thrusters::Thrusters;
use crate::consts::*;
use crate::settings::Settings;
use crate::sprites;
use crate::{angle_between, angle_from_up, lerp, reflect, rotate_deg, wrap_to_range};

/// What a frame produced for the layers around the simulation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// The shader reload key was pressed
    pub reload_shaders: bool,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &RawInput, settings: &Settings, dt: f32) -> FrameReport {
    let intent = Intent::from_input(input, &settings.key_bindings);
    let mut report = FrameReport {
        events: Vec::new(),
        reload_shaders: intent.reload_shaders,
    };

    state.camera.update(state.player.position, input.window_size);

    update_projectiles(&mut state.projectiles, &state.asteroids, dt);
    update_thruster_trails(&mut state.trails);
    update_asteroids(&mut state.asteroids);
    update_background_asteroid(&mut state.background_asteroid);

    update_aim(state, input, settings.effective_mouse_sensitivity());
    update_player_position(&mut state.player, intent.movement, &state.asteroids);
    if update_player_cooldowns(&mut state.player, dt) {
        log::debug!("Dash ready (frame {})", state.frame);
        report.events.push(GameEvent::DashReady);
    }

    update_boss(&mut state.boss, state.player.position);

    if try_dashing(&mut state.player, &intent) {
        log::debug!("Dash toward {:?} (frame {})", state.player.dash_delta, state.frame);
        report.events.push(GameEvent::Dashed);
    }
    if try_firing(state, &intent) {
        report.events.push(GameEvent::ShotFired);
    }

    state.time += dt;
    state.frame += 1;

    report
}

// === Projectiles ===

/// Move live shots, retire dying ones, and stop shots that hit something
pub fn update_projectiles(projectiles: &mut SlotPool<Projectile>, asteroids: &[Asteroid], dt: f32) {
    for (_, projectile) in projectiles.iter_live_mut() {
        projectile.destruction_timer =
            (projectile.destruction_timer - dt).clamp(0.0, PROJECTILE_TIMER_MAX);

        if projectile.will_be_destroyed {
            if projectile.destruction_timer <= 0.0 {
                *projectile = Projectile::default();
            }
            continue;
        }

        let p = projectile.origin;
        if p.x <= 0.0 || p.y <= 0.0 || p.x >= LEVEL_WIDTH - 1.0 || p.y >= LEVEL_HEIGHT - 1.0 {
            projectile.origin = p.clamp(Vec2::ZERO, Vec2::new(LEVEL_WIDTH - 1.0, LEVEL_HEIGHT - 1.0));
            projectile.destroy_after(PROJECTILE_BORDER_HIT_TIMER);
            continue;
        }

        if projectile_hits_asteroid(projectile, asteroids) {
            // Keeps its current (spent) timer: gone on the next update
            projectile.will_be_destroyed = true;
            continue;
        }

        projectile.origin += projectile.delta;
    }
}

/// Shape-specific hit test against every asteroid hitbox
pub fn projectile_hits_asteroid(projectile: &Projectile, asteroids: &[Asteroid]) -> bool {
    let hits = |target: Circle| match projectile.shape {
        ProjectileShape::None => false,
        ProjectileShape::Regular { radius } => circles_collide(
            Circle {
                center: projectile.origin,
                radius,
            },
            target,
        ),
        ProjectileShape::Squared { size } => {
            rotated_rect_circle_collision(projectile.origin, size, projectile.angle, target)
        }
    };

    asteroids.iter().flat_map(|a| a.hitboxes()).any(hits)
}

// === Thruster trails ===

/// Fade every visible trail
pub fn update_thruster_trails(trails: &mut SlotPool<ThrusterTrail>) {
    for (_, trail) in trails.iter_live_mut() {
        trail.alpha = (trail.alpha - THRUSTER_TRAIL_FADE).clamp(0.0, 1.0);
    }
}

/// Snapshot the lit flames at the player's current pose.
///
/// Returns the off-screen buffer the flames must be drawn into, or `None`
/// when nothing is lit or every trail slot is still fading.
pub fn capture_thruster_trail(state: &mut GameState, thrusters: Thrusters) -> Option<usize> {
    if thrusters.is_empty() {
        return None;
    }

    let angle = state.player.looking_angle();
    let origin = state.player.position;

    let Some((_, trail)) = state.trails.acquire() else {
        log::trace!("Trail pool exhausted, frame {}", state.frame);
        return None;
    };

    trail.alpha = 1.0;
    trail.angle = angle;
    trail.origin = origin;
    trail.thrusters = thrusters;

    Some(trail.buffer)
}

// === Asteroids ===

/// Collide, move and spin every asteroid, then bounce them off the arena edges
pub fn update_asteroids(asteroids: &mut [Asteroid]) {
    for i in 0..asteroids.len() {
        for k in 0..asteroids.len() {
            if k == i {
                continue;
            }
            collide_asteroids(asteroids, i, k);
        }

        let asteroid = &mut asteroids[i];
        asteroid.position += asteroid.delta;

        // Spin in [0, 360) space so the wrap is continuous, store in [-180, 180)
        let proper_angle = asteroid.angle + 180.0;
        asteroid.angle = wrap_to_range(proper_angle + asteroid.angle_delta, 360.0) - 180.0;

        asteroid.refresh_bounding_circles();
    }

    bounce_asteroids_off_borders(asteroids);
}

/// Resolve the first overlapping hitbox pair between asteroids `i` and `k`.
///
/// Asteroid `i` is pushed out of `k` by the exact overlap; both velocities
/// are mirrored about screen-up. Returns whether they collided.
pub fn collide_asteroids(asteroids: &mut [Asteroid], i: usize, k: usize) -> bool {
    let offset = asteroids[i].hitboxes().find_map(|mover| {
        asteroids[k]
            .hitboxes()
            .find_map(|obstacle| separation_offset(mover, obstacle))
    });

    let Some(offset) = offset else {
        return false;
    };

    asteroids[i].position += offset;
    asteroids[i].delta = reflect(asteroids[i].delta, Vec2::NEG_Y);
    asteroids[k].delta = reflect(asteroids[k].delta, Vec2::NEG_Y);
    true
}

/// Mirror the velocity of every asteroid touching an arena edge (one edge per asteroid)
pub fn bounce_asteroids_off_borders(asteroids: &mut [Asteroid]) {
    for asteroid in asteroids.iter_mut() {
        let edge = asteroid
            .hitboxes()
            .find_map(|c| border_edge(c, LEVEL_WIDTH, LEVEL_HEIGHT));

        if let Some(edge) = edge {
            asteroid.delta = bounce_off_edge(asteroid.delta, edge);
        }
    }
}

pub fn update_background_asteroid(asteroid: &mut BackgroundAsteroid) {
    asteroid.position += asteroid.position_delta;
    asteroid.angle += asteroid.angle_delta;
}

// === Player ===

/// Move the software cursor and point the ship at it
pub fn update_aim(state: &mut GameState, input: &RawInput, sensitivity: f32) {
    state.cursor.update(input, sensitivity, &state.camera);
    state.player.looking_direction = (state.cursor.world - state.player.position).normalize_or_zero();
}

/// Apply keyboard movement and the decaying dash, then resolve asteroid
/// overlaps and keep the ship inside the arena
pub fn update_player_position(player: &mut Player, movement: Direction, asteroids: &[Asteroid]) {
    player.movement_direction = Direction::NONE;
    player.movement_delta = Vec2::ZERO;

    // Diagonals are deliberately faster: both axis steps are kept
    for (direction, step) in Direction::STEPS {
        if movement.contains(direction) {
            player.movement_direction.insert(direction);
            player.movement_delta += step * PLAYER_MOVEMENT_SPEED;
        }
    }
    player.position += player.movement_delta;

    player.dash_delta = player.dash_delta.lerp(Vec2::ZERO, DASH_DELTA_LERP_RATE);
    // Invincibility ends as soon as the dash rounds to nothing, not when it reaches zero
    player.is_invincible = player.dash_delta.x.round() != 0.0 || player.dash_delta.y.round() != 0.0;
    player.position += player.dash_delta;

    for asteroid in asteroids {
        for obstacle in asteroid.hitboxes() {
            if let Some(offset) = separation_offset(player.hitbox(), obstacle) {
                player.position += offset;
            }
        }
    }

    player.position = player.position.clamp(
        Vec2::splat(PLAYER_HITBOX_RADIUS),
        Vec2::new(
            LEVEL_WIDTH - PLAYER_HITBOX_RADIUS,
            LEVEL_HEIGHT - PLAYER_HITBOX_RADIUS,
        ),
    );
}

/// Count cooldowns down. Returns true on the frame the dash becomes available again.
pub fn update_player_cooldowns(player: &mut Player, dt: f32) -> bool {
    let dash_cooldown_active = player.dash_cooldown > 0.0;

    player.fire_cooldown = (player.fire_cooldown - dt).clamp(0.0, COOLDOWN_MAX);
    player.dash_cooldown = (player.dash_cooldown - dt).clamp(0.0, COOLDOWN_MAX);
    player.dash_reactivation_effect_alpha =
        (player.dash_reactivation_effect_alpha - dt * 2.0).clamp(0.0, COOLDOWN_MAX);

    if player.dash_cooldown <= 0.0 && dash_cooldown_active {
        player.dash_reactivation_effect_alpha = DASH_READY_FLASH;
        return true;
    }

    false
}

/// Start a dash along the current movement. No-op while standing still or on cooldown.
pub fn try_dashing(player: &mut Player, intent: &Intent) -> bool {
    if !intent.dash || player.dash_cooldown > 0.0 {
        return false;
    }

    let direction = player.movement_delta.normalize_or_zero();
    if direction == Vec2::ZERO {
        return false;
    }

    let dash_angle = angle_from_up(direction);

    player.dash_cooldown = PLAYER_DASH_COOLDOWN;
    player.dash_delta = rotate_deg(Vec2::NEG_Y * PLAYER_DASH_DISTANCE, dash_angle);
    player.is_invincible = true;

    true
}

/// Fire one shot toward the cursor if the weapon is ready and a slot is free
pub fn try_firing(state: &mut GameState, intent: &Intent) -> bool {
    if !intent.fire || state.player.fire_cooldown > 0.0 {
        return false;
    }

    let Some((_, projectile)) = state.projectiles.acquire() else {
        log::trace!("Projectile pool exhausted, shot dropped");
        return false;
    };

    let player = &mut state.player;
    let half_spread = (player.bullet_spread / 2).abs();
    let spread = state.rng.random_range(-half_spread..=half_spread) as f32;

    *projectile = Projectile {
        shape: ProjectileShape::Squared {
            size: Vec2::new(PLAYER_PROJECTILE_RADIUS * 1.5, PLAYER_PROJECTILE_RADIUS * 3.0),
        },
        delta: rotate_deg(player.looking_direction * PLAYER_PROJECTILE_SPEED, spread),
        origin: player.position + player.looking_direction * PLAYER_MUZZLE_OFFSET,
        angle: player.looking_angle() + spread,
        will_be_destroyed: false,
        destruction_timer: 0.0,
        is_hurtful_for_player: false,
    };

    player.fire_cooldown = PLAYER_FIRE_COOLDOWN;

    true
}

// === Boss ===

/// Face the player, mirror the hitboxes, and ease the weapon toward the player
pub fn update_boss(boss: &mut Boss, player_position: Vec2) {
    boss.horizontal_flip = if player_position.x < boss.position.x { -1.0 } else { 1.0 };

    for (processed, local) in boss
        .processed_bounding_circles
        .iter_mut()
        .zip(&boss.bounding_circles)
    {
        *processed = Circle {
            center: boss.position + Vec2::new(local.center.x * boss.horizontal_flip, local.center.y),
            radius: local.radius,
        };
    }

    let weapon_offset = boss.weapon_offset();

    boss.ideal_weapon_angle = angle_between(boss.position + weapon_offset, player_position) - 90.0;
    if boss.horizontal_flip < 0.0 {
        // Keep the mirrored weapon sprite upright
        boss.ideal_weapon_angle += 180.0;
    }

    boss.weapon_angle = lerp(boss.weapon_angle, boss.ideal_weapon_angle, BOSS_WEAPON_LERP_RATE);

    let muzzle = Vec2::new(
        boss.horizontal_flip * (sprites::BOSS_MARINE_WEAPON.width / 2.0) * SPRITES_SCALE,
        sprites::BOSS_MARINE_MUZZLE_Y * SPRITES_SCALE,
    );
    boss.bullet_origin = boss.position + weapon_offset + rotate_deg(muzzle, boss.weapon_angle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::KeyCode;
    use crate::sprites::{AsteroidSprite, SpriteRect};

    const DT: f32 = 1.0 / 60.0;

    /// One hitbox of radius 10 once scaled
    static ROUND_TEN: AsteroidSprite = AsteroidSprite {
        rect: SpriteRect::new(0.0, 0.0, 6.0, 6.0),
        bounding_circles: &[Circle::new(0.0, 0.0, 10.0 / SPRITES_SCALE)],
    };

    fn rock(x: f32, y: f32, delta: Vec2) -> Asteroid {
        Asteroid::new(&ROUND_TEN, Vec2::new(x, y), 0.0).with_motion(delta, 0.0)
    }

    fn moving(direction: Direction) -> Intent {
        Intent {
            movement: direction,
            ..Default::default()
        }
    }

    fn live_shot(origin: Vec2, delta: Vec2) -> Projectile {
        Projectile {
            shape: ProjectileShape::Squared {
                size: Vec2::new(13.5, 27.0),
            },
            origin,
            delta,
            ..Default::default()
        }
    }

    #[test]
    fn test_asteroid_pair_resolution_exact_contact() {
        // Radius 10 each, centers 19 apart, closing along the vertical
        let mut field = vec![
            rock(500.0, 500.0, Vec2::new(0.0, 0.5)),
            rock(500.0, 519.0, Vec2::new(0.0, -0.5)),
        ];

        assert!(collide_asteroids(&mut field, 0, 1));

        let distance = field[0].position.distance(field[1].position);
        assert!((distance - 20.0).abs() < 1e-3, "distance {distance}");
        // Components along screen-up are mirrored
        assert_eq!(field[0].delta, Vec2::new(0.0, -0.5));
        assert_eq!(field[1].delta, Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_asteroid_pair_mirrors_only_vertical_component() {
        let mut field = vec![
            rock(500.0, 500.0, Vec2::new(0.3, 0.5)),
            rock(515.0, 510.0, Vec2::new(-0.2, -0.5)),
        ];
        assert!(collide_asteroids(&mut field, 0, 1));
        assert_eq!(field[0].delta, Vec2::new(0.3, -0.5));
        assert_eq!(field[1].delta, Vec2::new(-0.2, 0.5));
    }

    #[test]
    fn test_asteroid_field_update_separates_and_moves() {
        let mut field = vec![
            rock(500.0, 500.0, Vec2::new(0.0, 0.5)),
            rock(500.0, 519.0, Vec2::new(0.0, -0.5)),
        ];

        update_asteroids(&mut field);

        // Resolved once, then each moved along its mirrored velocity
        assert_eq!(field[0].delta, Vec2::new(0.0, -0.5));
        assert_eq!(field[1].delta, Vec2::new(0.0, 0.5));
        assert!(field[0].position.distance(field[1].position) >= 20.0);
    }

    #[test]
    fn test_asteroid_apart_untouched() {
        let mut field = vec![
            rock(100.0, 100.0, Vec2::new(0.1, 0.0)),
            rock(300.0, 300.0, Vec2::new(0.0, 0.1)),
        ];
        assert!(!collide_asteroids(&mut field, 0, 1));
        assert_eq!(field[0].delta, Vec2::new(0.1, 0.0));
    }

    #[test]
    fn test_asteroid_spin_wraps_continuously() {
        let mut field = vec![
            Asteroid::new(&ROUND_TEN, Vec2::new(700.0, 700.0), 179.9)
                .with_motion(Vec2::ZERO, 0.125),
        ];
        update_asteroids(&mut field);
        assert!((field[0].angle - (-179.975)).abs() < 1e-3, "angle {}", field[0].angle);

        let mut field = vec![
            Asteroid::new(&ROUND_TEN, Vec2::new(700.0, 700.0), -179.9)
                .with_motion(Vec2::ZERO, -0.125),
        ];
        update_asteroids(&mut field);
        assert!((field[0].angle - 179.975).abs() < 1e-3, "angle {}", field[0].angle);
    }

    #[test]
    fn test_border_bounce_single_edge() {
        // In the top-left corner moving up-left: only the top edge applies
        let mut field = vec![rock(5.0, 5.0, Vec2::new(-0.1, -0.1))];
        bounce_asteroids_off_borders(&mut field);
        assert_eq!(field[0].delta, Vec2::new(-0.1, 0.1));

        let mut field = vec![rock(LEVEL_WIDTH - 5.0, 700.0, Vec2::new(0.1, 0.0))];
        bounce_asteroids_off_borders(&mut field);
        assert_eq!(field[0].delta, Vec2::new(-0.1, 0.0));
    }

    #[test]
    fn test_projectile_leaving_arena_lingers_then_frees() {
        let mut pool: SlotPool<Projectile> = SlotPool::new(4);
        *pool.acquire().unwrap().1 = live_shot(Vec2::new(10.0, 700.0), Vec2::new(-30.0, 0.0));
        let free_before = pool.free_count();

        // In flight: moves past the edge
        update_projectiles(&mut pool, &[], DT);
        let shot = &pool.slots()[0];
        assert!(!shot.will_be_destroyed);
        assert_eq!(shot.origin, Vec2::new(-20.0, 700.0));

        // Out of bounds: clamped and pending, not freed
        update_projectiles(&mut pool, &[], DT);
        let shot = &pool.slots()[0];
        assert!(shot.will_be_destroyed);
        assert_eq!(shot.destruction_timer, PROJECTILE_BORDER_HIT_TIMER);
        assert_eq!(shot.origin, Vec2::new(0.0, 700.0));
        assert_eq!(pool.free_count(), free_before);

        let mut frames = 0;
        while pool.free_count() == free_before {
            update_projectiles(&mut pool, &[], DT);
            frames += 1;
            assert!(frames < 10, "slot never freed");
        }
        assert!(frames >= 3);
        assert_eq!(pool.free_count(), free_before + 1);
    }

    #[test]
    fn test_projectile_stops_on_asteroid() {
        let field = vec![rock(500.0, 500.0, Vec2::ZERO)];
        let mut pool: SlotPool<Projectile> = SlotPool::new(2);
        *pool.acquire().unwrap().1 = live_shot(Vec2::new(500.0, 520.0), Vec2::new(0.0, -30.0));

        update_projectiles(&mut pool, &field, DT);
        let shot = &pool.slots()[0];
        assert!(shot.will_be_destroyed);
        assert_eq!(shot.origin, Vec2::new(500.0, 520.0));

        update_projectiles(&mut pool, &field, DT);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn test_regular_projectile_hit_test() {
        let field = vec![rock(500.0, 500.0, Vec2::ZERO)];
        let mut shot = Projectile {
            shape: ProjectileShape::Regular { radius: 9.0 },
            origin: Vec2::new(500.0, 518.0),
            ..Default::default()
        };
        assert!(projectile_hits_asteroid(&shot, &field));

        shot.origin = Vec2::new(500.0, 520.0);
        assert!(!projectile_hits_asteroid(&shot, &field));
    }

    #[test]
    fn test_squared_projectile_respects_rotation() {
        let field = vec![rock(500.0, 500.0, Vec2::ZERO)];
        // Long axis vertical: 13.5 wide, 27 tall, centered 20 left of the rock
        let mut shot = live_shot(Vec2::new(480.0, 500.0), Vec2::ZERO);
        assert!(!projectile_hits_asteroid(&shot, &field));

        shot.angle = 90.0;
        assert!(projectile_hits_asteroid(&shot, &field));
    }

    #[test]
    fn test_player_clamped_in_corner() {
        let mut player = Player {
            position: Vec2::splat(PLAYER_HITBOX_RADIUS),
            ..Default::default()
        };
        update_player_position(&mut player, Direction::UP | Direction::LEFT, &[]);
        assert_eq!(player.position, Vec2::splat(PLAYER_HITBOX_RADIUS));

        player.position = Vec2::new(LEVEL_WIDTH, LEVEL_HEIGHT);
        update_player_position(&mut player, Direction::DOWN | Direction::RIGHT, &[]);
        assert_eq!(
            player.position,
            Vec2::new(LEVEL_WIDTH - PLAYER_HITBOX_RADIUS, LEVEL_HEIGHT - PLAYER_HITBOX_RADIUS)
        );
    }

    #[test]
    fn test_diagonal_movement_not_normalized() {
        let mut player = Player {
            position: Vec2::new(500.0, 500.0),
            ..Default::default()
        };
        update_player_position(&mut player, Direction::UP | Direction::RIGHT, &[]);
        assert_eq!(player.movement_delta, Vec2::new(6.0, -6.0));
        assert_eq!(player.position, Vec2::new(506.0, 494.0));
        assert_eq!(player.movement_direction, Direction::UP | Direction::RIGHT);
    }

    #[test]
    fn test_player_pushed_out_of_asteroid() {
        let field = vec![rock(500.0, 500.0, Vec2::ZERO)];
        let mut player = Player {
            position: Vec2::new(520.0, 500.0),
            ..Default::default()
        };
        update_player_position(&mut player, Direction::NONE, &field);
        assert!((player.position.distance(field[0].position) - (10.0 + PLAYER_HITBOX_RADIUS)).abs() < 1e-3);
        assert!(player.position.x > 520.0);
    }

    #[test]
    fn test_dash_without_movement_is_noop() {
        let mut player = Player::default();
        update_player_position(&mut player, Direction::NONE, &[]);
        let before = player.clone();

        let intent = Intent {
            dash: true,
            ..Default::default()
        };
        assert!(!try_dashing(&mut player, &intent));
        assert_eq!(player.dash_cooldown, before.dash_cooldown);
        assert_eq!(player.dash_delta, before.dash_delta);
        assert!(!player.is_invincible);
    }

    #[test]
    fn test_dash_invincibility_tracks_rounded_delta() {
        let mut player = Player {
            position: Vec2::new(768.0, 768.0),
            ..Default::default()
        };
        update_player_position(&mut player, Direction::RIGHT, &[]);

        let intent = Intent {
            movement: Direction::RIGHT,
            dash: true,
            ..Default::default()
        };
        assert!(try_dashing(&mut player, &intent));
        assert!(player.is_invincible);
        assert_eq!(player.dash_cooldown, PLAYER_DASH_COOLDOWN);
        assert!((player.dash_delta - Vec2::new(PLAYER_DASH_DISTANCE, 0.0)).length() < 1e-3);

        let mut frames = 0;
        loop {
            update_player_position(&mut player, Direction::NONE, &[]);
            frames += 1;
            let rounded_zero = player.dash_delta.round() == Vec2::ZERO;
            assert_eq!(player.is_invincible, !rounded_zero);
            if rounded_zero {
                break;
            }
            assert!(frames < 32);
        }
        // 128 halves to 0.25 on the ninth frame; 0.5 still rounds to 1
        assert_eq!(frames, 9);
        assert!(player.dash_delta.x > 0.0);

        update_player_position(&mut player, Direction::NONE, &[]);
        assert!(!player.is_invincible);
    }

    #[test]
    fn test_dash_blocked_by_cooldown() {
        let mut player = Player::default();
        update_player_position(&mut player, Direction::UP, &[]);
        player.dash_cooldown = 0.2;
        assert!(!try_dashing(&mut player, &Intent { dash: true, ..moving(Direction::UP) }));
        assert_eq!(player.dash_delta, Vec2::ZERO);
    }

    #[test]
    fn test_cooldowns_and_ready_flash() {
        let mut player = Player {
            fire_cooldown: 0.1,
            dash_cooldown: 0.02,
            ..Default::default()
        };

        assert!(!update_player_cooldowns(&mut player, 0.01));
        assert!((player.fire_cooldown - 0.09).abs() < 1e-6);

        assert!(update_player_cooldowns(&mut player, 0.05));
        assert_eq!(player.dash_cooldown, 0.0);
        assert_eq!(player.dash_reactivation_effect_alpha, DASH_READY_FLASH);

        // Glow decays at twice the clock rate; no second flash
        assert!(!update_player_cooldowns(&mut player, 0.1));
        assert!((player.dash_reactivation_effect_alpha - 0.3).abs() < 1e-6);
        assert_eq!(player.fire_cooldown, 0.0);
    }

    #[test]
    fn test_fire_spawns_shot_toward_cursor() {
        let mut state = GameState::empty(7);
        state.player.position = Vec2::new(500.0, 500.0);
        state.player.looking_direction = Vec2::X;

        let intent = Intent {
            fire: true,
            ..Default::default()
        };
        assert!(try_firing(&mut state, &intent));
        assert_eq!(state.player.fire_cooldown, PLAYER_FIRE_COOLDOWN);

        let (_, shot) = state.projectiles.iter_live().next().unwrap();
        assert_eq!(shot.origin, Vec2::new(535.0, 500.0));
        assert!((shot.delta - Vec2::new(30.0, 0.0)).length() < 1e-4);
        assert!((shot.angle - 90.0).abs() < 1e-4);
        assert!(!shot.is_hurtful_for_player);
        assert!(matches!(shot.shape, ProjectileShape::Squared { .. }));

        // Cooldown blocks the next shot
        assert!(!try_firing(&mut state, &intent));
        assert_eq!(state.projectiles.live_count(), 1);
    }

    #[test]
    fn test_fire_spread_stays_within_cone() {
        let mut state = GameState::empty(99);
        state.player.looking_direction = Vec2::NEG_Y;
        state.player.bullet_spread = 10;
        let intent = Intent {
            fire: true,
            ..Default::default()
        };

        for _ in 0..50 {
            state.player.fire_cooldown = 0.0;
            assert!(try_firing(&mut state, &intent));
        }
        for (_, shot) in state.projectiles.iter_live() {
            assert!(shot.angle >= -5.0 && shot.angle <= 5.0);
            assert_eq!(shot.angle.fract(), 0.0);
        }
    }

    #[test]
    fn test_fire_dropped_when_pool_full() {
        let mut state = GameState::empty(3);
        for slot in state.projectiles.slots_mut() {
            *slot = live_shot(Vec2::new(100.0, 100.0), Vec2::ZERO);
        }

        let intent = Intent {
            fire: true,
            ..Default::default()
        };
        assert!(!try_firing(&mut state, &intent));
        // Nothing consumed: the shot is retried as soon as a slot frees up
        assert_eq!(state.player.fire_cooldown, 0.0);
    }

    #[test]
    fn test_boss_faces_player_and_mirrors_hitboxes() {
        let mut boss = Boss::new(Vec2::new(768.0, 768.0));

        update_boss(&mut boss, Vec2::new(100.0, 768.0));
        assert_eq!(boss.horizontal_flip, -1.0);
        for (processed, local) in boss.processed_bounding_circles.iter().zip(&boss.bounding_circles) {
            assert_eq!(processed.center.x, 768.0 - local.center.x);
            assert_eq!(processed.center.y, 768.0 + local.center.y);
            assert_eq!(processed.radius, local.radius);
        }

        update_boss(&mut boss, Vec2::new(1400.0, 768.0));
        assert_eq!(boss.horizontal_flip, 1.0);
        assert_eq!(
            boss.processed_bounding_circles[0].center,
            Vec2::new(768.0, 768.0) + boss.bounding_circles[0].center
        );
    }

    #[test]
    fn test_boss_weapon_eases_toward_player() {
        let mut boss = Boss::new(Vec2::new(768.0, 768.0));
        let player = Vec2::new(1200.0, 1200.0);

        update_boss(&mut boss, player);
        let pivot = boss.position + boss.weapon_offset();
        let ideal = angle_between(pivot, player) - 90.0;
        assert!((boss.ideal_weapon_angle - ideal).abs() < 1e-4);
        assert!((boss.weapon_angle - ideal * BOSS_WEAPON_LERP_RATE).abs() < 1e-4);

        for _ in 0..200 {
            update_boss(&mut boss, player);
        }
        assert!((boss.weapon_angle - ideal).abs() < 1e-3);

        // Muzzle sits half a weapon length from the pivot, along the weapon
        let muzzle = boss.bullet_origin - pivot;
        let expected = Vec2::new(42.5, -6.0) * SPRITES_SCALE;
        assert!((muzzle.length() - expected.length()).abs() < 1e-2);
    }

    #[test]
    fn test_boss_left_facing_angle_corrected() {
        let mut boss = Boss::new(Vec2::new(768.0, 768.0));
        let player = Vec2::new(200.0, 900.0);
        update_boss(&mut boss, player);
        let pivot = boss.position + boss.weapon_offset();
        let ideal = angle_between(pivot, player) - 90.0 + 180.0;
        assert!((boss.ideal_weapon_angle - ideal).abs() < 1e-4);
    }

    #[test]
    fn test_trail_fades_and_frees() {
        let mut state = GameState::empty(1);
        state.player.looking_direction = Vec2::X;

        assert_eq!(capture_thruster_trail(&mut state, Thrusters::NONE), None);
        assert_eq!(capture_thruster_trail(&mut state, Thrusters::BOTTOM), Some(0));

        let trail = &state.trails.slots()[0];
        assert_eq!(trail.alpha, 1.0);
        assert!((trail.angle - 90.0).abs() < 1e-4);

        for _ in 0..4 {
            update_thruster_trails(&mut state.trails);
        }
        assert_eq!(state.trails.live_count(), 1);

        update_thruster_trails(&mut state.trails);
        update_thruster_trails(&mut state.trails);
        assert_eq!(state.trails.free_count(), THRUSTER_TRAILS_MAX);
    }

    #[test]
    fn test_trail_pool_exhaustion_is_silent() {
        let mut state = GameState::empty(1);
        for i in 0..THRUSTER_TRAILS_MAX {
            assert_eq!(capture_thruster_trail(&mut state, Thrusters::TOP), Some(i));
        }
        assert_eq!(capture_thruster_trail(&mut state, Thrusters::TOP), None);
    }

    #[test]
    fn test_tick_orders_dash_after_movement() {
        let mut state = GameState::empty(11);
        let settings = Settings::default();
        let input = RawInput {
            keys_down: [KeyCode::F].into_iter().collect(),
            dash_pressed: true,
            ..Default::default()
        };

        let start = state.player.position;
        let report = tick(&mut state, &input, &settings, DT);

        assert!(report.events.contains(&GameEvent::Dashed));
        assert!(state.player.is_invincible);
        // Moved by the keyboard this frame; the dash displacement starts next frame
        assert_eq!(state.player.position, start + Vec2::new(PLAYER_MOVEMENT_SPEED, 0.0));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_minimized_window_keeps_aim_and_shots_finite() {
        let settings = Settings::default();
        let mut state = GameState::empty(11);
        let aim = RawInput {
            mouse_delta: Vec2::new(0.0, -40.0),
            ..Default::default()
        };
        tick(&mut state, &aim, &settings, DT);

        let minimized = RawInput {
            fire_down: true,
            window_size: Vec2::ZERO,
            ..Default::default()
        };
        assert!(tick(&mut state, &minimized, &settings, DT).events.contains(&GameEvent::ShotFired));

        assert!(state.camera.zoom > 0.0);
        assert!(state.cursor.world.is_finite());
        assert!(state.player.looking_direction.is_finite());
        let (_, shot) = state.projectiles.iter_live().next().unwrap();
        assert!(shot.delta.is_finite() && shot.delta.length() > 0.0);
    }

    #[test]
    fn test_tick_determinism() {
        let settings = Settings::default();
        let mut a = GameState::new(2024);
        let mut b = GameState::new(2024);
        let input = RawInput {
            keys_down: [KeyCode::E, KeyCode::S].into_iter().collect(),
            fire_down: true,
            mouse_delta: Vec2::new(3.0, -1.0),
            ..Default::default()
        };

        for _ in 0..120 {
            tick(&mut a, &input, &settings, DT);
            tick(&mut b, &input, &settings, DT);
        }

        assert_eq!(a.player.position, b.player.position);
        assert_eq!(a.projectiles.live_count(), b.projectiles.live_count());
        for (x, y) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(x.position, y.position);
        }
    }
}
