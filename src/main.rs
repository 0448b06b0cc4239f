//! Stribun entry point
//!
//! Native headless runner: loads settings, plays a scripted input sequence
//! against the simulation, records the draw calls and sound cues a real
//! platform layer would receive, and logs a summary.
//!
//! Usage: `stribun [settings.json] [frames]`

use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use stribun::audio::{AudioManager, CueRecorder, SoundCue};
use stribun::renderer::{DrawList, Renderer};
use stribun::settings::Settings;
use stribun::sim::{GameState, KeyCode, RawInput, tick};

/// Fixed frame time of the conceptual 60 Hz loop
const FRAME_DT: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u64 = 600;
const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Game instance holding all state
struct Game {
    state: GameState,
    settings: Settings,
    renderer: Renderer,
    audio: AudioManager,
    sound: CueRecorder,
    draws: DrawList,
    draw_calls: usize,
    shader_reloads: u32,
}

impl Game {
    fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(clock_seed);
        Self {
            state: GameState::new(seed),
            renderer: Renderer::new(&settings),
            audio: AudioManager::from_settings(&settings),
            settings,
            sound: CueRecorder::default(),
            draws: DrawList::new(),
            draw_calls: 0,
            shader_reloads: 0,
        }
    }

    /// Simulate and render one frame
    fn frame(&mut self, input: &RawInput, dt: f32) {
        let dt = dt.min(0.1);

        let report = tick(&mut self.state, input, &self.settings, dt);
        self.audio.play_events(&mut self.sound, &report.events);
        if report.reload_shaders {
            self.shader_reloads += 1;
            log::info!("Shader reload requested (frame {})", self.state.frame);
        }

        self.draws.reset();
        self.renderer.render_frame(&mut self.state, &mut self.draws);
        self.draw_calls += self.draws.len();
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Deterministic stand-in for a player: circles the arena, sweeps the aim,
/// fires in bursts and dashes every second and a half
fn scripted_input(frame: u64, settings: &Settings) -> RawInput {
    let keys = settings.key_bindings;
    let phase = (frame / 45) % 4;
    let held = match phase {
        0 => [keys.up, keys.right],
        1 => [keys.right, keys.down],
        2 => [keys.down, keys.left],
        _ => [keys.left, keys.up],
    };

    let sweep = frame as f32 * 0.05;
    let mut input = RawInput {
        keys_down: held.into_iter().collect(),
        mouse_delta: Vec2::new(sweep.cos(), sweep.sin()) * 12.0,
        fire_down: (frame / 30) % 2 == 0,
        dash_pressed: frame % 90 == 45,
        ..Default::default()
    };
    if frame == 300 {
        input.keys_pressed.insert(KeyCode::R);
    }
    input
}

fn main() {
    env_logger::init();
    log::info!("Stribun (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Invalid frame count: {e}; running {DEFAULT_FRAMES} frames");
            DEFAULT_FRAMES
        }
        None => DEFAULT_FRAMES,
    };

    let settings = Settings::load(&settings_path);
    let mut game = Game::new(settings);

    log::info!(
        "Allocating {} off-screen targets",
        Renderer::offscreen_targets().len()
    );

    for frame in 0..frames {
        let input = scripted_input(frame, &game.settings);
        game.frame(&input, FRAME_DT);
    }

    let state = &game.state;
    log::info!(
        "Ran {} frames ({:.1}s simulated), seed {}",
        state.frame,
        state.time,
        state.seed
    );
    log::info!(
        "Player at ({:.0}, {:.0}), {} shots in flight, boss health {}",
        state.player.position.x,
        state.player.position.y,
        state.projectiles.live_count(),
        state.boss.health
    );
    log::info!(
        "{} shots and {} dashes heard, {} draw calls, {} shader reloads",
        game.sound.count(SoundCue::PlayerShot),
        game.sound.count(SoundCue::Dash),
        game.draw_calls,
        game.shader_reloads
    );
}
