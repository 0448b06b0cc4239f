//! Sound cue mixing
//!
//! The game only ever fires one-shot cues. Decoding and playback belong to the
//! platform, reached through [`AudioSink`]; this module decides which cue a
//! game event triggers and how loud it plays.

use crate::settings::Settings;
use crate::sim::state::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player dash
    Dash,
    /// Player weapon shot
    PlayerShot,
}

impl SoundCue {
    /// Volume the cue is authored to play at, before mixing
    pub fn base_volume(self) -> f32 {
        match self {
            SoundCue::Dash => 0.3,
            SoundCue::PlayerShot => 0.2,
        }
    }

    /// Cue a game event triggers, if any
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Dashed => Some(SoundCue::Dash),
            GameEvent::ShotFired => Some(SoundCue::PlayerShot),
            GameEvent::DashReady => None,
        }
    }
}

/// Platform playback backend
pub trait AudioSink {
    /// Start a cue at `volume` (0.0 - 1.0). Never blocks.
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue through `sink`, scaled by the mixer
    pub fn play(&self, sink: &mut impl AudioSink, cue: SoundCue) {
        let vol = self.effective_volume() * cue.base_volume();
        if vol <= 0.0 {
            return;
        }
        sink.play(cue, vol);
    }

    /// Play every cue the given events trigger, in order. Returns how many played.
    pub fn play_events(&self, sink: &mut impl AudioSink, events: &[GameEvent]) -> usize {
        let mut played = 0;
        for cue in events.iter().copied().filter_map(SoundCue::for_event) {
            if self.effective_volume() > 0.0 {
                played += 1;
            }
            self.play(sink, cue);
        }
        played
    }
}

/// Sink that remembers what it was asked to play
#[derive(Debug, Clone, Default)]
pub struct CueRecorder {
    pub played: Vec<(SoundCue, f32)>,
}

impl CueRecorder {
    pub fn count(&self, cue: SoundCue) -> usize {
        self.played.iter().filter(|(c, _)| *c == cue).count()
    }
}

impl AudioSink for CueRecorder {
    fn play(&mut self, cue: SoundCue, volume: f32) {
        self.played.push((cue, volume));
    }
}
