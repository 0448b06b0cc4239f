//! Player settings and key bindings
//!
//! Stored as JSON next to the binary. A missing or unreadable file is never
//! fatal: the game falls back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::input::KeyCode;

/// Keyboard layout for movement and debug actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    /// Recompile shader programs
    pub reload_shaders: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        // ESDF: the home row under the left hand
        Self {
            up: KeyCode::E,
            down: KeyCode::D,
            left: KeyCode::S,
            right: KeyCode::F,
            reload_shaders: KeyCode::R,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Multiplier on captured mouse motion
    pub mouse_sensitivity: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Controls ===
    pub key_bindings: KeyBindings,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    /// Fixed run seed; `None` lets the binary pick one
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.7,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            key_bindings: KeyBindings::default(),

            show_fps: true,

            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, using defaults if it is missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings from {}: {e}; using defaults", path.display());
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {e}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Mouse sensitivity with nonsense values (negative, NaN) replaced by the default
    pub fn effective_mouse_sensitivity(&self) -> f32 {
        if self.mouse_sensitivity.is_finite() && self.mouse_sensitivity >= 0.0 {
            self.mouse_sensitivity
        } else {
            Self::default().mouse_sensitivity
        }
    }
}
