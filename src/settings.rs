//! Game settings
//!
//! Read once at startup from a JSON file; never written back.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_FRAME_RATE;
use crate::error::SettingsError;

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "BATTLE_CITY_SETTINGS";
/// Settings file looked up in the working directory
pub const SETTINGS_FILE: &str = "battle_city.json";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Gameplay ===
    /// Spawn coins on the field while playing
    pub coin_generation: bool,
    /// RNG seed; derived from the clock when absent
    pub seed: Option<u64>,
    /// Updates per second
    pub frame_rate: u32,

    // === Headless demo ===
    /// Frames the native demo runs before quitting
    pub demo_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            coin_generation: true,
            seed: None,
            frame_rate: DEFAULT_FRAME_RATE,

            demo_frames: 900,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Read settings from a file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Path to read settings from: `$BATTLE_CITY_SETTINGS`, else
    /// `battle_city.json` if it exists
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(SETTINGS_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(SETTINGS_FILE);
        local.exists().then_some(local)
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Clamp out-of-range values
    pub fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.frame_rate = self.frame_rate.clamp(1, 240);
        self
    }

    /// Seed to use for this run
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
