//! Game settings
//!
//! Stored as JSON next to the binary. A missing or malformed file is never
//! fatal: the defaults below match the constants in [`crate::consts`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Rules ===
    /// Lives at the start of every round
    pub starting_lives: u32,
    /// Run seed for the power-up and particle RNG
    pub seed: u64,

    // === Resources ===
    /// Directory holding the level files
    pub level_dir: PathBuf,
    /// Level files in play order
    pub level_files: Vec<String>,
    /// Root for textures, shaders and audio
    pub resource_dir: PathBuf,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            starting_lives: STARTING_LIVES,
            seed: 0x00B1_0C4B,

            level_dir: PathBuf::from("levels"),
            level_files: ["one", "two", "three", "four", "five"]
                .iter()
                .map(|name| format!("{name}.level"))
                .collect(),
            resource_dir: PathBuf::from("res"),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn try_load(path: &Path) -> Result<Self, GameError> {
        let json = std::fs::read_to_string(path).map_err(|source| GameError::ResourceMissing {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read settings, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(GameError::ResourceMissing { .. }) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| GameError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| GameError::ResourceMissing {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Full paths of the level files, in play order
    pub fn level_paths(&self) -> Vec<PathBuf> {
        self.level_files
            .iter()
            .map(|file| self.level_dir.join(file))
            .collect()
    }

    /// Height of the block area for level `index`. The last level packs its
    /// blocks deeper.
    pub fn level_height(&self, index: usize) -> f32 {
        if index + 1 == self.level_files.len() {
            self.screen_height / 1.3
        } else {
            self.screen_height / 2.0
        }
    }
}
