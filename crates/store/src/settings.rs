//! Player settings stored as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Highest level a game may start at
pub const MAX_START_LEVEL: u32 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub start_level: u32,
    /// Minimum spacing between two applications of the same action
    pub debounce_ms: u32,
    /// Terminal columns per board cell
    pub cell_width: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_level: 0,
            debounce_ms: 90,
            cell_width: 2,
        }
    }
}

impl Settings {
    pub fn sanitized(mut self) -> Self {
        self.start_level = self.start_level.min(MAX_START_LEVEL);
        self.debounce_ms = self.debounce_ms.min(1000);
        self.cell_width = self.cell_width.clamp(1, 4);
        self
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `BLOCKFALL_SETTINGS_PATH` if set, else `settings.json` in the config dir
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("BLOCKFALL_SETTINGS_PATH") {
            return Self::new(explicit);
        }
        Self::new(crate::config_dir().join("settings.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings; a missing or invalid file yields the defaults.
    pub fn load(&self) -> Settings {
        let Ok(bytes) = fs::read(&self.path) else {
            return Settings::default();
        };
        match serde_json::from_slice::<Settings>(&bytes) {
            Ok(settings) => settings.sanitized(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "invalid settings, using defaults");
                Settings::default()
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, text).with_context(|| format!("writing {}", self.path.display()))
    }
}
