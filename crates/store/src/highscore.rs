//! Highscore file: a single non-negative integer on one line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Parse highscore file contents. Surrounding whitespace is ignored.
pub fn parse_highscore(text: &str) -> Result<u32> {
    let line = text.lines().next().unwrap_or("").trim();
    line.parse::<u32>()
        .with_context(|| format!("corrupt highscore {line:?}"))
}

#[derive(Debug, Clone)]
pub struct HighscoreStore {
    path: PathBuf,
}

impl HighscoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `BLOCKFALL_HIGHSCORE_PATH` if set, else `highscore.txt` in the config dir
    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("BLOCKFALL_HIGHSCORE_PATH") {
            return Self::new(explicit);
        }
        Self::new(crate::config_dir().join("highscore.txt"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored highscore. Missing or corrupt files read as 0.
    pub fn load(&self) -> u32 {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) => {
                debug!(path = %self.path.display(), %err, "no highscore file");
                return 0;
            }
        };
        parse_highscore(&text).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), "{err:#}, using 0");
            0
        })
    }

    pub fn save(&self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        fs::write(&self.path, format!("{score}\n"))
            .with_context(|| format!("writing {}", self.path.display()))
    }

    /// Save `score` if it beats the stored one. Returns whether it did.
    pub fn record(&self, score: u32) -> Result<bool> {
        if score <= self.load() {
            return Ok(false);
        }
        self.save(score)?;
        Ok(true)
    }
}
