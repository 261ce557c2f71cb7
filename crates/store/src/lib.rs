//! Persistence for the terminal game: a one-line highscore file and an
//! optional JSON settings file.
//!
//! Neither file is required. Missing or unreadable files fall back to
//! defaults (score 0, default settings) and never stop the game from starting.

pub mod highscore;
pub mod settings;

pub use highscore::{parse_highscore, HighscoreStore};
pub use settings::{Settings, SettingsStore};

use std::path::PathBuf;

/// Directory holding the game's files.
///
/// `$XDG_CONFIG_HOME/blockfall`, else `$HOME/.config/blockfall`, else `./blockfall`.
pub fn config_dir() -> PathBuf {
    let mut base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|home| {
                let mut p = PathBuf::from(home);
                p.push(".config");
                p
            })
        })
        .unwrap_or_else(|| PathBuf::from("."));
    base.push("blockfall");
    base
}
