//! Read-only views handed to renderers.

use crate::board::{GRID_COLS, GRID_ROWS};
use crate::session::Phase;
use crate::types::{CellValue, ColorId, ShapeKind};

/// Display form of one board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayCell {
    #[default]
    Empty,
    Falling(ColorId),
    Locked(ColorId),
    Border,
}

impl DisplayCell {
    /// Falling and locked blocks share a glyph; color tells them apart.
    pub fn glyph(&self) -> char {
        match self {
            DisplayCell::Empty => '·',
            DisplayCell::Falling(_) | DisplayCell::Locked(_) => '█',
            DisplayCell::Border => '▀',
        }
    }

    pub fn color(&self) -> Option<ColorId> {
        match self {
            DisplayCell::Falling(c) | DisplayCell::Locked(c) => Some(*c),
            DisplayCell::Empty | DisplayCell::Border => None,
        }
    }
}

impl From<CellValue> for DisplayCell {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Empty => DisplayCell::Empty,
            CellValue::Active(c) => DisplayCell::Falling(c),
            CellValue::Locked(c) => DisplayCell::Locked(c),
            CellValue::Border => DisplayCell::Border,
        }
    }
}

/// Every stored row, floor included
pub type BoardSnapshot = [[DisplayCell; GRID_COLS]; GRID_ROWS];

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSnapshot {
    pub board: BoardSnapshot,
    pub next: ShapeKind,
    pub phase: Phase,
    pub game_over: bool,
    pub score: u32,
    pub highscore: u32,
    pub level: u32,
    pub lines: u32,
}

impl SessionSnapshot {
    pub fn falling_cells(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|c| matches!(c, DisplayCell::Falling(_)))
            .count()
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            board: [[DisplayCell::Empty; GRID_COLS]; GRID_ROWS],
            next: ShapeKind::I,
            phase: Phase::Spawning,
            game_over: false,
            score: 0,
            highscore: 0,
            level: 0,
            lines: 0,
        }
    }
}
