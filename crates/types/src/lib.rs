//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the input mapper and the terminal view alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 playable rows (indexed 0-19)
//! - **Floor**: one sentinel row at index 20
//! - **Spawn position**: row 0, column 4
//!
//! Coordinates are `(row, col)`, rows grow downward.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Longest input poll between redraws |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 0 |
//! | `LEVEL_SPEEDUP_MS` | 75 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity interval floor |
//! | `DEFAULT_DEBOUNCE_MS` | 90 | Minimum spacing of one repeated action |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Action, CellValue, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::T.color(), 3);
//!
//! assert!(CellValue::Locked(3).is_blocking());
//! assert!(!CellValue::Active(3).is_blocking());
//!
//! assert_eq!(Action::default(), Action::None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Playable board height in cells (20 rows). The floor sentinel sits below.
pub const BOARD_HEIGHT: u8 = 20;

/// Column of the piece origin on spawn (horizontally centered)
pub const SPAWN_COL: i16 = (BOARD_WIDTH as i16) / 2 - 1;

/// Row of the piece origin on spawn
pub const SPAWN_ROW: i16 = 0;

/// Longest the binary blocks on input before it redraws (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level
pub const LEVEL_SPEEDUP_MS: u32 = 75;

/// Gravity interval floor
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Default window in which a repeated action is applied at most once
pub const DEFAULT_DEBOUNCE_MS: u32 = 90;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (classic scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Color id carried by active and locked cells (1..=7, one per shape kind)
pub type ColorId = u8;

/// State of a single board cell
///
/// Only `Empty` and `Locked` persist between ticks. `Active` cells belong to
/// the falling piece and are wiped before each redraw. `Border` marks the
/// floor row and anything outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Active(ColorId),
    Locked(ColorId),
    Border,
}

impl CellValue {
    /// True for cells a piece may never move into (`Locked` or `Border`)
    pub fn is_blocking(&self) -> bool {
        matches!(self, CellValue::Locked(_) | CellValue::Border)
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, CellValue::Locked(_))
    }

    pub fn color(&self) -> Option<ColorId> {
        match self {
            CellValue::Active(c) | CellValue::Locked(c) => Some(*c),
            CellValue::Empty | CellValue::Border => None,
        }
    }
}

/// The seven tetromino shape kinds
///
/// Each kind has a fixed color id:
/// - **I**: 1 (cyan)
/// - **O**: 2 (yellow)
/// - **T**: 3 (magenta)
/// - **S**: 4 (green)
/// - **Z**: 5 (red)
/// - **J**: 6 (blue)
/// - **L**: 7 (orange)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// All kinds in bag order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Position of this kind in [`ShapeKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::O => 1,
            ShapeKind::T => 2,
            ShapeKind::S => 3,
            ShapeKind::Z => 4,
            ShapeKind::J => 5,
            ShapeKind::L => 6,
        }
    }

    pub fn color(&self) -> ColorId {
        (self.index() + 1) as ColorId
    }
}

/// Rotation sense for a 90° turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

/// Translation direction for a one-cell move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// `(row, col)` delta of a one-cell move
    pub fn delta(&self) -> (i16, i16) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
        }
    }
}

/// Discrete player actions accepted by the session
///
/// Anything the input layer does not recognize maps to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// No input this poll
    #[default]
    None,
}

impl Action {
    /// Number of distinct actions, used to size per-action tables
    pub const COUNT: usize = 6;

    /// Dense index for per-action bookkeeping
    pub fn index(&self) -> usize {
        match self {
            Action::MoveLeft => 0,
            Action::MoveRight => 1,
            Action::SoftDrop => 2,
            Action::RotateCw => 3,
            Action::RotateCcw => 4,
            Action::None => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(BASE_DROP_MS, 1000);
        assert!(DROP_INTERVAL_MIN_MS < BASE_DROP_MS);
        assert_eq!(LINES_PER_LEVEL, 10);
        assert_eq!(LINE_SCORES, [0, 40, 100, 300, 1200]);
    }

    #[test]
    fn spawn_column_is_centered() {
        assert_eq!(SPAWN_COL, 4);
    }

    #[test]
    fn shape_kind_indices_and_colors() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(kind.color() as usize, i + 1);
        }
    }

    #[test]
    fn cell_blocking() {
        assert!(!CellValue::Empty.is_blocking());
        assert!(!CellValue::Active(1).is_blocking());
        assert!(CellValue::Locked(1).is_blocking());
        assert!(CellValue::Border.is_blocking());
        assert_eq!(CellValue::Locked(4).color(), Some(4));
        assert_eq!(CellValue::Border.color(), None);
    }

    #[test]
    fn action_indices_are_dense() {
        let all = [
            Action::MoveLeft,
            Action::MoveRight,
            Action::SoftDrop,
            Action::RotateCw,
            Action::RotateCcw,
            Action::None,
        ];
        let mut seen = [false; Action::COUNT];
        for a in all {
            assert!(!seen[a.index()], "{a:?}");
            seen[a.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn direction_deltas() {
        assert_eq!(Direction::Left.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (0, 1));
        assert_eq!(Direction::Down.delta(), (1, 0));
    }
}
