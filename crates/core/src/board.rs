//! Board module - manages the game grid
//!
//! The board is a 10x20 playable grid plus one sentinel floor row underneath.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where row ranges 0..=20 (20 is the floor) and col
//! ranges 0..9. Any coordinate outside the stored grid reads as `Border`, which
//! gives the side walls and the ceiling without storing them.

use crate::pieces::Piece;
use crate::snapshot::{BoardSnapshot, DisplayCell};
use crate::types::{CellValue, BOARD_HEIGHT, BOARD_WIDTH};

/// Rows stored in the grid: playable rows plus the floor sentinel
pub const GRID_ROWS: usize = BOARD_HEIGHT as usize + 1;

/// Columns stored in the grid
pub const GRID_COLS: usize = BOARD_WIDTH as usize;

/// Row index of the floor sentinel
pub const FLOOR_ROW: i16 = BOARD_HEIGHT as i16;

const GRID_SIZE: usize = GRID_ROWS * GRID_COLS;

/// The game board with an explicit floor sentinel row
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [CellValue; GRID_SIZE],
}

impl Board {
    /// Create a new empty board with its floor in place
    pub fn new() -> Self {
        let mut cells = [CellValue::Empty; GRID_SIZE];
        let floor = FLOOR_ROW as usize * GRID_COLS;
        cells[floor..].fill(CellValue::Border);
        Self { cells }
    }

    /// Flat index for a stored coordinate
    #[inline(always)]
    fn index(row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= GRID_ROWS as i16 || col < 0 || col >= GRID_COLS as i16 {
            return None;
        }
        Some(row as usize * GRID_COLS + col as usize)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Playable height (the floor row is not counted)
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Read a cell. Out-of-range coordinates read as `Border`.
    pub fn get(&self, row: i16, col: i16) -> CellValue {
        match Self::index(row, col) {
            Some(idx) => self.cells[idx],
            None => CellValue::Border,
        }
    }

    /// Write a cell.
    ///
    /// Returns false without touching the grid if the target is a `Border`
    /// cell (floor or outside) or if `value` itself is `Border`.
    pub fn set(&mut self, row: i16, col: i16, value: CellValue) -> bool {
        if value == CellValue::Border {
            return false;
        }
        let Some(idx) = Self::index(row, col) else {
            return false;
        };
        if self.cells[idx] == CellValue::Border {
            return false;
        }
        self.cells[idx] = value;
        true
    }

    /// True if a piece block may occupy this cell
    pub fn is_free(&self, row: i16, col: i16) -> bool {
        !self.get(row, col).is_blocking()
    }

    /// Check if a playable row is entirely `Locked`
    pub fn line_is_full(&self, row: i16) -> bool {
        if row < 0 || row >= FLOOR_ROW {
            return false;
        }
        self.row(row as usize).iter().all(|c| c.is_locked())
    }

    /// Remove every full row, shifting the rows above it down.
    ///
    /// Each removed row is replaced by an empty row at the top. The floor row
    /// is never touched. Returns the number of rows removed.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut cleared = 0u32;
        let mut write_row = FLOOR_ROW as usize;

        // Two-pointer compaction, bottom to top.
        for read_row in (0..FLOOR_ROW as usize).rev() {
            if self.line_is_full(read_row as i16) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * GRID_COLS;
                self.cells
                    .copy_within(src..src + GRID_COLS, write_row * GRID_COLS);
            }
        }

        self.cells[..write_row * GRID_COLS].fill(CellValue::Empty);
        cleared
    }

    /// Reset every `Active` cell to `Empty`
    pub fn clear_active_cells(&mut self) {
        for cell in self.cells.iter_mut() {
            if matches!(cell, CellValue::Active(_)) {
                *cell = CellValue::Empty;
            }
        }
    }

    /// Paint the falling piece as `Active` on the cells it covers.
    ///
    /// Only `Empty` cells are painted; locked cells and borders win.
    pub fn draw_active(&mut self, piece: &Piece) {
        let color = piece.color();
        for &(row, col) in piece.blocks() {
            if self.get(row, col) == CellValue::Empty {
                self.set(row, col, CellValue::Active(color));
            }
        }
    }

    /// Write every block of `piece` as `Locked`. Writing twice is harmless.
    pub fn lock(&mut self, piece: &Piece) {
        let color = piece.color();
        for &(row, col) in piece.blocks() {
            self.set(row, col, CellValue::Locked(color));
        }
    }

    /// Display grid covering all stored rows, floor included
    pub fn render_snapshot(&self) -> BoardSnapshot {
        let mut out = [[DisplayCell::Empty; GRID_COLS]; GRID_ROWS];
        self.write_snapshot(&mut out);
        out
    }

    /// Allocation-free variant of [`Board::render_snapshot`]
    pub fn write_snapshot(&self, out: &mut BoardSnapshot) {
        for (r, out_row) in out.iter_mut().enumerate() {
            for (c, slot) in out_row.iter_mut().enumerate() {
                *slot = DisplayCell::from(self.cells[r * GRID_COLS + c]);
            }
        }
    }

    /// Number of `Locked` cells on the board
    pub fn locked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_locked()).count()
    }

    /// Reset the playable area to empty, keeping the floor
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn row(&self, row: usize) -> &[CellValue] {
        let start = row * GRID_COLS;
        &self.cells[start..start + GRID_COLS]
    }

    /// Build a board from text art, bottom-aligned above the floor.
    ///
    /// `#` is a locked cell (color 1), `.` or space is empty. Rows shorter
    /// than the board are padded with empty cells.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::new();
        for (i, line) in rows.iter().rev().take(FLOOR_ROW as usize).enumerate() {
            let row = FLOOR_ROW - 1 - i as i16;
            for (col, ch) in line.chars().take(GRID_COLS).enumerate() {
                if ch == '#' {
                    board.set(row, col as i16, CellValue::Locked(1));
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
