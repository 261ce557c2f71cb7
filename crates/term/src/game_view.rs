//! GameView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::board::{GRID_COLS, GRID_ROWS};
use crate::core::{DisplayCell, SessionSnapshot, Shape};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_MIN_WIDTH: u16 = 12;
/// Largest cell scale in either axis
const MAX_CELL_SIZE: u16 = 4;

/// Where the playfield landed inside the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Left wall column
    pub x: u16,
    /// Top wall row
    pub y: u16,
    /// Walls included
    pub width: u16,
    /// Top wall plus every grid row, floor included
    pub height: u16,
}

/// Terminal renderer for one session.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_SIZE),
            cell_h: cell_h.clamp(1, MAX_CELL_SIZE),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> Layout {
        let width = GRID_COLS as u16 * self.cell_w + 2;
        let height = GRID_ROWS as u16 * self.cell_h + 1;
        let x = viewport.width.saturating_sub(width) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(height) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            x,
            y,
            width,
            height,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Callers reuse one framebuffer across frames; nothing here allocates
    /// unless the viewport grew.
    pub fn render_into(&self, snap: &SessionSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::new(' ', CellStyle::plain(Rgb::new(220, 220, 220), SCREEN_BG)));

        let layout = self.layout(viewport);
        self.draw_walls(fb, layout);

        for (row, cells) in snap.board.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let (ch, style) = cell_look(*cell);
                self.fill_cell(fb, layout, row as u16, col as u16, ch, style);
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            self.draw_game_over(fb, layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Top wall and side walls. The floor is part of the grid itself.
    fn draw_walls(&self, fb: &mut FrameBuffer, layout: Layout) {
        let style = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
        let right = layout.x.saturating_add(layout.width - 1);

        fb.put_char(layout.x, layout.y, '┌', style);
        fb.put_char(right, layout.y, '┐', style);
        for dx in 1..layout.width - 1 {
            fb.put_char(layout.x.saturating_add(dx), layout.y, '─', style);
        }

        let floor_top = layout
            .y
            .saturating_add(1 + (GRID_ROWS as u16 - 1) * self.cell_h);
        for dy in 1..layout.height {
            let y = layout.y.saturating_add(dy);
            let ch = if y >= floor_top { '▀' } else { '│' };
            fb.put_char(layout.x, y, ch, style);
            fb.put_char(right, y, ch, style);
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        row: u16,
        col: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.x.saturating_add(1 + col * self.cell_w);
        let py = layout.y.saturating_add(1 + row * self.cell_h);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout.x.saturating_add(layout.width).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = layout.y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("HIGH", snap.highscore),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, &Shape::canonical(snap.next));
        y = y.saturating_add(3);

        let hint = value.dim();
        for line in ["←→ move", "↑ x rotate", "z rotate ccw", "↓ drop", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    /// Next shape in block form; offsets span columns -1..=2 and rows 0..=1.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, shape: &Shape) {
        let style = block_style(shape.color(), true);
        for &(dr, dc) in shape.offsets() {
            let px = x.saturating_add((dc + 1) as u16 * self.cell_w);
            let py = y.saturating_add(dr as u16);
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: Layout) {
        let mid_y = layout.y.saturating_add(layout.height / 2);
        let style = CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        self.put_centered(fb, layout, mid_y, "GAME OVER", style);
        self.put_centered(fb, layout, mid_y.saturating_add(2), "r restart", style.dim());
        self.put_centered(fb, layout, mid_y.saturating_add(3), "q quit", style.dim());
    }

    fn put_centered(&self, fb: &mut FrameBuffer, layout: Layout, y: u16, text: &str, style: CellStyle) {
        let text_w = text.chars().count() as u16;
        let x = layout.x.saturating_add(layout.width.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}

fn block_style(color: u8, bold: bool) -> CellStyle {
    CellStyle {
        fg: Rgb::for_color_id(color),
        bg: PLAY_BG,
        bold,
        dim: false,
    }
}

fn cell_look(cell: DisplayCell) -> (char, CellStyle) {
    match cell {
        DisplayCell::Empty => (
            cell.glyph(),
            CellStyle::plain(Rgb::new(90, 90, 100), PLAY_BG).dim(),
        ),
        DisplayCell::Falling(c) => (cell.glyph(), block_style(c, true)),
        DisplayCell::Locked(c) => (cell.glyph(), block_style(c, false)),
        DisplayCell::Border => (
            cell.glyph(),
            CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG),
        ),
    }
}
