//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. The board is stored floor-first,
//! so board row `y` lands on screen row `BOARD_HEIGHT - 1 - y`.

use crate::core::shapes::base_shape;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameMode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

const PLAY_BG: Rgb = Rgb::new(15, 23, 42);
const GRID_FG: Rgb = Rgb::new(51, 65, 85);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Screen origin of the board frame (top-left border corner).
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer (reused across frames).
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(SCREEN_BG, SCREEN_BG).cell(' '));

        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_HEIGHT as u16) * self.cell_h + 2;
        let layout = Layout {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        };

        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(GRID_FG, PLAY_BG),
        );
        draw_border(fb, layout, CellStyle::new(Rgb::new(148, 163, 184), SCREEN_BG));

        for y in 0..BOARD_HEIGHT {
            let progress = snap.clearing_progress(y);
            for x in 0..BOARD_WIDTH {
                match snap.board[y as usize][x as usize] {
                    Some(occupant) => {
                        self.draw_block(fb, layout, x, y, occupant.kind, progress.unwrap_or(0.0));
                    }
                    None => {
                        let dot = CellStyle::new(GRID_FG, PLAY_BG).dim();
                        self.fill_board_cell(fb, layout, x, y, '·', dot);
                    }
                }
            }
        }

        if let Some(active) = snap.active {
            for &(x, y) in active.cells.iter() {
                // Cells above the top row are not drawn.
                if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
                    continue;
                }
                self.draw_block(fb, layout, x as u8, y as u8, active.kind, 0.0);
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        match snap.mode {
            GameMode::NotStarted => draw_overlay(fb, layout, &["VOXEL TETRIS", "PRESS ENTER"]),
            GameMode::Paused => draw_overlay(fb, layout, &["PAUSED"]),
            GameMode::GameOver => draw_overlay(fb, layout, &["GAME OVER", "R TO RESTART"]),
            GameMode::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Screen position of the top-left character of a board cell.
    fn cell_origin(&self, layout: Layout, x: u8, y: u8) -> (u16, u16) {
        let screen_row = (BOARD_HEIGHT - 1 - y) as u16;
        (
            layout.x + 1 + x as u16 * self.cell_w,
            layout.y + 1 + screen_row * self.cell_h,
        )
    }

    fn fill_board_cell(&self, fb: &mut FrameBuffer, layout: Layout, x: u8, y: u8, ch: char, style: CellStyle) {
        let (px, py) = self.cell_origin(layout, x, y);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// A block that shrinks and fades toward the background while its row clears.
    fn draw_block(&self, fb: &mut FrameBuffer, layout: Layout, x: u8, y: u8, kind: PieceKind, progress: f32) {
        let color = Rgb::from_hex(kind.color()).mix(PLAY_BG, progress * 0.8);
        let ch = if progress <= 0.0 {
            '█'
        } else if progress < 0.34 {
            '▓'
        } else if progress < 0.67 {
            '▒'
        } else {
            '░'
        };
        let mut style = CellStyle::new(color, PLAY_BG);
        if progress <= 0.0 {
            style = style.bold();
        }
        self.fill_board_cell(fb, layout, x, y, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, layout: Layout) {
        let panel_x = layout.x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::new(Rgb::new(226, 232, 240), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(203, 213, 225), SCREEN_BG);

        let mut y = layout.y;
        for (name, v) in [("SCORE", snap.score), ("LINES", snap.lines), ("LEVEL", snap.level)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        draw_preview(fb, panel_x, y, snap.next);
        y = y.saturating_add(3);

        if snap.soft_drop && snap.mode == GameMode::Running {
            fb.put_str(panel_x, y, "SOFT DROP", value.dim());
        }
    }
}

/// Draw a piece's base shape in a 4x2 box (two columns per cell).
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
    let style = CellStyle::new(Rgb::from_hex(kind.color()), SCREEN_BG);
    for &(dx, dy) in base_shape(kind).iter() {
        // Offsets span x in -2..=1 and y in 0..=1; row 1 is drawn on top.
        let col = x + ((dx + 2) as u16) * 2;
        let row = y + (1 - dy) as u16;
        fb.put_str(col, row, "██", style);
    }
}

fn draw_border(fb: &mut FrameBuffer, l: Layout, style: CellStyle) {
    let (x, y, w, h) = (l.x, l.y, l.frame_w, l.frame_h);
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// Centered lines over the middle of the board.
fn draw_overlay(fb: &mut FrameBuffer, l: Layout, lines: &[&str]) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    let top = (l.y + l.frame_h / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, text) in lines.iter().enumerate() {
        let text_w = text.chars().count() as u16;
        let x = l.x.saturating_add(l.frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, top + i as u16, text, style);
    }
}
