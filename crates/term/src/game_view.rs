//! GameView: maps `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested. Besides the board
//! itself it draws the score/time panel, the keyboard cursor, short-lived
//! blast/refill flashes fed from game events, and the start and end
//! overlays. It also exposes the board's screen geometry so the driver can
//! hit-test pointer events.

use crate::core::snapshot::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameEvent, Token, BOARD_WIDTH, CELL_COUNT, GESTURE_UNITS_PER_CELL};

/// Frames a blast/refill highlight stays on screen.
const FLASH_FRAMES: u8 = 12;

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

/// Where the board's cells sit on screen, for pointer hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    /// Screen position of cell (0, 0), inside the border.
    pub origin_x: u16,
    pub origin_y: u16,
    /// Board cell size in terminal columns / rows.
    pub cell_w: u16,
    pub cell_h: u16,
}

impl BoardGeometry {
    /// The board cell under a screen position, if any.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.origin_x || y < self.origin_y {
            return None;
        }
        let col = ((x - self.origin_x) / self.cell_w) as usize;
        let row = ((y - self.origin_y) / self.cell_h) as usize;
        if col >= BOARD_WIDTH || row >= BOARD_WIDTH {
            return None;
        }
        Some(row * BOARD_WIDTH + col)
    }

    /// Scale a screen position into gesture units.
    ///
    /// One board cell of travel maps to [`GESTURE_UNITS_PER_CELL`] units on
    /// both axes, so swipe thresholds behave the same horizontally and
    /// vertically despite the 2:1 glyph aspect ratio.
    pub fn gesture_units(&self, x: u16, y: u16) -> (i32, i32) {
        let gx = x as i32 * GESTURE_UNITS_PER_CELL / self.cell_w.max(1) as i32;
        let gy = y as i32 * GESTURE_UNITS_PER_CELL / self.cell_h.max(1) as i32;
        (gx, gy)
    }
}

/// A lightweight terminal renderer for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    /// Per-cell flash countdowns, fed from game events.
    blast: [u8; CELL_COUNT],
    refill: [u8; CELL_COUNT],
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
            cell_w,
            cell_h,
            blast: [0; CELL_COUNT],
            refill: [0; CELL_COUNT],
        }
    }

    /// Record the frame effects for a batch of game events.
    pub fn note_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::CellMatched { index } => {
                    if let Some(slot) = self.blast.get_mut(*index) {
                        *slot = FLASH_FRAMES;
                    }
                }
                GameEvent::CellRefilled { index, .. } => {
                    if let Some(slot) = self.refill.get_mut(*index) {
                        *slot = FLASH_FRAMES;
                        self.blast[*index] = 0;
                    }
                }
                _ => {}
            }
        }
    }

    /// Age the flash effects by one frame.
    pub fn tick(&mut self) {
        for slot in self.blast.iter_mut().chain(self.refill.iter_mut()) {
            *slot = slot.saturating_sub(1);
        }
    }

    /// The board's screen geometry for this viewport.
    pub fn geometry(&self, viewport: Viewport) -> BoardGeometry {
        let (start_x, start_y) = self.frame_origin(viewport);
        BoardGeometry {
            origin_x: start_x + 1,
            origin_y: start_y + 1,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
        }
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_WIDTH as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;
        let (start_x, start_y) = self.frame_origin(viewport);

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        // Background for the play area.
        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);

        // Border.
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Board cells. Before the start the preview is dimmed.
        let dimmed = !snap.started;
        for index in 0..CELL_COUNT {
            let x = (index % BOARD_WIDTH) as u16;
            let y = (index / BOARD_WIDTH) as u16;
            match snap.token_at(index) {
                Some(token) => {
                    self.draw_token_cell(fb, start_x, start_y, x, y, token, index, snap, dimmed)
                }
                None => self.draw_blank_cell(fb, start_x, start_y, x, y, index),
            }
        }

        // Side panel (score/time).
        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        // Overlays.
        if !snap.started {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "ENTER TO START");
        } else if snap.ended {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 0, "TIME'S UP");
            if let Some(grade) = snap.grade {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 1, grade.as_str());
            }
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, 2, "R TO RESTART");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let frame_w = (BOARD_WIDTH as u16) * self.cell_w + 2;
        let frame_h = (BOARD_WIDTH as u16) * self.cell_h + 2;
        // Leave room for the side panel: center the frame in the left
        // two-thirds of the viewport.
        let usable_w = viewport.width.saturating_sub(frame_w + 14);
        let start_x = usable_w / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        (start_x, start_y)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_token_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        token: Token,
        index: usize,
        snap: &GameSnapshot,
        dimmed: bool,
    ) {
        let mut style = CellStyle {
            fg: token_color(token),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: dimmed,
        };
        let mut ch = '█';

        if self.refill[index] > 0 {
            style.bold = true;
        }
        if self.blast[index] > 0 {
            style.fg = Rgb::new(255, 255, 255);
            style.bold = true;
            ch = '*';
        }

        let playing = snap.started && !snap.ended;
        if playing && index == snap.cursor {
            style.bg = if snap.grabbed {
                Rgb::new(150, 130, 40)
            } else {
                Rgb::new(80, 80, 110)
            };
        }

        self.fill_cell_rect(fb, start_x, start_y, x, y, ch, style);
    }

    fn draw_blank_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        index: usize,
    ) {
        let mut style = CellStyle {
            fg: Rgb::new(90, 90, 100),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: true,
        };
        let mut ch = '·';
        if self.blast[index] > 0 {
            style.fg = Rgb::new(255, 255, 255);
            style.dim = false;
            style.bold = true;
            ch = '*';
        }
        self.fill_cell_rect(fb, start_x, start_y, x, y, ch, style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 8 {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let urgent = CellStyle {
            fg: Rgb::new(230, 70, 70),
            ..value
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        let time_style = if snap.time_left <= 10 { urgent } else { value };
        fb.put_u32(panel_x, y, snap.time_left, time_style);
        y = y.saturating_add(2);

        if snap.resolving {
            let dim = CellStyle { dim: true, ..value };
            fb.put_str(panel_x, y, "...", dim);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        line: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2).saturating_sub(1) + line;
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn token_color(token: Token) -> Rgb {
    match token {
        Token::Red => Rgb::new(225, 70, 70),
        Token::Yellow => Rgb::new(235, 205, 75),
        Token::Blue => Rgb::new(85, 125, 230),
        Token::Green => Rgb::new(95, 205, 115),
        Token::Purple => Rgb::new(175, 105, 225),
        Token::Orange => Rgb::new(245, 155, 60),
    }
}

trait IntoCell {
    fn into_cell(self, ch: char) -> crate::fb::Cell;
}

impl IntoCell for CellStyle {
    fn into_cell(self, ch: char) -> crate::fb::Cell {
        crate::fb::Cell { ch, style: self }
    }
}
