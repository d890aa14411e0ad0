//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameState, Tetromino};
use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
use crate::types::{BoardLayout, Cell, CellColor, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const GRID_DOT: Rgb = Rgb::new(90, 90, 100);
const LETTER_ON_BLOCK: Rgb = Rgb::new(15, 15, 20);
const PATH_BG: Rgb = Rgb::new(250, 250, 250);
const PATH_FG: Rgb = Rgb::new(200, 30, 60);

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

/// One-line message under the side panel (last word result and the like).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub good: bool,
}

impl StatusLine {
    pub fn good(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            good: true,
        }
    }

    pub fn bad(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            good: false,
        }
    }
}

/// A lightweight terminal renderer for the word game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Block colour for a piece colour.
pub fn block_rgb(color: CellColor) -> Rgb {
    match color {
        CellColor::Cyan => Rgb::new(80, 220, 220),
        CellColor::Yellow => Rgb::new(240, 220, 80),
        CellColor::Purple => Rgb::new(200, 120, 220),
        CellColor::Green => Rgb::new(100, 220, 120),
        CellColor::Red => Rgb::new(220, 80, 80),
        CellColor::Blue => Rgb::new(80, 120, 220),
        CellColor::Orange => Rgb::new(255, 165, 0),
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Top-left corner of the board frame.
    fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        (start_x, start_y)
    }

    fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Where board cells land on screen for `viewport`; used to map mouse
    /// positions back to the grid.
    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let (start_x, start_y) = self.frame_origin(viewport);
        BoardLayout {
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
    pub fn render_into(&self, state: &GameState, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_status(state, None, viewport, fb);
    }

    pub fn render_into_with_status(
        &self,
        state: &GameState,
        status: Option<&StatusLine>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let (frame_w, frame_h) = self.frame_size();
        let (start_x, start_y) = self.frame_origin(viewport);
        let layout = self.layout(viewport);

        fb.fill_rect(
            layout.origin_x,
            layout.origin_y,
            frame_w - 2,
            frame_h - 2,
            ' ',
            GlyphStyle::new(GRID_DOT, PLAY_BG),
        );
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, GlyphStyle::default());

        // Locked cells.
        let board = state.board();
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                match board.get(x, y).flatten() {
                    Some(cell) => self.draw_block(fb, &layout, x, y, cell),
                    None => self.draw_empty(fb, &layout, x, y),
                }
            }
        }

        if let Some(active) = state.active() {
            // Ghost first so the piece itself wins where they overlap.
            if let Some(ghost_y) = state.ghost_y() {
                let ghost = GlyphStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
                let landing = active.at(crate::types::Position::new(active.position.x, ghost_y));
                for (x, y, _) in landing.board_cells() {
                    if board.get(x, y) == Some(None) {
                        self.fill_cell(fb, &layout, x, y, '░', ghost);
                    }
                }
            }
            for (x, y, cell) in active.board_cells() {
                self.draw_block(fb, &layout, x, y, cell);
            }
        }

        // Traced path on top of everything on the board.
        let path_style = GlyphStyle::new(PATH_FG, PATH_BG).bold().underline();
        for step in state.word_path() {
            self.fill_cell(fb, &layout, step.x, step.y, ' ', path_style);
            self.put_letter(fb, &layout, step.x, step.y, step.letter, path_style);
        }

        self.draw_side_panel(fb, state, status, viewport, start_x, start_y, frame_w);

        if state.game_over() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER", 0);
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "R - restart", 1);
        } else if state.paused() {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED", 0);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: GlyphStyle) {
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

    fn draw_empty(&self, fb: &mut FrameBuffer, layout: &BoardLayout, x: i8, y: i8) {
        let style = GlyphStyle::new(GRID_DOT, PLAY_BG).dim();
        self.fill_cell(fb, layout, x, y, ' ', style);
        self.put_letter(fb, layout, x, y, '·', style);
    }

    /// A lettered block; blank cells are never drawn.
    fn draw_block(&self, fb: &mut FrameBuffer, layout: &BoardLayout, x: i8, y: i8, cell: Cell) {
        let Some(letter) = cell.letter() else {
            return;
        };
        let style = GlyphStyle::new(LETTER_ON_BLOCK, block_rgb(cell.color)).bold();
        self.fill_cell(fb, layout, x, y, ' ', style);
        self.put_letter(fb, layout, x, y, letter, style);
    }

    fn cell_origin(&self, layout: &BoardLayout, x: i8, y: i8) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((
            layout.origin_x + x as u16 * layout.cell_w,
            layout.origin_y + y as u16 * layout.cell_h,
        ))
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        x: i8,
        y: i8,
        ch: char,
        style: GlyphStyle,
    ) {
        if let Some((px, py)) = self.cell_origin(layout, x, y) {
            fb.fill_rect(px, py, layout.cell_w, layout.cell_h, ch, style);
        }
    }

    fn put_letter(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        x: i8,
        y: i8,
        letter: char,
        style: GlyphStyle,
    ) {
        if let Some((px, py)) = self.cell_origin(layout, x, y) {
            fb.put_char(
                px + (layout.cell_w - 1) / 2,
                py + (layout.cell_h - 1) / 2,
                letter,
                style,
            );
        }
    }

    /// Small piece picture, two columns per mino. Returns rows used.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &Tetromino) -> u16 {
        let mut rows = 0;
        for (dx, dy, cell) in piece.minos() {
            if let Some(letter) = cell.letter() {
                let style = GlyphStyle::new(LETTER_ON_BLOCK, block_rgb(cell.color)).bold();
                let px = x + dx as u16 * 2;
                let py = y + dy as u16;
                fb.put_char(px, py, letter, style);
                fb.put_char(px + 1, py, ' ', style);
                rows = rows.max(dy as u16 + 1);
            }
        }
        rows
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        status: Option<&StatusLine>,
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
        if panel_w < 12 {
            return;
        }

        let label = GlyphStyle::default().bold();
        let value = GlyphStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        for (name, number) in [
            ("SCORE", state.score()),
            ("LEVEL", state.level()),
            ("LINES", state.lines()),
            ("WORDS", state.words()),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "HOLD", label);
        y = y.saturating_add(1);
        match state.held() {
            Some(piece) => {
                let rows = self.draw_preview(fb, panel_x, y, piece);
                y = y.saturating_add(rows.max(1) + 1);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
                y = y.saturating_add(2);
            }
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let rows = self.draw_preview(fb, panel_x, y, state.next());
        y = y.saturating_add(rows.max(1) + 1);

        fb.put_str(panel_x, y, "WORD", label);
        y = y.saturating_add(1);
        if state.is_tracing() {
            let mut x = panel_x;
            for step in state.word_path() {
                x = fb.put_str(x, y, &step.letter.to_string(), value.bold());
            }
        } else {
            fb.put_str(panel_x, y, "-", value.dim());
        }
        y = y.saturating_add(2);

        if let Some(status) = status {
            let fg = if status.good {
                Rgb::new(120, 230, 120)
            } else {
                Rgb::new(230, 120, 120)
            };
            fb.put_str(panel_x, y, &status.text, GlyphStyle::new(fg, Rgb::new(0, 0, 0)));
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
        line: u16,
    ) {
        let y = start_y.saturating_add(frame_h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = GlyphStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}
