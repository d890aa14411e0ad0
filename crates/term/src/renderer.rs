//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! Frames are diffed row by row against the previous one; only the changed
//! span of each dirty row is rewritten.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen and mouse capture.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(EnableMouseCapture)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(DisableMouseCapture)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a framebuffer, swapping it into internal state.
    ///
    /// The renderer diffs against the previous frame and then swaps buffers,
    /// so the caller gets the old frame back to draw the next one into.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.buf)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let mut current_style = None;
    for y in 0..fb.height() {
        if let Some(row) = fb.row(y) {
            out.queue(cursor::MoveTo(0, y))?;
            encode_span(row, &mut current_style, out)?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the changed span of each dirty row into `out`.
///
/// Both frames must have the same size. Writes nothing when they are equal.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut current_style = None;
    let mut wrote = false;

    for y in 0..next.height() {
        let (Some(old), Some(new)) = (prev.row(y), next.row(y)) else {
            continue;
        };
        let Some((start, end)) = changed_span(old, new) else {
            continue;
        };
        out.queue(cursor::MoveTo(start as u16, y))?;
        encode_span(&new[start..end], &mut current_style, out)?;
        wrote = true;
    }

    if wrote {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// First and one-past-last differing column, or `None` for identical rows.
fn changed_span(old: &[Glyph], new: &[Glyph]) -> Option<(usize, usize)> {
    let start = old.iter().zip(new).position(|(a, b)| a != b)?;
    let end = old
        .iter()
        .zip(new)
        .rposition(|(a, b)| a != b)
        .map_or(start + 1, |i| i + 1);
    Some((start, end))
}

fn encode_span(
    glyphs: &[Glyph],
    current_style: &mut Option<GlyphStyle>,
    out: &mut Vec<u8>,
) -> Result<()> {
    for glyph in glyphs {
        if *current_style != Some(glyph.style) {
            apply_style_into(out, glyph.style)?;
            *current_style = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: GlyphStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    if style.underline {
        out.queue(SetAttribute(Attribute::Underlined))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_span_covers_first_to_last_difference() {
        let style = GlyphStyle::default();
        let old = vec![style.glyph(' '); 6];
        let mut new = old.clone();
        new[1] = style.glyph('К');
        new[4] = style.glyph('Т');

        assert_eq!(changed_span(&old, &new), Some((1, 5)));
        assert_eq!(changed_span(&old, &old), None);
    }

    #[test]
    fn test_identical_frames_encode_nothing() {
        let fb = FrameBuffer::new(8, 3);
        let mut out = Vec::new();
        encode_diff_into(&fb, &fb.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_diff_prints_only_changed_glyphs() {
        let prev = FrameBuffer::new(8, 2);
        let mut next = prev.clone();
        next.put_str(2, 1, "ЁЖ", GlyphStyle::default());

        let mut diff = Vec::new();
        encode_diff_into(&prev, &next, &mut diff).unwrap();
        let mut full = Vec::new();
        encode_full_into(&next, &mut full).unwrap();

        let diff_text = String::from_utf8(diff).unwrap();
        assert!(diff_text.contains("ЁЖ"));
        assert!(full.len() > diff_text.len());
    }

    #[test]
    fn test_style_conversion() {
        let style = GlyphStyle::new(Rgb::new(1, 2, 3), Rgb::new(4, 5, 6));
        assert_eq!(rgb_to_color(style.fg), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
