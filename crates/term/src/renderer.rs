//! TerminalRenderer: puts a framebuffer on a real terminal.
//!
//! The first frame (and any frame after a resize) is written in full. Later
//! frames only rewrite the runs of glyphs that changed.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    out: io::Stdout,
    /// Frame currently on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    scratch: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            shown: None,
            scratch: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.scratch.clear();
        self.scratch.queue(terminal::EnterAlternateScreen)?;
        self.scratch.queue(cursor::Hide)?;
        self.scratch.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch.queue(ResetColor)?;
        self.scratch.queue(SetAttribute(Attribute::Reset))?;
        self.scratch.queue(terminal::EnableLineWrap)?;
        self.scratch.queue(cursor::Show)?;
        self.scratch.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Next frame is drawn in full (call after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `frame`, then swap it with the previously shown frame.
    ///
    /// The caller gets the old buffer back to render the next frame into,
    /// so steady-state drawing does not allocate.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.scratch.clear();
        match self.shown.take() {
            Some(mut prev) if prev.same_size(frame) => {
                encode_diff_into(&prev, frame, &mut self.scratch)?;
                std::mem::swap(&mut prev, frame);
                self.shown = Some(prev);
            }
            _ => {
                encode_full_into(frame, &mut self.scratch)?;
                let mut prev = FrameBuffer::new(frame.width(), frame.height());
                std::mem::swap(&mut prev, frame);
                self.shown = Some(prev);
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.scratch).context("write frame")?;
        self.out.flush().context("flush terminal")?;
        Ok(())
    }
}

/// Encode a full redraw of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            put_glyph(out, fb.get(x, y).unwrap_or_default(), &mut style)?;
        }
    }
    finish(out)
}

/// Encode only the runs of glyphs that differ between `prev` and `next`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            put_glyph(out, next.get(x + dx, y).unwrap_or_default(), &mut style)?;
        }
    }
    finish(out)
}

fn put_glyph(out: &mut Vec<u8>, glyph: Glyph, current: &mut Option<Style>) -> Result<()> {
    if *current != Some(glyph.style) {
        let s = glyph.style;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(color(s.fg)))?;
        out.queue(SetBackgroundColor(color(s.bg)))?;
        if s.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if s.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        *current = Some(s);
    }
    out.queue(Print(glyph.ch))?;
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb { r, g, b }
}

/// `(x, y, len)` of every horizontal run of changed glyphs.
///
/// Both buffers must have the same size.
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    debug_assert!(prev.same_size(next));
    let w = next.width();
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let differs = |x: u16| prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        while x < w {
            if !differs(x) {
                x += 1;
                continue;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            runs.push((start, y, x - start));
        }
    }
    runs
}
