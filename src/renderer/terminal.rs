//! Presents a [`Canvas`] on a terminal with crossterm

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
};

use super::canvas::Canvas;
use super::palette::Rgb;

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

/// Writes whole frames to `out`
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw every cell, then flush once
    pub fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        let mut fg: Option<Rgb> = None;
        let mut bg: Option<Rgb> = None;

        for row in 0..canvas.rows() {
            self.out.queue(cursor::MoveTo(0, row))?;
            for cell in canvas.row(row) {
                if fg != Some(cell.fg) {
                    self.out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    fg = Some(cell.fg);
                }
                if bg != Some(cell.bg) {
                    self.out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    bg = Some(cell.bg);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
