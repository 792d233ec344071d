//! Logical drawing surface backed by a grid of terminal cells
//!
//! Drawing uses screen units (800x600, y up, origin bottom-left). Each cell
//! covers a `SCREEN_WIDTH / cols` by `SCREEN_HEIGHT / rows` patch.

use glam::Vec2;

use super::palette::{Rgb, WHITE};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let blank = Cell {
            ch: ' ',
            fg: WHITE,
            bg: Rgb(0, 0, 0),
        };
        Self {
            cols,
            rows,
            cells: vec![blank; cols as usize * rows as usize],
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Resize; a changed size clears the contents
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols.max(1), rows.max(1)) != (self.cols, self.rows) {
            *self = Self::new(cols, rows);
        }
    }

    pub fn clear(&mut self, bg: Rgb) {
        for cell in &mut self.cells {
            *cell = Cell { ch: ' ', fg: WHITE, bg };
        }
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row as usize * self.cols as usize + col as usize)
        } else {
            None
        }
    }

    /// Cells of one terminal row, left to right
    pub fn row(&self, row: u16) -> &[Cell] {
        let start = (row.min(self.rows - 1)) as usize * self.cols as usize;
        &self.cells[start..start + self.cols as usize]
    }

    /// Column and row (fractional) of a point in screen units; row 0 is the top
    pub fn to_cell(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x / SCREEN_WIDTH * self.cols as f32,
            (SCREEN_HEIGHT - p.y) / SCREEN_HEIGHT * self.rows as f32,
        )
    }

    /// Fill an axis-aligned box; anything on screen covers at least one cell
    pub fn fill_rect(&mut self, center: Vec2, half: Vec2, color: Rgb) {
        let top_left = self.to_cell(Vec2::new(center.x - half.x, center.y + half.y));
        let bottom_right = self.to_cell(Vec2::new(center.x + half.x, center.y - half.y));

        let col0 = top_left.x.floor() as i64;
        let row0 = top_left.y.floor() as i64;
        let col1 = (bottom_right.x.ceil() as i64).max(col0 + 1);
        let row1 = (bottom_right.y.ceil() as i64).max(row0 + 1);

        for row in row0.max(0)..row1.min(self.rows as i64) {
            for col in col0.max(0)..col1.min(self.cols as i64) {
                let idx = row as usize * self.cols as usize + col as usize;
                let cell = &mut self.cells[idx];
                cell.ch = ' ';
                cell.bg = color;
            }
        }
    }

    /// Draw a single line of text with its baseline at `y`; the background shows through
    pub fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Rgb, anchor: Anchor) {
        let origin = self.to_cell(Vec2::new(x, y));
        let len = text.chars().count() as i64;
        let mut row = origin.y.floor() as i64;
        // A baseline on the bottom edge still lands in the last row
        if row == self.rows as i64 {
            row -= 1;
        }
        if row < 0 || row >= self.rows as i64 {
            return;
        }
        let start = match anchor {
            Anchor::Left => origin.x.floor() as i64,
            Anchor::Center => origin.x.round() as i64 - len / 2,
        };

        for (i, ch) in text.chars().enumerate() {
            let col = start + i as i64;
            if col < 0 || col >= self.cols as i64 {
                continue;
            }
            let idx = row as usize * self.cols as usize + col as usize;
            let cell = &mut self.cells[idx];
            cell.ch = ch;
            cell.fg = color;
        }
    }

    /// Text of one row, for tests and debugging
    pub fn row_text(&self, row: u16) -> String {
        self.row(row).iter().map(|c| c.ch).collect()
    }
}
