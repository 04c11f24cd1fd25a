//! Character-cell renderer for terminals and logs

use std::fmt;

use glam::Vec2;

use super::{Align, DrawCmd, Renderer, Sprite};

/// Rasterizes draw commands onto a fixed grid of characters
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    cols: usize,
    rows: usize,
    /// Playfield size the grid covers
    world: Vec2,
    cells: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(cols: usize, rows: usize, world: Vec2) -> Self {
        assert!(cols > 0 && rows > 0, "canvas must have at least one cell");
        Self {
            cols,
            rows,
            world,
            cells: vec![' '; cols * rows],
        }
    }

    /// Cell under a playfield point; y up maps to row 0 at the top
    fn cell(&self, p: Vec2) -> (usize, usize) {
        let col = (p.x * self.cols as f32 / self.world.x).floor();
        let row = ((self.world.y - p.y) * self.rows as f32 / self.world.y).floor();
        (
            col.clamp(0.0, (self.cols - 1) as f32) as usize,
            row.clamp(0.0, (self.rows - 1) as f32) as usize,
        )
    }

    fn put(&mut self, col: usize, row: usize, c: char) {
        self.cells[row * self.cols + col] = c;
    }

    fn fill(&mut self, center: Vec2, size: Vec2, c: char) {
        let half = size / 2.0;
        let (c0, r0) = self.cell(Vec2::new(center.x - half.x, center.y + half.y));
        let (c1, r1) = self.cell(Vec2::new(center.x + half.x, center.y - half.y));
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row, c);
            }
        }
    }

    pub fn row(&self, row: usize) -> String {
        self.cells[row * self.cols..(row + 1) * self.cols].iter().collect()
    }
}

fn glyph(sprite: Sprite) -> char {
    match sprite {
        Sprite::Ship => '^',
        Sprite::Alien(i) => ['W', 'M', 'A'][i as usize % 3],
        Sprite::PlayerBolt => '|',
        Sprite::EnemyBolt => '!',
        Sprite::Barrier(_) => '#',
    }
}

impl Renderer for AsciiCanvas {
    fn draw(&mut self, cmd: &DrawCmd) {
        match cmd {
            DrawCmd::Clear { .. } => self.cells.fill(' '),
            DrawCmd::Sprite {
                sprite,
                center,
                size,
            } => self.fill(*center, *size, glyph(*sprite)),
            DrawCmd::Line { from, to, .. } => {
                // Only axis-aligned lines are ever emitted
                let (c0, r0) = self.cell(from.min(*to));
                let (c1, r1) = self.cell(from.max(*to));
                for row in r1.min(r0)..=r1.max(r0) {
                    for col in c0..=c1 {
                        self.put(col, row, '-');
                    }
                }
            }
            DrawCmd::Text {
                text, pos, align, ..
            } => {
                let (col, row) = self.cell(*pos);
                let len = text.chars().count();
                let start = match align {
                    Align::Left => col,
                    Align::Center => col.saturating_sub(len / 2),
                    Align::Right => (col + 1).saturating_sub(len),
                };
                for (i, c) in text.chars().enumerate() {
                    if start + i < self.cols {
                        self.put(start + i, row, c);
                    }
                }
            }
        }
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row(row).trim_end())?;
        }
        Ok(())
    }
}
