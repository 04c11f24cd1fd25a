//! Fixed-size alien formation
//!
//! Cells are never removed: a destroyed alien leaves an empty cell behind so
//! row/column indices stay stable for the whole wave.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Alien;
use crate::config::GameConfig;

/// Row-major grid of optional aliens. Row 0 is the lowest row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlienGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Alien>>,
}

impl AlienGrid {
    /// Empty grid of the given shape
    pub fn empty(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        }
    }

    /// Lay out a full formation, filling each column bottom to top, left to right
    pub fn new(config: &GameConfig) -> Self {
        let mut grid = Self::empty(config.alien_rows, config.aliens_in_row);
        let size = Vec2::new(config.alien_width, config.alien_height);
        let pitch = size + Vec2::new(config.alien_h_sep, config.alien_v_sep);
        let upper = config.game_height - config.alien_ceiling;
        let base = upper - pitch.y * config.alien_rows as f32;
        let left = config.alien_h_sep + config.alien_width / 2.0;

        for col in 0..grid.columns {
            for row in 0..grid.rows {
                // Two consecutive rows share a sprite
                let sprite = ((row / 2) % config.alien_sprites as usize) as u8;
                let pos = Vec2::new(left + pitch.x * col as f32, base + pitch.y * row as f32);
                grid.set(row, col, Some(Alien::new(pos, size, sprite)));
            }
        }
        grid
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.columns,
            "grid cell ({row}, {col}) out of range for {}x{}",
            self.rows,
            self.columns
        );
        row * self.columns + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Alien> {
        self.cells[self.index(row, col)].as_ref()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Alien> {
        let i = self.index(row, col);
        self.cells[i].as_mut()
    }

    pub fn set(&mut self, row: usize, col: usize, alien: Option<Alien>) {
        let i = self.index(row, col);
        self.cells[i] = alien;
    }

    /// Empty a cell, returning the alien that was there
    pub fn remove(&mut self, row: usize, col: usize) -> Option<Alien> {
        let i = self.index(row, col);
        self.cells[i].take()
    }

    /// Live aliens with their (row, col)
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Alien)> {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|a| ((i / columns, i % columns), a)))
    }

    pub fn aliens_mut(&mut self) -> impl Iterator<Item = &mut Alien> {
        self.cells.iter_mut().flatten()
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Columns that still hold at least one alien
    pub fn occupied_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&col| (0..self.rows).any(|row| self.get(row, col).is_some()))
            .collect()
    }

    /// Lowest live alien in a column
    pub fn lowest_in_column(&self, col: usize) -> Option<&Alien> {
        (0..self.rows)
            .filter_map(|row| self.get(row, col))
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    }

    /// Shift every live alien
    pub fn translate(&mut self, delta: Vec2) {
        for alien in self.aliens_mut() {
            alien.pos += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = GameConfig::default();
        let grid = AlienGrid::new(&config);
        assert_eq!(grid.live_count(), config.alien_count());

        let bottom_left = grid.get(0, 0).unwrap();
        assert_eq!(bottom_left.pos, Vec2::new(32.5, 355.0));
        let next_col = grid.get(0, 1).unwrap();
        assert_eq!(next_col.pos.x, 32.5 + 49.0);
        let next_row = grid.get(1, 0).unwrap();
        assert_eq!(next_row.pos.y, 355.0 + 49.0);
    }

    #[test]
    fn test_sprites_cycle_every_two_rows() {
        let config = GameConfig {
            alien_rows: 8,
            ..GameConfig::default()
        };
        let grid = AlienGrid::new(&config);
        let sprites: Vec<u8> = (0..8).map(|row| grid.get(row, 3).unwrap().sprite).collect();
        assert_eq!(sprites, vec![0, 0, 1, 1, 2, 2, 0, 0]);
    }

    #[test]
    fn test_removed_cells_keep_indices() {
        let config = GameConfig::default();
        let mut grid = AlienGrid::new(&config);
        let before = grid.get(2, 5).unwrap().pos;
        assert!(grid.remove(1, 5).is_some());
        assert!(grid.remove(1, 5).is_none());
        assert!(grid.get(1, 5).is_none());
        assert_eq!(grid.get(2, 5).unwrap().pos, before);
        assert_eq!(grid.live_count(), config.alien_count() - 1);
    }

    #[test]
    fn test_column_queries() {
        let config = GameConfig {
            alien_rows: 3,
            aliens_in_row: 3,
            ..GameConfig::default()
        };
        let mut grid = AlienGrid::new(&config);
        for row in 0..3 {
            grid.remove(row, 1);
        }
        grid.remove(0, 2);
        assert_eq!(grid.occupied_columns(), vec![0, 2]);
        let lowest = grid.lowest_in_column(2).unwrap();
        assert_eq!(lowest.pos.y, grid.get(1, 2).unwrap().pos.y);
        assert!(grid.lowest_in_column(1).is_none());
    }
}
