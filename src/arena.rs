//! The arena: persistent grid of locked cells, plus the collision, merge and
//! sweep operations that read or write it.

use crate::piece::{Cell, Shape};

/// Points for the first row of a sweep; each further row doubles.
pub const ROW_POINTS: u32 = 10;

/// Top-left offset of a shape within the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Result of one sweep call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sweep {
    pub rows: u32,
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arena {
    width: usize,
    rows: Vec<Vec<Cell>>,
}

impl Arena {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, rows: vec![vec![0; width]; height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, value: Cell) {
        if let Some(c) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *c = value;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|&c| c == 0))
    }

    /// Zeroes every cell (top-out).
    pub fn clear(&mut self) {
        self.rows.iter_mut().for_each(|row| row.fill(0));
    }

    /// True if any non-zero cell of `shape` at `pos` leaves the side walls,
    /// passes the floor, or overlaps a locked cell. Rows above the arena are
    /// open space: a piece may poke out of the top, and only the side walls,
    /// the floor and locked cells block it.
    pub fn collides(&self, shape: &Shape, pos: Position) -> bool {
        shape.cells().any(|(x, y, _)| {
            let ax = pos.x + x;
            let ay = pos.y + y;
            if ax < 0 || ax as usize >= self.width {
                return true;
            }
            if ay < 0 {
                return false;
            }
            match self.get(ax as usize, ay as usize) {
                Some(cell) => cell != 0,
                None => true,
            }
        })
    }

    /// Writes the shape's cells into the arena. Callers check `collides` first;
    /// cells falling outside the grid are dropped.
    pub fn merge(&mut self, shape: &Shape, pos: Position) {
        for (x, y, value) in shape.cells() {
            let ax = pos.x + x;
            let ay = pos.y + y;
            if ax >= 0 && ay >= 0 {
                self.set(ax as usize, ay as usize, value);
            }
        }
    }

    /// Removes complete rows and refills from the top. Clearing k rows in one
    /// call awards 10 * (2^k - 1), saturating at `u32::MAX` on very tall arenas.
    pub fn sweep(&mut self) -> Sweep {
        let height = self.rows.len();
        let mut kept: Vec<Vec<Cell>> = Vec::with_capacity(height);
        let mut result = Sweep::default();
        let mut multiplier: u32 = 1;
        for row in self.rows.drain(..).rev() {
            if row.iter().all(|&c| c != 0) {
                result.rows += 1;
                result.points = result.points.saturating_add(ROW_POINTS.saturating_mul(multiplier));
                multiplier = multiplier.saturating_mul(2);
            } else {
                kept.push(row);
            }
        }
        kept.resize(height, vec![0; self.width]);
        kept.reverse();
        self.rows = kept;
        result
    }
}
