//! The active falling piece and the moves that are gated by collision.

use crate::arena::{Arena, Position};
use crate::piece::{PieceKind, Rotation, Shape};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub kind: PieceKind,
    pub shape: Shape,
    pub pos: Position,
    pub score: u32,
}

impl Player {
    /// Places `kind` centered on the top row of `arena`.
    pub fn spawn(kind: PieceKind, arena: &Arena, score: u32) -> Self {
        let shape = kind.shape();
        let x = (arena.width() / 2) as i32 - (shape.width() / 2) as i32;
        Self { kind, shape, pos: Position::new(x, 0), score }
    }

    pub fn collides(&self, arena: &Arena) -> bool {
        arena.collides(&self.shape, self.pos)
    }

    /// Shifts horizontally by `dir`; rejected moves leave the piece where it was.
    pub fn shift(&mut self, arena: &Arena, dir: i32) -> bool {
        self.pos.x += dir;
        if self.collides(arena) {
            self.pos.x -= dir;
            return false;
        }
        true
    }

    /// Rotates, then kicks sideways by +1, -1, +2, -2, ... until the piece fits.
    /// Gives up once the next offset would exceed the shape width, restoring
    /// both orientation and column.
    pub fn rotate(&mut self, arena: &Arena, dir: Rotation) -> bool {
        let x = self.pos.x;
        let width = self.shape.width() as i32;
        let mut offset: i32 = 1;
        self.shape.rotate(dir);
        while self.collides(arena) {
            self.pos.x += offset;
            offset = -(offset + offset.signum());
            if offset > width {
                self.shape.rotate(dir.inverse());
                self.pos.x = x;
                return false;
            }
        }
        true
    }
}
