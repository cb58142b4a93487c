//! Tetromino catalog and in-place rotation.

/// Cell value: 0 is empty, 1..=7 is the color index of the piece that left it.
pub type Cell = u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Spawn pool, in the order the random pick indexes it.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
    ];

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Fill value, doubling as the palette index.
    pub fn color(self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Fresh grid in the spawn orientation.
    pub fn shape(self) -> Shape {
        let rows: Vec<Vec<Cell>> = match self {
            PieceKind::I => vec![
                vec![0, 0, 0, 0],
                vec![1, 1, 1, 1],
                vec![0, 0, 0, 0],
                vec![0, 0, 0, 0],
            ],
            PieceKind::J => vec![vec![2, 0, 0], vec![2, 2, 2], vec![0, 0, 0]],
            PieceKind::L => vec![vec![0, 0, 3], vec![3, 3, 3], vec![0, 0, 0]],
            PieceKind::O => vec![vec![4, 4], vec![4, 4]],
            PieceKind::S => vec![vec![0, 5, 5], vec![5, 5, 0], vec![0, 0, 0]],
            PieceKind::T => vec![vec![0, 6, 0], vec![6, 6, 6], vec![0, 0, 0]],
            PieceKind::Z => vec![vec![7, 7, 0], vec![0, 7, 7], vec![0, 0, 0]],
        };
        Shape { rows }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    pub fn inverse(self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

/// Square grid of cells describing one piece in one orientation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    rows: Vec<Vec<Cell>>,
}

impl Shape {
    /// Wraps raw rows. Rotation is only meaningful for square input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    /// Non-zero cells as (x, y, value) relative to the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != 0)
                .map(move |(x, v)| (x as i32, y as i32, *v))
        })
    }

    /// Rotates 90 degrees in place: transpose, then mirror.
    pub fn rotate(&mut self, dir: Rotation) {
        let n = self.rows.len();
        for y in 0..n {
            for x in 0..y {
                let tmp = self.rows[y][x];
                self.rows[y][x] = self.rows[x][y];
                self.rows[x][y] = tmp;
            }
        }
        match dir {
            Rotation::Clockwise => self.rows.iter_mut().for_each(|row| row.reverse()),
            Rotation::CounterClockwise => self.rows.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_colors_are_unique_and_match_fill() {
        let mut seen = std::collections::HashSet::new();
        for kind in PieceKind::ALL {
            assert!(seen.insert(kind.color()));
            let shape = kind.shape();
            assert_eq!(shape.cells().count(), 4, "{:?} must have four cells", kind);
            assert!(shape.cells().all(|(_, _, v)| v == kind.color()));
            assert_eq!(shape.rows().len(), shape.width(), "{:?} must be square", kind);
        }
    }

    #[test]
    fn rotate_t_clockwise() {
        let mut s = PieceKind::T.shape();
        s.rotate(Rotation::Clockwise);
        assert_eq!(
            s.rows(),
            &[vec![0, 6, 0], vec![0, 6, 6], vec![0, 6, 0]]
        );
    }

    #[test]
    fn rotate_t_counter_clockwise() {
        let mut s = PieceKind::T.shape();
        s.rotate(Rotation::CounterClockwise);
        assert_eq!(
            s.rows(),
            &[vec![0, 6, 0], vec![6, 6, 0], vec![0, 6, 0]]
        );
    }

    #[test]
    fn rotation_round_trips() {
        for kind in PieceKind::ALL {
            for dir in [Rotation::Clockwise, Rotation::CounterClockwise] {
                let mut s = kind.shape();
                s.rotate(dir);
                s.rotate(dir.inverse());
                assert_eq!(s, kind.shape());
            }
        }
    }

    #[test]
    fn four_turns_is_identity() {
        let mut s = PieceKind::L.shape();
        for _ in 0..4 {
            s.rotate(Rotation::Clockwise);
        }
        assert_eq!(s, PieceKind::L.shape());
    }

    #[test]
    fn from_char_covers_catalog() {
        for (ch, kind) in "IJLOSTZ".chars().zip([
            PieceKind::I,
            PieceKind::J,
            PieceKind::L,
            PieceKind::O,
            PieceKind::S,
            PieceKind::T,
            PieceKind::Z,
        ]) {
            assert_eq!(PieceKind::from_char(ch), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
    }
}
