//! Compass directions and knight offsets on the 8x8 board.
//!
//! Rows grow toward rank 8 (north) and columns grow toward the h-file (east).
//! Offsets are expressed as `(d_row, d_column)` pairs.

use crate::geometry::square::Square;

/// One of the eight sliding/stepping directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    pub const ORTHOGONALS: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONALS: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::South => (-1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::NorthEast => (1, 1),
            Direction::NorthWest => (1, -1),
            Direction::SouthEast => (-1, 1),
            Direction::SouthWest => (-1, -1),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::NorthWest | Direction::SouthEast | Direction::SouthWest
        )
    }

    /// The line a pinned piece is confined to: this direction and its opposite.
    #[inline]
    pub const fn axis(self) -> [Direction; 2] {
        [self, self.opposite()]
    }

    /// Direction leading from `from` toward `to` when both share a rank, file
    /// or diagonal.
    pub fn between(from: Square, to: Square) -> Option<Direction> {
        if from == to {
            return None;
        }

        let d_row = to.row() as i8 - from.row() as i8;
        let d_column = to.column() as i8 - from.column() as i8;
        if d_row != 0 && d_column != 0 && d_row.abs() != d_column.abs() {
            return None;
        }

        let step = (d_row.signum(), d_column.signum());
        Direction::ALL.into_iter().find(|dir| dir.offset() == step)
    }
}

/// One of the eight knight jumps, named by the long leg first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnightStep {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    EastNorth,
    EastSouth,
    WestNorth,
    WestSouth,
}

impl KnightStep {
    pub const ALL: [KnightStep; 8] = [
        KnightStep::NorthEast,
        KnightStep::NorthWest,
        KnightStep::SouthEast,
        KnightStep::SouthWest,
        KnightStep::EastNorth,
        KnightStep::EastSouth,
        KnightStep::WestNorth,
        KnightStep::WestSouth,
    ];

    #[inline]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            KnightStep::NorthEast => (2, 1),
            KnightStep::NorthWest => (2, -1),
            KnightStep::SouthEast => (-2, 1),
            KnightStep::SouthWest => (-2, -1),
            KnightStep::EastNorth => (1, 2),
            KnightStep::EastSouth => (-1, 2),
            KnightStep::WestNorth => (1, -2),
            KnightStep::WestSouth => (-1, -2),
        }
    }
}
