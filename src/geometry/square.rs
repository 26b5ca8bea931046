//! Board coordinates.
//!
//! A `Square` is always on the board: every constructor is checked and
//! stepping off an edge yields `None` instead of an out-of-range value.

use std::fmt;
use std::str::FromStr;

use crate::errors::ChessErrors;
use crate::geometry::direction::{Direction, KnightStep};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

/// Row/column coordinate. Row 0 is rank 1, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    column: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, column: u8) -> Option<Self> {
        if row < 8 && column < 8 {
            Some(Self { row, column })
        } else {
            None
        }
    }

    /// Compile-time square for rule constants. Panics on an off-board pair,
    /// which turns a bad constant into a build error.
    pub(crate) const fn at(row: u8, column: u8) -> Self {
        assert!(row < 8 && column < 8);
        Self { row, column }
    }

    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        Self::new(index / 8, index % 8)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * 8 + self.column as usize
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn column(self) -> u8 {
        self.column
    }

    #[inline]
    fn offset_by(self, (d_row, d_column): (i8, i8)) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let column = self.column as i8 + d_column;
        if (0..8).contains(&row) && (0..8).contains(&column) {
            Some(Self {
                row: row as u8,
                column: column as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn step(self, direction: Direction) -> Option<Self> {
        self.offset_by(direction.offset())
    }

    #[inline]
    pub fn knight_step(self, step: KnightStep) -> Option<Self> {
        self.offset_by(step.offset())
    }

    /// Squares outward from (not including) `self` until the board edge.
    pub fn ray(self, direction: Direction) -> Ray {
        Ray {
            current: self,
            direction,
        }
    }

    /// All 64 squares, rank 1 first, a-file first within a rank.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&square_to_algebraic(*self))
    }
}

impl FromStr for Square {
    type Err = ChessErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        algebraic_to_square(s)
    }
}

/// Iterator returned by [`Square::ray`].
#[derive(Debug, Clone)]
pub struct Ray {
    current: Square,
    direction: Direction,
}

impl Iterator for Ray {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let next = self.current.step(self.direction)?;
        self.current = next;
        Some(next)
    }
}
