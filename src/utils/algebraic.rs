//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! `Square` values, plus the single-character file/rank helpers reused by
//! the FEN and SAN codecs.

use crate::errors::{ChessErrors, ChessResult};
use crate::geometry::square::Square;

/// Column index for a file letter (`'a'..='h'`).
#[inline]
pub fn file_from_char(ch: char) -> Option<u8> {
    if ('a'..='h').contains(&ch) {
        Some(ch as u8 - b'a')
    } else {
        None
    }
}

/// Row index for a rank digit (`'1'..='8'`).
#[inline]
pub fn rank_from_char(ch: char) -> Option<u8> {
    if ('1'..='8').contains(&ch) {
        Some(ch as u8 - b'1')
    } else {
        None
    }
}

#[inline]
pub fn file_to_char(column: u8) -> char {
    char::from(b'a' + column)
}

#[inline]
pub fn rank_to_char(row: u8) -> char {
    char::from(b'1' + row)
}

/// Convert algebraic notation (for example: "e4") to a square.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let mut chars = square.chars();
    let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(ChessErrors::InvalidAlgebraicString(square.to_owned()));
    };

    let column = file_from_char(file).ok_or(ChessErrors::InvalidAlgebraicChar(file))?;
    let row = rank_from_char(rank).ok_or(ChessErrors::InvalidAlgebraicChar(rank))?;

    Square::new(row, column).ok_or_else(|| ChessErrors::InvalidAlgebraicString(square.to_owned()))
}

/// Convert a square to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let mut out = String::with_capacity(2);
    out.push(file_to_char(square.column()));
    out.push(rank_to_char(square.row()));
    out
}
