//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type returned by the notation codecs,
//! the analyzer, the move generator and the applier. Each variant carries
//! contextual information where appropriate to aid diagnostics and
//! user-facing error messages.
//!
//! Usage guidelines:
//! - Parsing variants (`InvalidAlgebraic*`, `InvalidFen*`) describe malformed
//!   input and are safe to present to end users or to use for rejecting a
//!   quiz/opening data entry.
//! - `MissingKing` and `EmptySquare` are precondition violations: the caller
//!   queried a position or square that was not well formed. They are surfaced
//!   as values rather than panics but normally indicate a bug upstream.
//! - A SAN string that resolves to no move (or to several) is not an error;
//!   the SAN parser reports it as `Ok(None)`.

use std::error::Error;
use std::fmt;

use crate::game_state::chess_types::{Move, Side};
use crate::geometry::square::Square;

pub type ChessResult<T> = Result<T, ChessErrors>;

/// Unified error type for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A single character used during algebraic parsing was invalid.
    ///
    /// Payload: the offending character (for example a file outside 'a'..'h'
    /// or an unknown piece letter).
    InvalidAlgebraicChar(char),

    /// An algebraic string failed to parse as a square or move.
    ///
    /// Payload: the original string.
    InvalidAlgebraicString(String),

    /// A FEN string did not contain exactly six whitespace-separated fields.
    ///
    /// Payload: the number of fields found.
    InvalidFenFieldCount(usize),

    /// An unexpected character inside the FEN board field.
    InvalidFenToken(char),

    /// The FEN board field had the wrong number of ranks or a rank that does
    /// not cover exactly eight files.
    ///
    /// Payload: the offending rank text (or the whole board field when the
    /// rank count is wrong).
    InvalidFenRank(String),

    /// A non-board FEN field could not be interpreted.
    InvalidFenField { field: &'static str, value: String },

    /// A square that was expected to hold a piece is empty.
    EmptySquare(Square),

    /// The position has no king for the given side.
    MissingKing(Side),

    /// The move is not among the legal moves of the position.
    IllegalMove(Move),

    /// A PGN document had a malformed header line or missing setup data.
    InvalidPgn(String),
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::InvalidAlgebraicChar(ch) => {
                write!(f, "invalid algebraic character '{ch}'")
            }
            ChessErrors::InvalidAlgebraicString(s) => write!(f, "invalid algebraic string: {s}"),
            ChessErrors::InvalidFenFieldCount(count) => {
                write!(f, "FEN must contain 6 fields, found {count}")
            }
            ChessErrors::InvalidFenToken(ch) => {
                write!(f, "invalid piece character '{ch}' in FEN board layout")
            }
            ChessErrors::InvalidFenRank(rank) => write!(f, "invalid FEN rank: {rank}"),
            ChessErrors::InvalidFenField { field, value } => {
                write!(f, "invalid FEN {field} field: {value}")
            }
            ChessErrors::EmptySquare(square) => write!(f, "no piece on square {square}"),
            ChessErrors::MissingKing(side) => write!(f, "no {side:?} king on the board"),
            ChessErrors::IllegalMove(mv) => write!(f, "illegal move {mv}"),
            ChessErrors::InvalidPgn(msg) => write!(f, "invalid PGN: {msg}"),
        }
    }
}

impl Error for ChessErrors {}
