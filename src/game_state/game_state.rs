//! Immutable board snapshot.
//!
//! `GameState` is the central model for the engine: the 8x8 grid of square
//! contents plus side to move, castling rights, en-passant target and clocks.
//! Only the move applier builds a modified copy; every other subsystem reads
//! it through the accessors below.

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::geometry::square::Square;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    // [row][column], rank 1 at row 0.
    pub(crate) board: [[SquareContent; 8]; 8],

    pub(crate) side_to_move: Side,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [[None; 8]; 8],
            side_to_move: Side::White,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> SquareContent {
        self.board[square.row() as usize][square.column() as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Piece on `square`, or `EmptySquare` if there is none.
    pub fn occupant(&self, square: Square) -> ChessResult<Piece> {
        self.piece_at(square).ok_or(ChessErrors::EmptySquare(square))
    }

    #[inline]
    pub(crate) fn set_piece(&mut self, square: Square, content: SquareContent) {
        self.board[square.row() as usize][square.column() as usize] = content;
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, side: Side, castling_side: CastlingSide) -> bool {
        self.castling_rights & castling_flag(side, castling_side) != 0
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    /// Half-moves since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Every occupied square holding a piece of `side`.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.side == side => Some((sq, piece)),
            _ => None,
        })
    }

    pub fn king_square(&self, side: Side) -> ChessResult<Square> {
        self.pieces(side)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
            .ok_or(ChessErrors::MissingKing(side))
    }
}
