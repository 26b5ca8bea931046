//! Value types shared by the position model, analyzer, generator and codecs.

use std::fmt;

use crate::game_state::chess_rules::KING_HOME_COLUMN;
pub use crate::game_state::game_state::GameState;
use crate::geometry::direction::Direction;
use crate::geometry::square::Square;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    #[inline]
    pub fn toggle(&mut self) {
        *self = self.opposite();
    }

    /// Direction pawns of this side advance in.
    #[inline]
    pub const fn pawn_direction(self) -> Direction {
        match self {
            Side::White => Direction::North,
            Side::Black => Direction::South,
        }
    }

    /// Diagonals pawns of this side capture along.
    #[inline]
    pub const fn pawn_capture_directions(self) -> [Direction; 2] {
        match self {
            Side::White => [Direction::NorthWest, Direction::NorthEast],
            Side::Black => [Direction::SouthWest, Direction::SouthEast],
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// Square the king must stand on to castle.
    #[inline]
    pub const fn king_home(self) -> Square {
        Square::at(self.home_row(), KING_HOME_COLUMN)
    }

    #[inline]
    pub const fn pawn_start_row(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    #[inline]
    pub const fn promotion_row(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }
}

/// Piece kind (side is stored separately in [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Lowercase FEN letter.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Case-insensitive inverse of [`PieceKind::to_char`].
    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Uppercase SAN letter; pawns have none.
    #[inline]
    pub fn san_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            other => Some(other.to_char().to_ascii_uppercase()),
        }
    }

    /// Whether this piece slides along `direction` for pins and line attacks.
    #[inline]
    pub const fn slides_along(self, direction: Direction) -> bool {
        match self {
            PieceKind::Queen => true,
            PieceKind::Bishop => direction.is_diagonal(),
            PieceKind::Rook => !direction.is_diagonal(),
            PieceKind::Pawn | PieceKind::Knight | PieceKind::King => false,
        }
    }
}

/// A piece standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// FEN letter: uppercase for white, lowercase for black.
    pub fn fen_char(self) -> char {
        let base = self.kind.to_char();
        match self.side {
            Side::White => base.to_ascii_uppercase(),
            Side::Black => base,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let side = if ch.is_ascii_uppercase() {
            Side::White
        } else if ch.is_ascii_lowercase() {
            Side::Black
        } else {
            return None;
        };
        PieceKind::from_char(ch).map(|kind| Piece::new(kind, side))
    }
}

/// Contents of one board square.
pub type SquareContent = Option<Piece>;

/// King-side or queen-side castling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    #[inline]
    pub const fn king_destination_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 6,
            CastlingSide::QueenSide => 2,
        }
    }

    #[inline]
    pub const fn rook_origin_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    #[inline]
    pub const fn rook_destination_column(self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    /// Side of a two-column king step, if `to_column` is a castle destination.
    #[inline]
    pub const fn from_king_destination_column(to_column: u8) -> Option<Self> {
        match to_column {
            6 => Some(CastlingSide::KingSide),
            2 => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }

    pub const fn king_destination(self, side: Side) -> Square {
        Square::at(side.home_row(), self.king_destination_column())
    }

    pub const fn rook_origin(self, side: Side) -> Square {
        Square::at(side.home_row(), self.rook_origin_column())
    }

    pub const fn rook_destination(self, side: Side) -> Square {
        Square::at(side.home_row(), self.rook_destination_column())
    }
}

/// Compact castling rights bitmask.
pub type CastlingRights = u8;
pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;

#[inline]
pub const fn castling_flag(side: Side, castling_side: CastlingSide) -> CastlingRights {
    match (side, castling_side) {
        (Side::White, CastlingSide::KingSide) => CASTLE_WHITE_KINGSIDE,
        (Side::White, CastlingSide::QueenSide) => CASTLE_WHITE_QUEENSIDE,
        (Side::Black, CastlingSide::KingSide) => CASTLE_BLACK_KINGSIDE,
        (Side::Black, CastlingSide::QueenSide) => CASTLE_BLACK_QUEENSIDE,
    }
}

#[inline]
pub const fn castling_flags_for(side: Side) -> CastlingRights {
    castling_flag(side, CastlingSide::KingSide) | castling_flag(side, CastlingSide::QueenSide)
}

/// A move from one square to another. Castling is the king's two-column
/// step; the rook relocation is derived when the move is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    /// Piece a pawn becomes on the last rank. `None` promotes to a queen.
    pub promotion: Option<PieceKind>,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// Long algebraic form, e.g. `e2e4` or `a7a8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}
