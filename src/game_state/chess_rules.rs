//! Canonical chess-rule constants.
//!
//! Static rule-related literals shared by the position model and the
//! notation codecs.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// SAN literal for castling short.
pub const CASTLING_SHORT_NOTATION: &str = "O-O";

/// SAN literal for castling long.
pub const CASTLING_LONG_NOTATION: &str = "O-O-O";

/// SAN capture marker.
pub const CAPTURE_NOTATION: char = 'x';

/// SAN suffix for a move that gives check.
pub const CHECK_NOTATION: char = '+';

/// SAN suffix for a move that gives checkmate.
pub const CHECKMATE_NOTATION: char = '#';

/// SAN separator before a promotion piece letter.
pub const PROMOTION_NOTATION: char = '=';

/// FEN placeholder for an empty castling-rights or en-passant field.
pub const FEN_EMPTY_FIELD: &str = "-";

/// Column of both kings before they move.
pub const KING_HOME_COLUMN: u8 = 4;
