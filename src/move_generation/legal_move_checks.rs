//! Attack, check and pin analysis.
//!
//! Attack queries look outward from the target square and never consult
//! check state or pins, so legal-move generation can depend on them without
//! recursing back into itself.

use crate::errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::direction::{Direction, KnightStep};
use crate::geometry::square::Square;
use crate::move_generation::legal_move_shared::first_piece_along;

/// State of the side-to-move's king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    NotInCheck,

    /// Checked by one piece standing on a line from the king. `direction`
    /// leads from the king toward the attacker. The king escapes by moving,
    /// capturing the attacker, or (for distant sliders) by an interposition.
    CheckedByOnePiece {
        attacker: Square,
        direction: Direction,
    },

    /// Checked by a knight: it can only be captured or stepped away from.
    CheckedByKnight { attacker: Square },

    /// Two attackers at once; only king moves are legal.
    CheckedByTwoPieces,
}

impl CheckState {
    #[inline]
    pub fn is_in_check(&self) -> bool {
        !matches!(self, CheckState::NotInCheck)
    }
}

/// Check state plus the derived squares the generator filters with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    pub check_state: CheckState,
    /// Attacker square plus interposition squares. Empty unless in a single
    /// (line or knight) check.
    pub valid_squares_for_non_king_pieces: Vec<Square>,
    /// Square behind the king on a sliding checker's line.
    pub opposite_side_of_check: Option<Square>,
}

impl CheckInfo {
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.check_state.is_in_check()
    }

    /// Whether a non-king piece landing on `to` is compatible with the check.
    pub fn allows_non_king_move_to(&self, to: Square) -> bool {
        match self.check_state {
            CheckState::NotInCheck => true,
            CheckState::CheckedByTwoPieces => false,
            CheckState::CheckedByOnePiece { .. } | CheckState::CheckedByKnight { .. } => {
                self.valid_squares_for_non_king_pieces.contains(&to)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Attacker {
    square: Square,
    kind: PieceKind,
    // From the target toward the attacker; `None` for knights.
    line: Option<Direction>,
}

fn attackers_through(
    game_state: &GameState,
    target: Square,
    attacker_side: Side,
    vacated: Option<Square>,
) -> Vec<Attacker> {
    let mut attackers = Vec::new();

    for direction in Direction::ALL {
        let Some((square, piece)) = first_piece_along(game_state, target, direction, vacated) else {
            continue;
        };
        if piece.side != attacker_side {
            continue;
        }

        let adjacent = target.step(direction) == Some(square);
        let attacks = match piece.kind {
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                piece.kind.slides_along(direction)
            }
            PieceKind::King => adjacent,
            PieceKind::Pawn => {
                adjacent
                    && attacker_side
                        .pawn_capture_directions()
                        .contains(&direction.opposite())
            }
            PieceKind::Knight => false,
        };

        if attacks {
            attackers.push(Attacker {
                square,
                kind: piece.kind,
                line: Some(direction),
            });
        }
    }

    for step in KnightStep::ALL {
        let Some(square) = target.knight_step(step) else {
            continue;
        };
        if game_state.piece_at(square) == Some(Piece::new(PieceKind::Knight, attacker_side)) {
            attackers.push(Attacker {
                square,
                kind: PieceKind::Knight,
                line: None,
            });
        }
    }

    attackers
}

#[inline]
pub fn king_square(game_state: &GameState, side: Side) -> ChessResult<Square> {
    game_state.king_square(side)
}

/// Pieces of `attacker_side` attacking `square`.
pub fn attackers_to_square(
    game_state: &GameState,
    square: Square,
    attacker_side: Side,
) -> Vec<(Square, PieceKind)> {
    attackers_through(game_state, square, attacker_side, None)
        .into_iter()
        .map(|a| (a.square, a.kind))
        .collect()
}

#[inline]
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_side: Side) -> bool {
    !attackers_through(game_state, square, attacker_side, None).is_empty()
}

/// Attack query with `vacated` treated as empty, for a king stepping away
/// along a checking line.
#[inline]
pub(crate) fn is_square_attacked_with_vacated(
    game_state: &GameState,
    square: Square,
    attacker_side: Side,
    vacated: Square,
) -> bool {
    !attackers_through(game_state, square, attacker_side, Some(vacated)).is_empty()
}

pub fn is_king_in_check(game_state: &GameState, side: Side) -> ChessResult<bool> {
    let king = game_state.king_square(side)?;
    Ok(is_square_attacked(game_state, king, side.opposite()))
}

/// Classifies how the side to move's king is attacked.
pub fn compute_check_state(game_state: &GameState) -> ChessResult<CheckState> {
    Ok(compute_check_info(game_state)?.check_state)
}

pub fn compute_check_info(game_state: &GameState) -> ChessResult<CheckInfo> {
    let side = game_state.side_to_move();
    let king = game_state.king_square(side)?;
    let attackers = attackers_through(game_state, king, side.opposite(), None);

    let info = match attackers.as_slice() {
        [] => CheckInfo {
            check_state: CheckState::NotInCheck,
            valid_squares_for_non_king_pieces: Vec::new(),
            opposite_side_of_check: None,
        },
        [attacker] => match attacker.line {
            Some(direction) => {
                let mut valid = Vec::new();
                for square in king.ray(direction) {
                    valid.push(square);
                    if square == attacker.square {
                        break;
                    }
                }

                let is_slider = matches!(
                    attacker.kind,
                    PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
                );

                CheckInfo {
                    check_state: CheckState::CheckedByOnePiece {
                        attacker: attacker.square,
                        direction,
                    },
                    valid_squares_for_non_king_pieces: valid,
                    opposite_side_of_check: if is_slider {
                        king.step(direction.opposite())
                    } else {
                        None
                    },
                }
            }
            None => CheckInfo {
                check_state: CheckState::CheckedByKnight {
                    attacker: attacker.square,
                },
                valid_squares_for_non_king_pieces: vec![attacker.square],
                opposite_side_of_check: None,
            },
        },
        _ => CheckInfo {
            check_state: CheckState::CheckedByTwoPieces,
            valid_squares_for_non_king_pieces: Vec::new(),
            opposite_side_of_check: None,
        },
    };

    Ok(info)
}

/// Axis the piece on `square` is pinned to against its own king, if any.
///
/// Kings and empty squares are never pinned.
pub fn pinned_directions(game_state: &GameState, square: Square) -> Option<[Direction; 2]> {
    let piece = game_state.piece_at(square)?;
    if piece.kind == PieceKind::King {
        return None;
    }

    for direction in Direction::ALL {
        let Some((_, found)) = first_piece_along(game_state, square, direction, None) else {
            continue;
        };
        if found != Piece::new(PieceKind::King, piece.side) {
            continue;
        }

        // Only one king, so only one line can pin.
        return match first_piece_along(game_state, square, direction.opposite(), None) {
            Some((_, pinner)) if pinner.side != piece.side && pinner.kind.slides_along(direction) => {
                Some(direction.axis())
            }
            _ => None,
        };
    }

    None
}

/// Whether the piece on `square` is defended by another piece of its side.
pub fn is_protected_square(game_state: &GameState, square: Square) -> bool {
    match game_state.piece_at(square) {
        Some(piece) => is_square_attacked(game_state, square, piece.side),
        None => false,
    }
}
