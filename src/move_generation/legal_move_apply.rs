//! Move application.
//!
//! `apply_move` trusts its input and only moves pieces; `apply_legal_move`
//! validates against the legal destinations first.

use tracing::trace;

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::square::Square;
use crate::move_generation::legal_move_generator::legal_destinations;
use crate::move_generation::legal_moves_pawn::en_passant_victim_square;

/// Returns the position after `mv`. Check is not consulted.
pub fn apply_move(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    let moved = game_state.occupant(mv.from)?;
    let side = moved.side;
    let mut next = game_state.clone();

    let mut is_capture = game_state.piece_at(mv.to).is_some();
    let mut placed = moved;

    next.set_piece(mv.from, None);

    match moved.kind {
        PieceKind::Pawn => {
            let is_en_passant = game_state.en_passant_square() == Some(mv.to)
                && mv.from.column() != mv.to.column()
                && !is_capture;
            if is_en_passant {
                if let Some(victim) = en_passant_victim_square(mv.from, mv.to) {
                    next.set_piece(victim, None);
                    is_capture = true;
                }
            }

            if mv.to.row() == side.promotion_row() {
                let kind = mv
                    .promotion
                    .filter(|kind| PieceKind::PROMOTIONS.contains(kind))
                    .unwrap_or(PieceKind::Queen);
                placed = Piece::new(kind, side);
            }
        }
        PieceKind::King => {
            if let Some(castling_side) = castling_side_of(mv) {
                let rook_from = castling_side.rook_origin(side);
                let rook = next.piece_at(rook_from);
                next.set_piece(rook_from, None);
                next.set_piece(castling_side.rook_destination(side), rook);
            }
            next.castling_rights &= !castling_flags_for(side);
        }
        _ => {}
    }

    next.set_piece(mv.to, Some(placed));

    next.en_passant_square = if moved.kind == PieceKind::Pawn && mv.from.row().abs_diff(mv.to.row()) == 2 {
        Square::new((mv.from.row() + mv.to.row()) / 2, mv.from.column())
    } else {
        None
    };

    revoke_stale_castling_rights(&mut next);

    next.halfmove_clock = if moved.kind == PieceKind::Pawn || is_capture {
        0
    } else {
        game_state.halfmove_clock().saturating_add(1)
    };
    if game_state.side_to_move() == Side::Black {
        next.fullmove_number = game_state.fullmove_number().saturating_add(1);
    }
    next.side_to_move.toggle();

    trace!(chess_move = %mv, fen = %next.get_fen(), "applied move");
    Ok(next)
}

/// Applies `mv` only if it is one of the legal moves of the side to move.
pub fn apply_legal_move(game_state: &GameState, mv: Move) -> ChessResult<GameState> {
    let moved = game_state.occupant(mv.from)?;
    if moved.side != game_state.side_to_move()
        || !legal_destinations(game_state, mv.from)?.contains(&mv.to)
    {
        return Err(ChessErrors::IllegalMove(mv));
    }
    apply_move(game_state, mv)
}

/// Castling side when `mv` is a king's two-column step from its home square.
pub fn castling_side_of(mv: Move) -> Option<CastlingSide> {
    if mv.from.row() != mv.to.row() || mv.from.column().abs_diff(mv.to.column()) != 2 {
        return None;
    }
    CastlingSide::from_king_destination_column(mv.to.column())
}

// A right survives only while its king and rook are both still at home,
// which also covers a rook captured where it stands.
fn revoke_stale_castling_rights(game_state: &mut GameState) {
    for side in [Side::White, Side::Black] {
        let king_home = game_state.piece_at(side.king_home()) == Some(Piece::new(PieceKind::King, side));
        for castling_side in CastlingSide::ALL {
            let rook_home = game_state.piece_at(castling_side.rook_origin(side))
                == Some(Piece::new(PieceKind::Rook, side));
            if !king_home || !rook_home {
                game_state.castling_rights &= !castling_flag(side, castling_side);
            }
        }
    }
}
