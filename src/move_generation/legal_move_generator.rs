//! Full legal move generation pipeline.
//!
//! Per-piece generators produce theoretical destinations (pins honoured,
//! check ignored); this module filters them against the check state, expands
//! promotions and annotates the resulting moves.

use crate::errors::ChessResult;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::square::Square;
use crate::move_generation::legal_move_apply::{apply_move, castling_side_of};
use crate::move_generation::legal_move_checks::{
    compute_check_info, compute_check_state, is_protected_square, CheckInfo, CheckState,
};
use crate::move_generation::legal_move_shared::is_enemy_of;
use crate::move_generation::legal_moves_bishop::generate_bishop_destinations;
use crate::move_generation::legal_moves_king::generate_king_destinations;
use crate::move_generation::legal_moves_knight::generate_knight_destinations;
use crate::move_generation::legal_moves_pawn::{en_passant_victim_square, generate_pawn_destinations};
use crate::move_generation::legal_moves_queen::generate_queen_destinations;
use crate::move_generation::legal_moves_rook::generate_rook_destinations;
use crate::move_generation::move_generator::{
    GeneratedMove, MoveAnnotations, MoveGenResult, MoveGenerator,
};

/// Destinations for the piece on `from`, ignoring check but honouring pins.
pub fn theoretical_destinations(game_state: &GameState, from: Square) -> ChessResult<Vec<Square>> {
    let piece = game_state.occupant(from)?;
    let mut out = Vec::with_capacity(28);

    match piece.kind {
        PieceKind::Pawn => generate_pawn_destinations(game_state, from, piece.side, &mut out),
        PieceKind::Knight => generate_knight_destinations(game_state, from, piece.side, &mut out),
        PieceKind::Bishop => generate_bishop_destinations(game_state, from, piece.side, &mut out),
        PieceKind::Rook => generate_rook_destinations(game_state, from, piece.side, &mut out),
        PieceKind::Queen => generate_queen_destinations(game_state, from, piece.side, &mut out),
        PieceKind::King => generate_king_destinations(game_state, from, piece.side, &mut out),
    }

    Ok(out)
}

/// Squares the piece on `from` may legally move to. Pieces of the side not
/// to move have none.
pub fn legal_destinations(game_state: &GameState, from: Square) -> ChessResult<Vec<Square>> {
    let piece = game_state.occupant(from)?;
    if piece.side != game_state.side_to_move() {
        return Ok(Vec::new());
    }

    let check_info = compute_check_info(game_state)?;
    legal_destinations_with(game_state, from, piece, &check_info)
}

fn legal_destinations_with(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    check_info: &CheckInfo,
) -> ChessResult<Vec<Square>> {
    if piece.kind != PieceKind::King && check_info.check_state == CheckState::CheckedByTwoPieces {
        return Ok(Vec::new());
    }

    let mut destinations = theoretical_destinations(game_state, from)?;

    if piece.kind == PieceKind::King {
        destinations.retain(|to| {
            Some(*to) != check_info.opposite_side_of_check
                && !(is_enemy_of(game_state, *to, piece.side) && is_protected_square(game_state, *to))
        });
    } else if check_info.is_in_check() {
        destinations.retain(|to| {
            check_info.allows_non_king_move_to(*to)
                || en_passant_removes_checker(game_state, from, *to, piece, check_info)
        });
    }

    Ok(destinations)
}

// The en-passant capture lands beside the checking pawn, not on it.
fn en_passant_removes_checker(
    game_state: &GameState,
    from: Square,
    to: Square,
    piece: Piece,
    check_info: &CheckInfo,
) -> bool {
    let CheckState::CheckedByOnePiece { attacker, .. } = check_info.check_state else {
        return false;
    };
    piece.kind == PieceKind::Pawn
        && game_state.en_passant_square() == Some(to)
        && from.column() != to.column()
        && en_passant_victim_square(from, to) == Some(attacker)
}

/// Every legal move of the side to move. A pawn reaching the last rank
/// yields one move per promotion piece.
pub fn legal_moves(game_state: &GameState) -> ChessResult<Vec<Move>> {
    let side = game_state.side_to_move();
    let check_info = compute_check_info(game_state)?;
    let mut moves = Vec::with_capacity(64);

    for (from, piece) in game_state.pieces(side) {
        for to in legal_destinations_with(game_state, from, piece, &check_info)? {
            if piece.kind == PieceKind::Pawn && to.row() == side.promotion_row() {
                moves.extend(
                    PieceKind::PROMOTIONS
                        .into_iter()
                        .map(|kind| Move::with_promotion(from, to, kind)),
                );
            } else {
                moves.push(Move::new(from, to));
            }
        }
    }

    Ok(moves)
}

/// Capture, en-passant, castling and promotion flags for `mv` before it is
/// played.
pub fn structural_annotations(game_state: &GameState, mv: Move) -> ChessResult<MoveAnnotations> {
    let moved = game_state.occupant(mv.from)?;
    let is_pawn = moved.kind == PieceKind::Pawn;
    let is_en_passant = is_pawn
        && game_state.en_passant_square() == Some(mv.to)
        && mv.from.column() != mv.to.column()
        && game_state.is_empty(mv.to);

    Ok(MoveAnnotations {
        is_capture: game_state.piece_at(mv.to).is_some() || is_en_passant,
        is_en_passant,
        is_castling: moved.kind == PieceKind::King && castling_side_of(mv).is_some(),
        is_promotion: is_pawn && mv.to.row() == moved.side.promotion_row(),
        ..MoveAnnotations::default()
    })
}

pub struct LegalMoveGenerator;
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        self.generate_legal_moves_internal(game_state, true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        LegalMoveGenerator.generate_legal_moves_internal(game_state, false)
    }
}

impl LegalMoveGenerator {
    fn generate_legal_moves_internal(
        &self,
        game_state: &GameState,
        annotate: bool,
    ) -> MoveGenResult<Vec<GeneratedMove>> {
        let moves = legal_moves(game_state)?;
        let mut generated = Vec::with_capacity(moves.len());

        for chess_move in moves {
            let mut annotations = structural_annotations(game_state, chess_move)?;
            let game_after_move = apply_move(game_state, chess_move)?;

            if annotate {
                classify_check_annotations(&game_after_move, &mut annotations)?;
            }

            generated.push(GeneratedMove {
                chess_move,
                game_after_move,
                annotations,
            });
        }

        Ok(generated)
    }
}

fn classify_check_annotations(next: &GameState, annotations: &mut MoveAnnotations) -> ChessResult<()> {
    let check_state = compute_check_state(next)?;
    if !check_state.is_in_check() {
        return Ok(());
    }

    annotations.gives_check = true;
    annotations.is_double_check = check_state == CheckState::CheckedByTwoPieces;
    annotations.is_checkmate = legal_moves(next)?.is_empty();
    Ok(())
}
