use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::square::Square;
use crate::move_generation::legal_move_checks::{is_square_attacked, pinned_directions};
use crate::move_generation::legal_move_shared::{directions_within_pin, is_enemy_of};

/// Pushes, captures and en-passant captures for the pawn of `side` on `from`.
pub fn generate_pawn_destinations(
    game_state: &GameState,
    from: Square,
    side: Side,
    out: &mut Vec<Square>,
) {
    let pin = pinned_directions(game_state, from);
    let forward = side.pawn_direction();

    if directions_within_pin(&[forward], pin).next().is_some() {
        if let Some(one_step) = from.step(forward).filter(|sq| game_state.is_empty(*sq)) {
            out.push(one_step);

            if from.row() == side.pawn_start_row() {
                if let Some(two_step) = one_step.step(forward).filter(|sq| game_state.is_empty(*sq)) {
                    out.push(two_step);
                }
            }
        }
    }

    for direction in directions_within_pin(&side.pawn_capture_directions(), pin) {
        let Some(to) = from.step(direction) else {
            continue;
        };

        if is_enemy_of(game_state, to, side) {
            out.push(to);
        } else if en_passant_capture_is_available(game_state, from, to, side) {
            out.push(to);
        }
    }
}

/// Square of the pawn an en-passant capture onto `to` removes.
#[inline]
pub fn en_passant_victim_square(from: Square, to: Square) -> Option<Square> {
    Square::new(from.row(), to.column())
}

fn en_passant_capture_is_available(
    game_state: &GameState,
    from: Square,
    to: Square,
    side: Side,
) -> bool {
    if game_state.side_to_move() != side || game_state.en_passant_square() != Some(to) {
        return false;
    }
    let Some(victim) = en_passant_victim_square(from, to) else {
        return false;
    };
    if game_state.piece_at(victim) != Some(Piece::new(PieceKind::Pawn, side.opposite())) {
        return false;
    }

    // Both pawns leave their rank at once, which can open a line onto the
    // king that no pin check sees.
    let Ok(king) = game_state.king_square(side) else {
        return true;
    };
    let mut after = game_state.clone();
    after.set_piece(from, None);
    after.set_piece(victim, None);
    after.set_piece(to, Some(Piece::new(PieceKind::Pawn, side)));
    !is_square_attacked(&after, king, side.opposite())
}
