use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::direction::Direction;
use crate::geometry::square::Square;
use crate::move_generation::legal_move_checks::{is_square_attacked, is_square_attacked_with_vacated};
use crate::move_generation::legal_move_shared::is_enterable_by;

/// Adjacent steps onto unattacked squares, plus castling.
pub fn generate_king_destinations(
    game_state: &GameState,
    from: Square,
    side: Side,
    out: &mut Vec<Square>,
) {
    let enemy = side.opposite();

    for direction in Direction::ALL {
        let Some(to) = from.step(direction) else {
            continue;
        };
        if is_enterable_by(game_state, to, side)
            && !is_square_attacked_with_vacated(game_state, to, enemy, from)
        {
            out.push(to);
        }
    }

    generate_castling_destinations(game_state, from, side, out);
}

fn generate_castling_destinations(
    game_state: &GameState,
    king_from: Square,
    side: Side,
    out: &mut Vec<Square>,
) {
    let enemy = side.opposite();

    if king_from != side.king_home() {
        return;
    }
    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    for castling_side in CastlingSide::ALL {
        if !game_state.has_castling_right(side, castling_side) {
            continue;
        }
        let rook_from = castling_side.rook_origin(side);
        if game_state.piece_at(rook_from) != Some(Piece::new(PieceKind::Rook, side)) {
            continue;
        }

        let row = side.home_row();
        let (low, high) = if rook_from.column() < king_from.column() {
            (rook_from.column(), king_from.column())
        } else {
            (king_from.column(), rook_from.column())
        };
        let path_is_clear = (low + 1..high)
            .filter_map(|column| Square::new(row, column))
            .all(|sq| game_state.is_empty(sq));
        if !path_is_clear {
            continue;
        }

        let destination = castling_side.king_destination(side);
        let (first, last) = if destination.column() < king_from.column() {
            (destination.column(), king_from.column() - 1)
        } else {
            (king_from.column() + 1, destination.column())
        };
        let transit_is_safe = (first..=last)
            .filter_map(|column| Square::new(row, column))
            .all(|sq| !is_square_attacked(game_state, sq, enemy));
        if transit_is_safe {
            out.push(destination);
        }
    }
}
