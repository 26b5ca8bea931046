use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::direction::Direction;
use crate::geometry::square::Square;

/// First occupied square walking from `from` toward `direction`.
///
/// `vacated` is treated as empty, which lets king-safety queries look
/// through the square the king is leaving.
#[inline]
pub fn first_piece_along(
    game_state: &GameState,
    from: Square,
    direction: Direction,
    vacated: Option<Square>,
) -> Option<(Square, Piece)> {
    from.ray(direction)
        .filter(|sq| Some(*sq) != vacated)
        .find_map(|sq| game_state.piece_at(sq).map(|piece| (sq, piece)))
}

#[inline]
pub fn is_enemy_of(game_state: &GameState, square: Square, side: Side) -> bool {
    matches!(game_state.piece_at(square), Some(piece) if piece.side != side)
}

/// Whether `square` may be entered by a piece of `side` (empty or enemy).
#[inline]
pub fn is_enterable_by(game_state: &GameState, square: Square, side: Side) -> bool {
    match game_state.piece_at(square) {
        None => true,
        Some(piece) => piece.side != side,
    }
}

/// `directions` narrowed to a pin axis, if any.
#[inline]
pub fn directions_within_pin(
    directions: &[Direction],
    pin: Option<[Direction; 2]>,
) -> impl Iterator<Item = Direction> + '_ {
    directions
        .iter()
        .copied()
        .filter(move |dir| pin.map_or(true, |axis| axis.contains(dir)))
}

/// Ray-projected destinations for a slider of `side` on `from`.
///
/// Each ray stops at the first occupied square, which is included only when
/// it holds an enemy piece.
pub fn slide_destinations(
    game_state: &GameState,
    from: Square,
    side: Side,
    directions: &[Direction],
    pin: Option<[Direction; 2]>,
) -> Vec<Square> {
    let mut out = Vec::with_capacity(14);

    for direction in directions_within_pin(directions, pin) {
        for to in from.ray(direction) {
            match game_state.piece_at(to) {
                None => out.push(to),
                Some(piece) => {
                    if piece.side != side {
                        out.push(to);
                    }
                    break;
                }
            }
        }
    }

    out
}
