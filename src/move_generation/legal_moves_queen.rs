use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::direction::Direction;
use crate::geometry::square::Square;
use crate::move_generation::legal_move_checks::pinned_directions;
use crate::move_generation::legal_move_shared::slide_destinations;

pub fn generate_queen_destinations(
    game_state: &GameState,
    from: Square,
    side: Side,
    out: &mut Vec<Square>,
) {
    let pin = pinned_directions(game_state, from);
    out.extend(slide_destinations(game_state, from, side, &Direction::ALL, pin));
}
