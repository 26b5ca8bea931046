use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::direction::Direction;
use crate::geometry::square::Square;
use crate::move_generation::legal_move_checks::pinned_directions;
use crate::move_generation::legal_move_shared::slide_destinations;

pub fn generate_rook_destinations(
    game_state: &GameState,
    from: Square,
    side: Side,
    out: &mut Vec<Square>,
) {
    let pin = pinned_directions(game_state, from);
    out.extend(slide_destinations(game_state, from, side, &Direction::ORTHOGONALS, pin));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_on_open_board_reaches_fourteen_squares() {
        let game = GameState::from_fen("7k/8/8/8/3R4/8/8/K7 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_rook_destinations(&game, "d4".parse().expect("d4 should parse"), Side::White, &mut out);
        assert_eq!(out.len(), 14);
    }

    #[test]
    fn rook_pinned_on_a_rank_stays_on_it() {
        let game = GameState::from_fen("4k3/8/8/8/K2R3q/8/8/8 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_rook_destinations(&game, "d4".parse().expect("d4 should parse"), Side::White, &mut out);
        let mut names: Vec<String> = out.iter().map(|sq| sq.to_string()).collect();
        names.sort();
        assert_eq!(names, ["b4", "c4", "e4", "f4", "g4", "h4"]);
    }
}
