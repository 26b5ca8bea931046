use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::direction::Direction;
use crate::geometry::square::Square;
use crate::move_generation::legal_move_checks::pinned_directions;
use crate::move_generation::legal_move_shared::slide_destinations;

pub fn generate_bishop_destinations(
    game_state: &GameState,
    from: Square,
    side: Side,
    out: &mut Vec<Square>,
) {
    let pin = pinned_directions(game_state, from);
    out.extend(slide_destinations(game_state, from, side, &Direction::DIAGONALS, pin));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bishop_pinned_on_a_file_cannot_move() {
        let game = GameState::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_bishop_destinations(&game, "e2".parse().expect("e2 should parse"), Side::White, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn bishop_pinned_on_a_diagonal_slides_along_it() {
        let game = GameState::from_fen("4k3/8/8/b7/8/8/3B4/4K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_bishop_destinations(&game, "d2".parse().expect("d2 should parse"), Side::White, &mut out);
        let mut names: Vec<String> = out.iter().map(|sq| sq.to_string()).collect();
        names.sort();
        assert_eq!(names, ["a5", "b4", "c3"]);
    }
}
