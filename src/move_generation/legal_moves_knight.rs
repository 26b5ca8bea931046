use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::direction::KnightStep;
use crate::geometry::square::Square;
use crate::move_generation::legal_move_checks::pinned_directions;
use crate::move_generation::legal_move_shared::is_enterable_by;

/// A pinned knight has no destinations: none of its steps stay on the pin line.
pub fn generate_knight_destinations(
    game_state: &GameState,
    from: Square,
    side: Side,
    out: &mut Vec<Square>,
) {
    if pinned_directions(game_state, from).is_some() {
        return;
    }

    out.extend(
        KnightStep::ALL
            .into_iter()
            .filter_map(|step| from.knight_step(step))
            .filter(|to| is_enterable_by(game_state, *to, side)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_knight_has_two_steps() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_knight_destinations(&game, "a1".parse().expect("a1 should parse"), Side::White, &mut out);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn friendly_squares_are_skipped_and_pins_freeze() {
        let game = GameState::new_game();
        let mut out = Vec::new();
        generate_knight_destinations(&game, "g1".parse().expect("g1 should parse"), Side::White, &mut out);
        let mut names: Vec<String> = out.iter().map(|sq| sq.to_string()).collect();
        names.sort();
        assert_eq!(names, ["f3", "h3"]);

        let pinned = GameState::from_fen("4k3/4r3/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_knight_destinations(&pinned, "e2".parse().expect("e2 should parse"), Side::White, &mut out);
        assert!(out.is_empty());
    }
}
