//! Perft: exhaustive legal-move tree counts used to validate the generator.

use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};

/// Leaf statistics. Check-related fields stay zero unless the generator
/// annotates checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub double_checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn record_leaf(&mut self, mv: &GeneratedMove) {
        let annotations = mv.annotations;
        self.nodes += 1;
        self.captures += usize::from(annotations.is_capture);
        self.en_passant += usize::from(annotations.is_en_passant);
        self.castles += usize::from(annotations.is_castling);
        self.promotions += usize::from(annotations.is_promotion);
        self.checks += usize::from(annotations.gives_check);
        self.double_checks += usize::from(annotations.is_double_check);
        self.checkmates += usize::from(annotations.is_checkmate);
    }
}

pub fn perft<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(game_state)? {
        perft_recurse(generator, &mv, depth, 1, &mut total)?;
    }

    Ok(total)
}

/// Node count only, using the non-annotating generator.
pub fn perft_legal(game_state: &GameState, depth: u8) -> MoveGenResult<usize> {
    Ok(perft(&FastLegalMoveGenerator, game_state, depth)?.nodes)
}

/// Node counts below each root move, in generation order.
pub fn perft_divide(game_state: &GameState, depth: u8) -> MoveGenResult<Vec<(Move, usize)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    FastLegalMoveGenerator
        .generate_legal_moves(game_state)?
        .into_iter()
        .map(|root| -> MoveGenResult<(Move, usize)> {
            let nodes = perft(&FastLegalMoveGenerator, &root.game_after_move, depth - 1)?.nodes;
            Ok((root.chess_move, nodes))
        })
        .collect()
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if current_depth == search_depth {
        counts.record_leaf(mv);
        return Ok(());
    }

    for child in generator.generate_legal_moves(&mv.game_after_move)? {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts)?;
    }

    Ok(())
}
