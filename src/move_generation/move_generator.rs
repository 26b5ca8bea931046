use crate::errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;

pub type MoveGenResult<T> = ChessResult<T>;

/// Facts about a generated move. The structural flags are always filled in;
/// the check-related ones only by generators that annotate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub is_castling: bool,
    pub is_promotion: bool,
    pub gives_check: bool,
    pub is_double_check: bool,
    pub is_checkmate: bool,
}

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub chess_move: Move,
    pub game_after_move: GameState,
    pub annotations: MoveAnnotations,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>>;
}
