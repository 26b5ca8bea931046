//! Crate root module declarations for the ChessMind rules engine.
//!
//! This file exposes the position model, board geometry, the attack/pin
//! analyzer and move generator, the quiz book and the notation utilities
//! (FEN, SAN, PGN) so the REPL binary, tests and host applications can
//! import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod geometry {
    pub mod direction;
    pub mod square;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod tables {
    pub mod quiz_book;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod pgn;
    pub mod render_game_state;
    pub mod standard_algebraic;
}
