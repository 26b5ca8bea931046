//! Quiz positions keyed by FEN.
//!
//! Each position either lists the opponent replies worth rehearsing against
//! or records the reply the user is expected to find, with an explanation.
//! Notation is stored as SAN and resolved against the position on demand.

use std::collections::HashMap;

use rand::Rng;
use tracing::warn;

use crate::errors::ChessResult;
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;
use crate::utils::standard_algebraic::{san_to_move, ParsedSan};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quiz {
    /// Opponent replies that call for a precise answer, in SAN.
    OpponentMoves(Vec<String>),
    /// The reply the user should play here, in SAN.
    MyMove { san: String, explanation: String },
}

impl Quiz {
    fn notations(&self) -> Vec<&str> {
        match self {
            Quiz::OpponentMoves(moves) => moves.iter().map(String::as_str).collect(),
            Quiz::MyMove { san, .. } => vec![san.as_str()],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuizBook {
    by_fen: HashMap<String, Quiz>,
}

impl QuizBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `quiz` under the canonical form of `fen`.
    pub fn insert(&mut self, fen: &str, quiz: Quiz) -> ChessResult<()> {
        let key = generate_fen(&parse_fen(fen)?);
        self.by_fen.insert(key, quiz);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.by_fen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fen.is_empty()
    }

    pub fn quiz_for(&self, game_state: &GameState) -> Option<&Quiz> {
        self.by_fen.get(&game_state.get_fen())
    }

    /// A random listed opponent reply. `None` when the position has no
    /// entry, expects the user's move instead, or the chosen notation does
    /// not resolve.
    pub fn choose_opponent_reply<R: Rng + ?Sized>(
        &self,
        game_state: &GameState,
        rng: &mut R,
    ) -> ChessResult<Option<ParsedSan>> {
        let Some(Quiz::OpponentMoves(moves)) = self.quiz_for(game_state) else {
            return Ok(None);
        };
        if moves.is_empty() {
            return Ok(None);
        }

        let pick = rng.random_range(0..moves.len());
        san_to_move(game_state, &moves[pick])
    }

    /// The expected user reply and its explanation.
    pub fn expected_reply(&self, game_state: &GameState) -> ChessResult<Option<(ParsedSan, &str)>> {
        let Some(Quiz::MyMove { san, explanation }) = self.quiz_for(game_state) else {
            return Ok(None);
        };
        Ok(san_to_move(game_state, san)?.map(|parsed| (parsed, explanation.as_str())))
    }

    pub fn is_expected_reply(&self, game_state: &GameState, mv: Move) -> ChessResult<bool> {
        Ok(self
            .expected_reply(game_state)?
            .is_some_and(|(parsed, _)| parsed.chess_move == mv))
    }

    /// FEN keys with a notation that does not resolve to a legal move, sorted.
    pub fn unusable_entries(&self) -> Vec<String> {
        let mut unusable = Vec::new();

        for (fen, quiz) in &self.by_fen {
            let Ok(game_state) = parse_fen(fen) else {
                warn!(fen = %fen, "quiz key is not a valid FEN");
                unusable.push(fen.clone());
                continue;
            };

            let notations = quiz.notations();
            if notations.is_empty() {
                warn!(fen = %fen, "quiz entry lists no moves");
                unusable.push(fen.clone());
                continue;
            }

            for san in notations {
                if !matches!(san_to_move(&game_state, san), Ok(Some(_))) {
                    warn!(fen = %fen, san, "quiz move does not resolve");
                    unusable.push(fen.clone());
                    break;
                }
            }
        }

        unusable.sort();
        unusable
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{Quiz, QuizBook};
    use crate::errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Move;
    use crate::game_state::game_state::GameState;

    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";

    fn mv(from: &str, to: &str) -> Move {
        Move::new(
            from.parse().expect("origin should parse"),
            to.parse().expect("destination should parse"),
        )
    }

    fn book() -> QuizBook {
        let mut book = QuizBook::new();
        book.insert(
            AFTER_E4,
            Quiz::OpponentMoves(vec!["e5".to_owned(), "c5".to_owned(), "e6".to_owned()]),
        )
        .expect("quiz FEN should parse");
        book.insert(
            STARTING_POSITION_FEN,
            Quiz::MyMove {
                san: "e4".to_owned(),
                explanation: "Take the centre.".to_owned(),
            },
        )
        .expect("quiz FEN should parse");
        book
    }

    #[test]
    fn keys_are_canonicalised() {
        let mut book = QuizBook::new();
        book.insert(
            "  rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR   w KQkq - 0 1 ",
            Quiz::OpponentMoves(vec!["e4".to_owned()]),
        )
        .expect("quiz FEN should parse");
        assert!(book.quiz_for(&GameState::new_game()).is_some());
        assert_eq!(
            book.insert("not a fen", Quiz::OpponentMoves(Vec::new())),
            Err(ChessErrors::InvalidFenFieldCount(3))
        );
    }

    #[test]
    fn opponent_reply_is_one_of_the_listed_moves() {
        let book = book();
        let position = GameState::from_fen(AFTER_E4).expect("FEN should parse");
        let listed = [mv("e7", "e5"), mv("c7", "c5"), mv("e7", "e6")];

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let reply = book
                .choose_opponent_reply(&position, &mut rng)
                .expect("reply notation should parse")
                .expect("listed reply should resolve");
            assert!(listed.contains(&reply.chess_move));
        }

        // The start position expects the user's move, not an opponent reply.
        assert_eq!(
            book.choose_opponent_reply(&GameState::new_game(), &mut rng),
            Ok(None)
        );
    }

    #[test]
    fn expected_reply_carries_the_explanation() {
        let book = book();
        let start = GameState::new_game();
        let (reply, explanation) = book
            .expected_reply(&start)
            .expect("expected reply should parse")
            .expect("start position has an expected reply");
        assert_eq!(reply.chess_move, mv("e2", "e4"));
        assert_eq!(explanation, "Take the centre.");

        assert_eq!(book.is_expected_reply(&start, mv("e2", "e4")), Ok(true));
        assert_eq!(book.is_expected_reply(&start, mv("d2", "d4")), Ok(false));
    }

    #[test]
    fn unusable_entries_are_reported() {
        let mut book = book();
        assert!(book.unusable_entries().is_empty());

        book.insert(
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
            Quiz::MyMove {
                san: "Nf3".to_owned(),
                explanation: String::new(),
            },
        )
        .expect("quiz FEN should parse");
        assert_eq!(book.unusable_entries(), ["4k3/8/8/8/8/8/8/4K3 w - - 0 1"]);
    }
}
