//! Standard algebraic notation (SAN) parsing and formatting.
//!
//! Parsing resolves the text against the legal moves of the given position:
//! malformed text is an error, while text that names no move (or several)
//! resolves to `Ok(None)`.

use tracing::debug;

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::{
    CAPTURE_NOTATION, CASTLING_LONG_NOTATION, CASTLING_SHORT_NOTATION, CHECKMATE_NOTATION,
    CHECK_NOTATION, PROMOTION_NOTATION,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::square::Square;
use crate::move_generation::legal_move_apply::{apply_move, castling_side_of};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{legal_destinations, legal_moves};
use crate::utils::algebraic::{algebraic_to_square, file_from_char, file_to_char, rank_from_char, rank_to_char};

/// A SAN string resolved against a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedSan {
    /// The move to apply. For castling this is the king's two-column step.
    pub chess_move: Move,
    /// Whether the text carried the capture marker.
    pub is_capture: bool,
    pub castling: Option<CastlingSide>,
}

impl ParsedSan {
    /// Piece relocations the move performs: the king move, then the rook
    /// move when castling.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves = vec![self.chess_move];
        if let Some(castling_side) = self.castling {
            let side = if self.chess_move.from.row() == Side::White.home_row() {
                Side::White
            } else {
                Side::Black
            };
            moves.push(Move::new(
                castling_side.rook_origin(side),
                castling_side.rook_destination(side),
            ));
        }
        moves
    }
}

/// Disambiguation text between the piece letter and the destination.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Disambiguator {
    file: Option<u8>,
    rank: Option<u8>,
}

impl Disambiguator {
    fn admits(self, square: Square) -> bool {
        self.file.map_or(true, |file| square.column() == file)
            && self.rank.map_or(true, |rank| square.row() == rank)
    }
}

pub fn san_to_move(game_state: &GameState, san: &str) -> ChessResult<Option<ParsedSan>> {
    let text = san
        .trim()
        .trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));
    if text.is_empty() {
        return Err(ChessErrors::InvalidAlgebraicString(san.to_owned()));
    }

    if let Some(castling_side) = castling_side_from_text(text) {
        return Ok(resolve_castling(game_state, castling_side, san));
    }

    let (body, promotion) = split_promotion(text, san)?;
    if body.len() < 2 || !body.is_ascii() {
        return Err(ChessErrors::InvalidAlgebraicString(san.to_owned()));
    }

    let (prefix, destination_text) = body.split_at(body.len() - 2);
    let destination = algebraic_to_square(destination_text)?;

    let mut prefix_chars = prefix.chars().peekable();
    let kind = match prefix_chars.peek().copied() {
        Some(ch) if ch.is_ascii_uppercase() => {
            prefix_chars.next();
            match PieceKind::from_char(ch) {
                Some(kind) if kind != PieceKind::Pawn => kind,
                _ => return Err(ChessErrors::InvalidAlgebraicChar(ch)),
            }
        }
        _ => PieceKind::Pawn,
    };

    let mut rest: Vec<char> = prefix_chars.collect();
    let is_capture = rest.last() == Some(&CAPTURE_NOTATION);
    if is_capture {
        rest.pop();
    }
    let disambiguator = parse_disambiguator(&rest, san)?;

    let side = game_state.side_to_move();
    let lands_on_enemy = game_state
        .piece_at(destination)
        .is_some_and(|piece| piece.side != side);
    let mut candidates = Vec::new();
    for (from, piece) in game_state.pieces(side) {
        if piece.kind != kind || !disambiguator.admits(from) {
            continue;
        }
        // A pawn capture changes file and a push does not; other pieces
        // may omit `x` but never claim a capture onto an empty square.
        let shape_matches = match kind {
            PieceKind::Pawn => is_capture == (from.column() != destination.column()),
            _ => lands_on_enemy || !is_capture,
        };
        if !shape_matches {
            continue;
        }
        if legal_destinations(game_state, from)?.contains(&destination) {
            candidates.push(from);
        }
    }

    let from = match candidates.as_slice() {
        [from] => *from,
        [] => {
            debug!(san, fen = %game_state.get_fen(), "SAN matches no legal move");
            return Ok(None);
        }
        _ => {
            debug!(san, candidates = candidates.len(), "SAN is ambiguous");
            return Ok(None);
        }
    };

    let reaches_last_rank = kind == PieceKind::Pawn && destination.row() == side.promotion_row();
    let chess_move = match (reaches_last_rank, promotion) {
        (true, promotion) => Move::with_promotion(from, destination, promotion.unwrap_or(PieceKind::Queen)),
        (false, None) => Move::new(from, destination),
        (false, Some(_)) => {
            debug!(san, "promotion suffix on a move that cannot promote");
            return Ok(None);
        }
    };

    Ok(Some(ParsedSan {
        chess_move,
        is_capture,
        castling: None,
    }))
}

fn castling_side_from_text(text: &str) -> Option<CastlingSide> {
    match text {
        CASTLING_SHORT_NOTATION | "0-0" => Some(CastlingSide::KingSide),
        CASTLING_LONG_NOTATION | "0-0-0" => Some(CastlingSide::QueenSide),
        _ => None,
    }
}

fn resolve_castling(game_state: &GameState, castling_side: CastlingSide, san: &str) -> Option<ParsedSan> {
    let side = game_state.side_to_move();
    let king = side.king_home();
    let destination = castling_side.king_destination(side);

    let is_legal = game_state.piece_at(king) == Some(Piece::new(PieceKind::King, side))
        && legal_destinations(game_state, king).is_ok_and(|dests| dests.contains(&destination));
    if !is_legal {
        debug!(san, fen = %game_state.get_fen(), "castling is not available");
        return None;
    }

    Some(ParsedSan {
        chess_move: Move::new(king, destination),
        is_capture: false,
        castling: Some(castling_side),
    })
}

// Accepts both `e8=Q` and `e8Q`.
fn split_promotion<'a>(text: &'a str, san: &str) -> ChessResult<(&'a str, Option<PieceKind>)> {
    if let Some((body, suffix)) = text.split_once(PROMOTION_NOTATION) {
        let mut chars = suffix.chars();
        return match (chars.next(), chars.next()) {
            (Some(letter), None) => Ok((body, Some(promotion_piece(letter)?))),
            _ => Err(ChessErrors::InvalidAlgebraicString(san.to_owned())),
        };
    }

    let mut chars = text.chars().rev();
    match (chars.next(), chars.next()) {
        (Some(letter), Some(rank)) if matches!(letter, 'Q' | 'R' | 'B' | 'N') && rank.is_ascii_digit() => {
            Ok((&text[..text.len() - 1], Some(promotion_piece(letter)?)))
        }
        _ => Ok((text, None)),
    }
}

fn promotion_piece(letter: char) -> ChessResult<PieceKind> {
    match PieceKind::from_char(letter) {
        Some(kind) if letter.is_ascii_uppercase() && PieceKind::PROMOTIONS.contains(&kind) => Ok(kind),
        _ => Err(ChessErrors::InvalidAlgebraicChar(letter)),
    }
}

fn parse_disambiguator(chars: &[char], san: &str) -> ChessResult<Disambiguator> {
    let mut disambiguator = Disambiguator::default();
    match chars {
        [] => {}
        [ch] => {
            if let Some(file) = file_from_char(*ch) {
                disambiguator.file = Some(file);
            } else if let Some(rank) = rank_from_char(*ch) {
                disambiguator.rank = Some(rank);
            } else {
                return Err(ChessErrors::InvalidAlgebraicChar(*ch));
            }
        }
        [file, rank] => {
            disambiguator.file = Some(file_from_char(*file).ok_or(ChessErrors::InvalidAlgebraicChar(*file))?);
            disambiguator.rank = Some(rank_from_char(*rank).ok_or(ChessErrors::InvalidAlgebraicChar(*rank))?);
        }
        _ => return Err(ChessErrors::InvalidAlgebraicString(san.to_owned())),
    }
    Ok(disambiguator)
}

/// SAN for `mv` in `game_state`, including check and mate suffixes.
pub fn move_to_san(game_state: &GameState, mv: Move) -> ChessResult<String> {
    let moved = game_state.occupant(mv.from)?;
    let side = moved.side;
    let is_en_passant = moved.kind == PieceKind::Pawn
        && game_state.en_passant_square() == Some(mv.to)
        && mv.from.column() != mv.to.column()
        && game_state.is_empty(mv.to);
    let is_capture = game_state.piece_at(mv.to).is_some() || is_en_passant;
    let destination = mv.to.to_string();

    let mut out = String::new();
    match moved.kind {
        PieceKind::King if castling_side_of(mv).is_some() => {
            out.push_str(match castling_side_of(mv) {
                Some(CastlingSide::QueenSide) => CASTLING_LONG_NOTATION,
                _ => CASTLING_SHORT_NOTATION,
            });
        }
        PieceKind::Pawn => {
            if is_capture {
                out.push(file_to_char(mv.from.column()));
                out.push(CAPTURE_NOTATION);
            }
            out.push_str(&destination);
            if mv.to.row() == side.promotion_row() {
                let promotion = mv.promotion.unwrap_or(PieceKind::Queen);
                out.push(PROMOTION_NOTATION);
                out.push(promotion.san_letter().unwrap_or('Q'));
            }
        }
        kind => {
            if let Some(letter) = kind.san_letter() {
                out.push(letter);
            }
            if kind != PieceKind::King {
                out.push_str(&disambiguation(game_state, mv, moved)?);
            }
            if is_capture {
                out.push(CAPTURE_NOTATION);
            }
            out.push_str(&destination);
        }
    }

    let next = apply_move(game_state, mv)?;
    if is_king_in_check(&next, side.opposite())? {
        if legal_moves(&next)?.is_empty() {
            out.push(CHECKMATE_NOTATION);
        } else {
            out.push(CHECK_NOTATION);
        }
    }

    Ok(out)
}

// File if it resolves, else rank, else the full origin square.
fn disambiguation(game_state: &GameState, mv: Move, moved: Piece) -> ChessResult<String> {
    let mut rivals = Vec::new();
    for (square, piece) in game_state.pieces(moved.side) {
        if square != mv.from && piece == moved && legal_destinations(game_state, square)?.contains(&mv.to) {
            rivals.push(square);
        }
    }

    let file = file_to_char(mv.from.column());
    let rank = rank_to_char(mv.from.row());
    Ok(if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|sq| sq.column() != mv.from.column()) {
        file.to_string()
    } else if rivals.iter().all(|sq| sq.row() != mv.from.row()) {
        rank.to_string()
    } else {
        format!("{file}{rank}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().expect("square should parse")
    }

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("FEN should parse")
    }

    fn san(game_state: &GameState, from: &str, to: &str) -> String {
        move_to_san(game_state, Move::new(sq(from), sq(to))).expect("SAN should format")
    }

    #[test]
    fn formats_common_moves() {
        let start = GameState::new_game();
        assert_eq!(san(&start, "e2", "e4"), "e4");
        assert_eq!(san(&start, "g1", "f3"), "Nf3");

        let kiwipete = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(san(&kiwipete, "e1", "g1"), "O-O");
        assert_eq!(san(&kiwipete, "e1", "c1"), "O-O-O");
        assert_eq!(san(&kiwipete, "e2", "a6"), "Bxa6");
        assert_eq!(san(&kiwipete, "d5", "e6"), "dxe6");
        assert_eq!(san(&kiwipete, "f3", "f6"), "Qxf6");
    }

    #[test]
    fn formats_en_passant_and_promotions() {
        let en_passant = game("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert_eq!(san(&en_passant, "e5", "d6"), "exd6");

        let promotion = game("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        assert_eq!(
            move_to_san(&promotion, Move::with_promotion(sq("e7"), sq("e8"), PieceKind::Knight))
                .expect("SAN should format"),
            "e8=N"
        );
        assert_eq!(san(&promotion, "e7", "e8"), "e8=Q");
    }

    #[test]
    fn disambiguates_by_file_then_rank_then_square() {
        let knights = game("k7/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert_eq!(san(&knights, "b1", "d2"), "Nbd2");

        let rooks = game("7k/8/8/R7/8/8/8/R3K3 w - - 0 1");
        assert_eq!(san(&rooks, "a1", "a3"), "R1a3");
        assert_eq!(san(&rooks, "a5", "a3"), "R5a3");

        let queens = game("7K/8/8/7k/8/Q7/8/Q1Q5 w - - 0 1");
        assert_eq!(san(&queens, "a1", "b2"), "Qa1b2");
        assert_eq!(san(&queens, "a3", "b2"), "Q3b2");
        assert_eq!(san(&queens, "c1", "b2"), "Qcb2");
    }

    #[test]
    fn appends_check_and_mate_suffixes() {
        let check = game("4k3/8/8/8/8/8/8/4K2R w K - 0 1");
        assert_eq!(san(&check, "h1", "h8"), "Rh8+");

        let back_rank = game("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        assert_eq!(san(&back_rank, "a1", "a8"), "Ra8#");

        let scholar = game("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR w KQkq - 2 3");
        assert_eq!(san(&scholar, "f3", "f7"), "Qxf7#");
    }

    #[test]
    fn parses_castling_with_rook_relocation() {
        let kiwipete = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let short = san_to_move(&kiwipete, "O-O")
            .expect("SAN should parse")
            .expect("O-O should be legal");
        assert_eq!(short.castling, Some(CastlingSide::KingSide));
        assert_eq!(
            short.moves(),
            [Move::new(sq("e1"), sq("g1")), Move::new(sq("h1"), sq("f1"))]
        );

        let long = san_to_move(&kiwipete, "0-0-0")
            .expect("SAN should parse")
            .expect("0-0-0 should be legal");
        assert_eq!(
            long.moves(),
            [Move::new(sq("e1"), sq("c1")), Move::new(sq("a1"), sq("d1"))]
        );

        assert_eq!(san_to_move(&GameState::new_game(), "O-O"), Ok(None));
    }

    #[test]
    fn parses_captures_promotions_and_annotations() {
        let kiwipete = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let capture = san_to_move(&kiwipete, "Bxa6!?")
            .expect("SAN should parse")
            .expect("Bxa6 should be legal");
        assert_eq!(capture.chess_move, Move::new(sq("e2"), sq("a6")));
        assert!(capture.is_capture);

        let promotion = game("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        for (text, kind) in [("e8=R+", PieceKind::Rook), ("e8N", PieceKind::Knight), ("e8", PieceKind::Queen)] {
            let parsed = san_to_move(&promotion, text)
                .expect("SAN should parse")
                .expect("promotion should be legal");
            assert_eq!(parsed.chess_move, Move::with_promotion(sq("e7"), sq("e8"), kind));
        }
    }

    #[test]
    fn unresolvable_text_is_none_and_malformed_text_is_an_error() {
        let start = GameState::new_game();
        assert_eq!(san_to_move(&start, "Nf6"), Ok(None));
        assert_eq!(san_to_move(&start, "e5"), Ok(None));

        let knights = game("k7/8/8/8/8/8/8/1N2KN2 w - - 0 1");
        assert_eq!(san_to_move(&knights, "Nd2"), Ok(None));
        assert!(san_to_move(&knights, "Nbd2")
            .expect("SAN should parse")
            .is_some());

        assert!(san_to_move(&start, "").is_err());
        assert!(san_to_move(&start, "e9").is_err());
        assert!(san_to_move(&start, "Zf3").is_err());
        assert!(san_to_move(&start, "Nzf3").is_err());
        assert!(san_to_move(&start, "e8=K").is_err());
    }

    #[test]
    fn capture_marker_must_match_the_move_shape() {
        let pawns = game("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        assert_eq!(san_to_move(&pawns, "d5"), Ok(None));
        let capture = san_to_move(&pawns, "exd5")
            .expect("SAN should parse")
            .expect("exd5 should be legal");
        assert_eq!(capture.chess_move, Move::new(sq("e4"), sq("d5")));
        assert_eq!(san_to_move(&pawns, "xe5"), Ok(None));

        let en_passant = game("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        assert_eq!(
            san_to_move(&en_passant, "exd6")
                .expect("SAN should parse")
                .map(|parsed| parsed.chess_move),
            Some(Move::new(sq("e5"), sq("d6")))
        );
        assert_eq!(san_to_move(&en_passant, "d6"), Ok(None));

        let start = GameState::new_game();
        assert_eq!(san_to_move(&start, "Nxf3"), Ok(None));
        assert!(san_to_move(&start, "Nf3")
            .expect("SAN should parse")
            .is_some());

        let knight_capture = game("4k3/8/8/8/8/5p2/8/4K1N1 w - - 0 1");
        let lenient = san_to_move(&knight_capture, "Nf3")
            .expect("SAN should parse")
            .expect("capture without marker should still resolve");
        assert_eq!(lenient.chess_move, Move::new(sq("g1"), sq("f3")));
        assert!(!lenient.is_capture);
    }

    #[test]
    fn formatted_moves_parse_back_to_themselves() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
            "7K/8/8/7k/8/Q7/8/Q1Q5 w - - 0 1",
            "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2",
        ] {
            let position = game(fen);
            for mv in legal_moves(&position).expect("move generation should succeed") {
                let text = move_to_san(&position, mv).expect("SAN should format");
                let parsed = san_to_move(&position, &text)
                    .expect("formatted SAN should parse")
                    .unwrap_or_else(|| panic!("{text} should resolve in {fen}"));
                assert_eq!(parsed.chess_move, mv, "{text} in {fen}");
            }
        }
    }
}
