//! FEN-to-GameState parser.
//!
//! Accepts exactly six whitespace-separated fields and reports the first
//! malformed one as a `ChessErrors` value.

use crate::errors::{ChessErrors, ChessResult};
use crate::game_state::chess_rules::FEN_EMPTY_FIELD;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::geometry::square::Square;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let &[board_part, side_part, castling_part, en_passant_part, halfmove_part, fullmove_part] =
        fields.as_slice()
    else {
        return Err(ChessErrors::InvalidFenFieldCount(fields.len()));
    };

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = parse_counter("halfmove clock", halfmove_part)?;
    game_state.fullmove_number = parse_counter("fullmove number", fullmove_part)?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFenRank(board_part.to_owned()));
    }

    // FEN lists rank 8 first.
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = 7 - fen_rank_idx as u8;
        let mut column = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFenToken(ch));
                }
                column += empty_count as u8;
                if column > 8 {
                    return Err(ChessErrors::InvalidFenRank((*rank_str).to_owned()));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or(ChessErrors::InvalidFenToken(ch))?;
            let square =
                Square::new(row, column).ok_or_else(|| ChessErrors::InvalidFenRank((*rank_str).to_owned()))?;
            game_state.set_piece(square, Some(piece));
            column += 1;
        }

        if column != 8 {
            return Err(ChessErrors::InvalidFenRank((*rank_str).to_owned()));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Side> {
    match side_part {
        "w" => Ok(Side::White),
        "b" => Ok(Side::Black),
        _ => Err(invalid_field("side to move", side_part)),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == FEN_EMPTY_FIELD {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        let flag = match ch {
            'K' => CASTLE_WHITE_KINGSIDE,
            'Q' => CASTLE_WHITE_QUEENSIDE,
            'k' => CASTLE_BLACK_KINGSIDE,
            'q' => CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid_field("castling rights", castling_part)),
        };
        // Letters appear at most once, in KQkq order.
        if rights >= flag {
            return Err(invalid_field("castling rights", castling_part));
        }
        rights |= flag;
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == FEN_EMPTY_FIELD {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid_field("en passant square", en_passant_part))?;
    // Only the square a double step skips can be a target.
    if square.row() != 2 && square.row() != 5 {
        return Err(invalid_field("en passant square", en_passant_part));
    }
    Ok(Some(square))
}

fn parse_counter(field: &'static str, value: &str) -> ChessResult<u16> {
    value.parse::<u16>().map_err(|_| invalid_field(field, value))
}

fn invalid_field(field: &'static str, value: &str) -> ChessErrors {
    ChessErrors::InvalidFenField {
        field,
        value: value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ChessErrors;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Piece, PieceKind, Side};
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&game_state));

        assert_eq!(game_state.side_to_move(), Side::White);
        assert_eq!(game_state.fullmove_number(), 1);
        assert_eq!(game_state.halfmove_clock(), 0);
        assert_eq!(
            game_state.piece_at("a8".parse().expect("a8 should parse")),
            Some(Piece::new(PieceKind::Rook, Side::Black))
        );
    }

    #[test]
    fn en_passant_and_counters_are_read() {
        let game_state = parse_fen("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2")
            .expect("FEN should parse");
        assert_eq!(game_state.en_passant_square(), Some("e6".parse().expect("e6 should parse")));
        assert_eq!(game_state.fullmove_number(), 2);
    }

    #[test]
    fn malformed_fens_are_rejected() {
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/8 w - -"),
            Err(ChessErrors::InvalidFenFieldCount(4))
        );
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/8 w - - 0 1 extra"),
            Err(ChessErrors::InvalidFenFieldCount(7))
        );
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8 w - - 0 1"),
            Err(ChessErrors::InvalidFenRank("8/8/8/8/8/8/8".to_owned()))
        );
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/7 w - - 0 1"),
            Err(ChessErrors::InvalidFenRank("7".to_owned()))
        );
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/4K2R1 w - - 0 1"),
            Err(ChessErrors::InvalidFenRank("4K2R1".to_owned()))
        );
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/4X3 w - - 0 1"),
            Err(ChessErrors::InvalidFenToken('X'))
        );
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(ChessErrors::InvalidFenField { field: "side to move", .. })
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w KX - 0 1"),
            Err(ChessErrors::InvalidFenField { field: "castling rights", .. })
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w - e4 0 1"),
            Err(ChessErrors::InvalidFenField { field: "en passant square", .. })
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/8 w - - x 1"),
            Err(ChessErrors::InvalidFenField { field: "halfmove clock", .. })
        ));
    }

    #[test]
    fn castling_letters_must_be_unique_and_in_kqkq_order() {
        for castling in ["QKqk", "KK", "kK", "Kqk", "qq"] {
            let fen = format!("r3k2r/8/8/8/8/8/8/R3K2R w {castling} - 0 1");
            assert!(
                matches!(
                    parse_fen(&fen),
                    Err(ChessErrors::InvalidFenField { field: "castling rights", .. })
                ),
                "{castling} should be rejected"
            );
        }

        for castling in ["KQkq", "Kq", "Qk", "q"] {
            let fen = format!("r3k2r/8/8/8/8/8/8/R3K2R w {castling} - 0 1");
            let game_state = parse_fen(&fen).expect("ordered castling rights should parse");
            assert_eq!(game_state.get_fen(), fen);
        }
    }
}
