//! Line-oriented command loop over the rules engine.
//!
//! Commands: `position startpos`, `position fen <fen>`, `moves`,
//! `play <san>`, `check`, `perft <depth>`, `show`, `fen`, `quit`.

use std::io::{self, BufRead, Write};

use chessmind_rules::errors::ChessResult;
use chessmind_rules::game_state::game_state::GameState;
use chessmind_rules::move_generation::legal_move_apply::apply_legal_move;
use chessmind_rules::move_generation::legal_move_checks::{compute_check_state, CheckState};
use chessmind_rules::move_generation::legal_move_generator::legal_moves;
use chessmind_rules::move_generation::perft::perft_divide;
use chessmind_rules::utils::render_game_state::render_game_state;
use chessmind_rules::utils::standard_algebraic::{move_to_san, san_to_move};

/// Deepest `perft` the REPL runs.
const MAX_PERFT_DEPTH: u8 = 6;

fn main() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut repl = ReplState::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = repl.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

struct ReplState {
    game_state: GameState,
}

impl ReplState {
    fn new() -> Self {
        Self {
            game_state: GameState::new_game(),
        }
    }

    fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let (command, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        let rest = rest.trim();

        match command {
            "quit" | "exit" => return Ok(true),
            "position" => self.handle_position(rest, out)?,
            "moves" => report(out, self.list_moves())?,
            "play" => {
                let reply = self.play(rest);
                report(out, reply)?;
            }
            "check" => report(out, describe_check(&self.game_state))?,
            "perft" => match rest.parse::<u8>() {
                Ok(depth) if (1..=MAX_PERFT_DEPTH).contains(&depth) => {
                    report(out, divide(&self.game_state, depth))?
                }
                Ok(_) => writeln!(out, "error: perft depth must be 1..={MAX_PERFT_DEPTH}")?,
                Err(_) => writeln!(out, "error: perft needs a depth")?,
            },
            "show" => writeln!(out, "{}", render_game_state(&self.game_state))?,
            "fen" => writeln!(out, "{}", self.game_state.get_fen())?,
            _ => writeln!(out, "error: unknown command '{command}'")?,
        }

        Ok(false)
    }

    fn handle_position(&mut self, args: &str, out: &mut impl Write) -> io::Result<()> {
        let parsed = if args == "startpos" {
            Ok(GameState::new_game())
        } else if let Some(fen) = args.strip_prefix("fen ") {
            GameState::from_fen(fen.trim())
        } else {
            return writeln!(out, "error: expected 'startpos' or 'fen <fen>'");
        };

        match parsed {
            Ok(game_state) => {
                self.game_state = game_state;
                writeln!(out, "ok")
            }
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn list_moves(&self) -> ChessResult<String> {
        let sans = legal_moves(&self.game_state)?
            .into_iter()
            .map(|mv| move_to_san(&self.game_state, mv))
            .collect::<ChessResult<Vec<String>>>()?;
        Ok(format!("{} moves: {}", sans.len(), sans.join(" ")))
    }

    fn play(&mut self, san: &str) -> ChessResult<String> {
        let Some(parsed) = san_to_move(&self.game_state, san)? else {
            return Ok(format!("no legal move matches '{san}'"));
        };
        let formatted = move_to_san(&self.game_state, parsed.chess_move)?;
        self.game_state = apply_legal_move(&self.game_state, parsed.chess_move)?;
        Ok(format!("played {formatted}"))
    }
}

fn describe_check(game_state: &GameState) -> ChessResult<String> {
    Ok(match compute_check_state(game_state)? {
        CheckState::NotInCheck => "not in check".to_owned(),
        CheckState::CheckedByOnePiece { attacker, .. } => format!("check from {attacker}"),
        CheckState::CheckedByKnight { attacker } => format!("knight check from {attacker}"),
        CheckState::CheckedByTwoPieces => "double check".to_owned(),
    })
}

fn divide(game_state: &GameState, depth: u8) -> ChessResult<String> {
    let rows = perft_divide(game_state, depth)?;
    let total: usize = rows.iter().map(|(_, nodes)| nodes).sum();
    let mut out: Vec<String> = rows.iter().map(|(mv, nodes)| format!("{mv}: {nodes}")).collect();
    out.push(format!("total: {total}"));
    Ok(out.join("\n"))
}

fn report(out: &mut impl Write, reply: ChessResult<String>) -> io::Result<()> {
    match reply {
        Ok(text) => writeln!(out, "{text}"),
        Err(err) => writeln!(out, "error: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::ReplState;

    fn run(repl: &mut ReplState, line: &str) -> String {
        let mut out = Vec::new();
        repl.handle_command(line, &mut out).expect("writing to a Vec should succeed");
        String::from_utf8(out).expect("output should be UTF-8")
    }

    #[test]
    fn plays_moves_and_reports_fen() {
        let mut repl = ReplState::new();
        assert_eq!(run(&mut repl, "play e4"), "played e4\n");
        assert_eq!(run(&mut repl, "play Nf6"), "played Nf6\n");
        assert_eq!(
            run(&mut repl, "fen"),
            "rnbqkb1r/pppppppp/5n2/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 1 2\n"
        );
        assert_eq!(run(&mut repl, "play Ke3"), "no legal move matches 'Ke3'\n");
    }

    #[test]
    fn position_check_and_perft_commands() {
        let mut repl = ReplState::new();
        assert_eq!(run(&mut repl, "position fen 4k3/8/8/8/8/8/8/r3K3 w - - 0 1"), "ok\n");
        assert_eq!(run(&mut repl, "check"), "check from a1\n");
        assert!(run(&mut repl, "position fen nonsense").starts_with("error: "));

        assert_eq!(run(&mut repl, "position startpos"), "ok\n");
        assert!(run(&mut repl, "moves").starts_with("20 moves: "));
        assert!(run(&mut repl, "perft 2").ends_with("total: 400\n"));
        assert!(run(&mut repl, "perft 200").starts_with("error: perft depth must be"));
        assert!(run(&mut repl, "perft 0").starts_with("error: perft depth must be"));
        assert!(run(&mut repl, "frobnicate").starts_with("error: unknown command"));
        assert!(repl.handle_command("quit", &mut Vec::new()).expect("quit should succeed"));
    }
}
