//! UCI front-end.
//!
//! Only fixed-depth search is supported: time controls in `go` are ignored
//! and the depth comes from the configuration or `setoption name Depth`.

use std::io::{self, BufRead, Write};

use chess_core::{board_from_position_command, Board, Color};
use minimax_engine::{Engine, Score, INFINITY, MATE_SCORE, MAX_DEPTH};
use tracing::{debug, warn};

pub struct UciSession<E> {
    start: Board,
    board: Board,
    engine: E,
    depth: u8,
}

impl<E: Engine> UciSession<E> {
    /// `start` is what `ucinewgame` goes back to.
    pub fn new(start: Board, engine: E, depth: u8) -> Self {
        Self {
            board: start.clone(),
            start,
            engine,
            depth,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Handles one command line. Returns `false` once the GUI sent `quit`.
    pub fn handle(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(true);
        };

        match command {
            "uci" => {
                writeln!(out, "id name {}", self.engine.name())?;
                writeln!(out, "id author minimax-chess")?;
                writeln!(
                    out,
                    "option name Depth type spin default {} min 1 max {}",
                    self.depth, MAX_DEPTH
                )?;
                writeln!(out, "uciok")?;
            }
            "isready" => writeln!(out, "readyok")?,
            "setoption" => self.set_option(args),
            "ucinewgame" => {
                self.board = self.start.clone();
                self.engine.new_game();
            }
            "position" => match board_from_position_command(args) {
                Ok(board) => self.board = board,
                Err(err) => warn!(error = %err, "ignoring position command"),
            },
            "go" => self.go(out)?,
            "quit" => return Ok(false),
            other => debug!(command = other, "unknown UCI command"),
        }
        out.flush()?;
        Ok(true)
    }

    /// `setoption name Depth value N`
    fn set_option(&mut self, args: &[&str]) {
        let value_after = |key: &str| {
            args.iter()
                .position(|&a| a == key)
                .and_then(|i| args.get(i + 1).copied())
        };
        if !value_after("name").is_some_and(|name| name.eq_ignore_ascii_case("depth")) {
            return;
        }
        match value_after("value").and_then(|v| v.parse::<u8>().ok()) {
            Some(depth) => self.depth = depth.clamp(1, MAX_DEPTH),
            None => warn!(?args, "bad Depth option"),
        }
    }

    fn go(&mut self, out: &mut impl Write) -> io::Result<()> {
        let result = self.engine.choose_move(&mut self.board, self.depth);
        let white_to_move = self.board.side_to_move() == Color::White;
        writeln!(
            out,
            "info depth {} score {} nodes {}",
            result.depth,
            uci_score(result.score, result.depth, white_to_move),
            result.nodes
        )?;
        match result.best_move {
            Some(mv) => writeln!(out, "bestmove {mv}"),
            None => writeln!(out, "bestmove 0000"),
        }
    }
}

/// Reads commands until `quit` or end of input.
pub fn run<E: Engine>(
    session: &mut UciSession<E>,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<()> {
    for line in input.lines() {
        if !session.handle(&line?, &mut out)? {
            break;
        }
    }
    Ok(())
}

/// Converts a White-relative search score into a UCI `score` field, which is
/// relative to the side to move. Material scores are reported in centipawns.
pub fn uci_score(score: Score, depth: u8, white_to_move: bool) -> String {
    let own = if white_to_move { score } else { -score };
    if own.abs() >= MATE_SCORE && own.abs() < INFINITY {
        let plies = i32::from(depth.max(1)) - (own.abs() - MATE_SCORE);
        let moves = (plies + 1) / 2;
        format!("mate {}", if own > 0 { moves } else { -moves })
    } else {
        format!("cp {}", own.clamp(-MATE_SCORE, MATE_SCORE) * 100)
    }
}

#[cfg(test)]
#[path = "uci_tests.rs"]
mod uci_tests;
