//! Terminal game loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use chess_core::{Board, Color};
use minimax_engine::{Engine, Game, TurnReport};

const PROMPT: &str = "your move (e.g. e2e4, 'new' to restart, 'q' to quit): ";

/// Plays until the game ends, the input runs out or the human quits.
pub fn run<E, R, W>(
    game: &mut Game<E>,
    human: Color,
    start: &Board,
    input: R,
    mut out: W,
) -> Result<()>
where
    E: Engine,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "playing {:?} against {}", human, game.engine().name())?;

    loop {
        if game.board().side_to_move() != human {
            let report = game.play_engine_turn()?;
            print_report(&mut out, &report)?;
        }

        writeln!(out, "{}", game.board())?;
        writeln!(out, "score: {}", game.score())?;
        if let Some(outcome) = game.outcome() {
            writeln!(out, "game over: {outcome}")?;
            return Ok(());
        }

        write!(out, "{PROMPT}")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };

        match line.trim() {
            "q" | "quit" => return Ok(()),
            "new" => {
                game.reset(start.clone());
                writeln!(out, "new game")?;
            }
            text => {
                let report = game.play_turn(Some(text))?;
                print_report(&mut out, &report)?;
            }
        }
    }
}

fn print_report(out: &mut impl Write, report: &TurnReport) -> Result<()> {
    for line in [&report.human_move, &report.engine_move, &report.hint] {
        if !line.is_empty() {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "interactive_tests.rs"]
mod interactive_tests;
