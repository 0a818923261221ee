//! Turn orchestration between a human player and an engine.
//!
//! A turn is atomic: the human move is either applied in full or rejected with
//! the board untouched, and the engine only replies to an applied move that
//! did not end the game.

use chess_core::{Board, Move, MoveError, Outcome, Position};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::eval::{evaluate, Score};
use crate::normalize::normalize_promotion;
use crate::{Engine, MinimaxEngine, DEFAULT_DEPTH};

pub const HUMAN_WINS: &str = "HUMAN WINS";
pub const AI_WINS: &str = "AI WINS";
pub const STALEMATE: &str = "STALEMATE";
pub const DRAW: &str = "DRAW";
pub const INVALID_MOVE: &str = "invalid move";

/// What one turn did. Empty strings mean "nothing happened at this step".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub engine_move: String,
    pub human_move: String,
    pub hint: String,
    /// Evaluation of the board after the turn
    pub score: Score,
    #[serde(skip)]
    pub outcome: Option<Outcome>,
}

impl TurnReport {
    /// `(engine move, human move, hint, score)`.
    pub fn into_tuple(self) -> (String, String, String, Score) {
        (self.engine_move, self.human_move, self.hint, self.score)
    }
}

/// Broken engine contract. These end the game loop; they are never
/// recovered like a mistyped human move.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("engine {engine} returned no move in a position that is not over")]
    NoMove { engine: String },
    #[error("engine {engine} returned an unplayable move")]
    IllegalMove {
        engine: String,
        #[source]
        source: MoveError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mover {
    Human,
    Engine,
}

fn hint_for(outcome: Outcome, last_mover: Mover) -> &'static str {
    match outcome {
        Outcome::Checkmate { .. } if last_mover == Mover::Human => HUMAN_WINS,
        Outcome::Checkmate { .. } => AI_WINS,
        Outcome::Stalemate => STALEMATE,
        Outcome::InsufficientMaterial
        | Outcome::SeventyFiveMoves
        | Outcome::FivefoldRepetition => DRAW,
    }
}

/// A game between a human and an engine on one long-lived board.
pub struct Game<E: Engine = MinimaxEngine> {
    board: Board,
    engine: E,
    depth: u8,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(MinimaxEngine::default(), DEFAULT_DEPTH)
    }
}

impl<E: Engine> Game<E> {
    pub fn new(engine: E, depth: u8) -> Self {
        Self::with_board(Board::default(), engine, depth)
    }

    pub fn with_board(board: Board, engine: E, depth: u8) -> Self {
        Self {
            board,
            engine,
            depth,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn position(&self) -> &Position {
        self.board.position()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn score(&self) -> Score {
        evaluate(self.board.position())
    }

    pub fn outcome(&mut self) -> Option<Outcome> {
        self.board.outcome()
    }

    /// Starts over from `board`.
    pub fn reset(&mut self, board: Board) {
        self.board = board;
        self.engine.new_game();
    }

    /// Plays the human move in `input` (if any) and the engine's reply.
    ///
    /// A move that cannot be parsed or is illegal is reported through
    /// `human_move`/`hint` and leaves the board unchanged. An empty or absent
    /// input makes no move at all; the report then only carries the score.
    pub fn play_turn(&mut self, input: Option<&str>) -> Result<TurnReport, GameError> {
        let mut report = TurnReport::default();

        if let Some(outcome) = self.board.outcome() {
            report.outcome = Some(outcome);
            report.score = self.score();
            return Ok(report);
        }

        let text = input.map(str::trim).filter(|t| !t.is_empty());
        let mut human_moved = false;
        if let Some(text) = text {
            match self.apply_human(text) {
                Ok(mv) => {
                    info!(%mv, "human move applied");
                    report.human_move = format!("human move: {text}");
                    human_moved = true;
                }
                Err(err) => {
                    warn!(input = text, error = %err, "rejected human move");
                    report.human_move = format!("invalid move: {text}");
                    report.hint = INVALID_MOVE.to_string();
                }
            }
        }

        if human_moved {
            match self.board.outcome() {
                Some(outcome) => {
                    report.hint = hint_for(outcome, Mover::Human).to_string();
                    report.outcome = Some(outcome);
                }
                None => self.engine_reply(&mut report)?,
            }
        }

        report.score = self.score();
        Ok(report)
    }

    /// Lets the engine move without a human move first, e.g. when the human
    /// plays Black.
    pub fn play_engine_turn(&mut self) -> Result<TurnReport, GameError> {
        let mut report = TurnReport::default();
        match self.board.outcome() {
            Some(outcome) => report.outcome = Some(outcome),
            None => self.engine_reply(&mut report)?,
        }
        report.score = self.score();
        Ok(report)
    }

    fn apply_human(&mut self, text: &str) -> Result<Move, MoveError> {
        let mv = Move::from_uci(text)?;
        let mv = normalize_promotion(self.board.position(), mv);
        self.board.apply(mv)?;
        Ok(mv)
    }

    fn engine_reply(&mut self, report: &mut TurnReport) -> Result<(), GameError> {
        let result = self.engine.choose_move(&mut self.board, self.depth);
        let mv = result.best_move.ok_or_else(|| GameError::NoMove {
            engine: self.engine.name().to_string(),
        })?;
        self.board.apply(mv).map_err(|source| GameError::IllegalMove {
            engine: self.engine.name().to_string(),
            source,
        })?;
        info!(
            engine = self.engine.name(),
            %mv,
            nodes = result.nodes,
            search_score = result.score,
            "engine move applied"
        );
        report.engine_move = format!("computer move: {mv}");

        if let Some(outcome) = self.board.outcome() {
            report.hint = hint_for(outcome, Mover::Engine).to_string();
            report.outcome = Some(outcome);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
