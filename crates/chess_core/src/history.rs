//! A position together with the moves played to reach it.
//!
//! `Board` is what engines and the game controller hold. It adds a move stack
//! on top of `Position`, so any applied move can be taken back with `undo`
//! without the caller keeping undo records, and it remembers position keys
//! for repetition detection.

use std::fmt;

use crate::board::{Position, Undo};
use crate::error::{FenError, MoveError};
use crate::movegen::legal_moves_into;
use crate::types::{Color, Move};

/// How a finished game ended. Only draws that need no claim end a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Checkmate { winner } => write!(f, "checkmate, {winner:?} wins"),
            Outcome::Stalemate => write!(f, "stalemate"),
            Outcome::InsufficientMaterial => write!(f, "draw by insufficient material"),
            Outcome::SeventyFiveMoves => write!(f, "draw by the seventy-five-move rule"),
            Outcome::FivefoldRepetition => write!(f, "draw by fivefold repetition"),
        }
    }
}

#[derive(Clone, Debug)]
struct Played {
    mv: Move,
    undo: Undo,
}

#[derive(Clone, Debug)]
pub struct Board {
    position: Position,
    played: Vec<Played>,
    /// Key of the initial position followed by one key per played move.
    keys: Vec<u64>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Position::startpos())
    }
}

impl From<Position> for Board {
    fn from(position: Position) -> Self {
        Self::new(position)
    }
}

impl Board {
    pub fn new(position: Position) -> Self {
        let keys = vec![position.position_key()];
        Self {
            position,
            played: Vec::new(),
            keys,
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Position::from_fen(fen).map(Self::new)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Moves played on this board, oldest first.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.played.iter().map(|p| p.mv)
    }

    pub fn ply(&self) -> usize {
        self.played.len()
    }

    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        legal_moves_into(&mut self.position, &mut out);
        out
    }

    /// Plays `mv` if it matches one of the legal moves by origin,
    /// destination and promotion. The board is untouched on error.
    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        let legal = self
            .legal_moves()
            .into_iter()
            .find(|m| *m == mv)
            .ok_or_else(|| MoveError::Illegal(mv.to_string()))?;
        self.push(legal);
        Ok(())
    }

    /// Parses UCI text and applies it.
    pub fn apply_uci(&mut self, text: &str) -> Result<Move, MoveError> {
        let mv = Move::from_uci(text)?;
        self.apply(mv)?;
        Ok(mv)
    }

    /// Plays a move taken from `legal_moves` without re-checking it.
    pub fn push(&mut self, mv: Move) {
        let undo = self.position.make_move(mv);
        self.played.push(Played { mv, undo });
        self.keys.push(self.position.position_key());
    }

    /// Takes back the most recent move, restoring the exact prior state.
    pub fn undo(&mut self) -> Option<Move> {
        let Played { mv, undo } = self.played.pop()?;
        self.keys.pop();
        self.position.unmake_move(mv, undo);
        Some(mv)
    }

    /// Plays `mv`, runs `f` on the resulting board and takes the move back
    /// before returning, whatever `f` returned.
    pub fn scoped<R>(&mut self, mv: Move, f: impl FnOnce(&mut Board) -> R) -> R {
        self.push(mv);
        let result = f(self);
        self.undo();
        result
    }

    pub fn has_legal_moves(&mut self) -> bool {
        !self.legal_moves().is_empty()
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check(self.position.side_to_move)
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.in_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.in_check() && !self.has_legal_moves()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.position.is_insufficient_material()
    }

    /// Claimable only; `outcome` does not consult it.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.position.is_fifty_move_draw()
    }

    pub fn is_seventy_five_move_draw(&self) -> bool {
        self.position.is_seventy_five_move_draw()
    }

    /// The current position occurred at least three times. Claimable only;
    /// `outcome` does not consult it.
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetitions() >= 3
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetitions() >= 5
    }

    fn repetitions(&self) -> usize {
        let current = self.position.position_key();
        self.keys.iter().filter(|&&k| k == current).count()
    }

    /// Classifies the position, or `None` while the game goes on.
    /// Checkmate and stalemate take precedence over the draw rules, and the
    /// claimable fifty-move and threefold draws never end the game here.
    pub fn outcome(&mut self) -> Option<Outcome> {
        if !self.has_legal_moves() {
            return Some(if self.in_check() {
                Outcome::Checkmate {
                    winner: self.side_to_move().other(),
                }
            } else {
                Outcome::Stalemate
            });
        }
        if self.is_insufficient_material() {
            Some(Outcome::InsufficientMaterial)
        } else if self.is_seventy_five_move_draw() {
            Some(Outcome::SeventyFiveMoves)
        } else if self.is_fivefold_repetition() {
            Some(Outcome::FivefoldRepetition)
        } else {
            None
        }
    }

    pub fn is_game_over(&mut self) -> bool {
        self.outcome().is_some()
    }

    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.position.fmt(f)
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
