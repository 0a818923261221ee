//! Random-move opponent.
//!
//! Picks uniformly among the legal moves. A baseline any searching engine
//! should beat, and a cheap stand-in when exercising the game loop.

use chess_core::Board;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::eval::evaluate;
use crate::search::SearchResult;
use crate::Engine;

#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move sequence for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Engine for RandomEngine {
    fn choose_move(&mut self, board: &mut Board, _depth: u8) -> SearchResult {
        let moves = board.legal_moves();
        SearchResult {
            best_move: moves.choose(&mut self.rng).copied(),
            score: evaluate(board.position()),
            depth: 0,
            nodes: 1,
        }
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}

#[cfg(test)]
#[path = "random_tests.rs"]
mod random_tests;
