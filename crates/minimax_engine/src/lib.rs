//! Minimax Chess Engine
//!
//! Fixed-depth alpha-beta search over a material-only evaluation, plus the
//! game controller that plays one human turn and the engine's reply.
//!
//! Scores are always from White's point of view: White maximizes, Black
//! minimizes.

pub mod config;
pub mod eval;
pub mod game;
pub mod normalize;
pub mod random;
pub mod search;

use chess_core::Board;

pub use config::{ConfigError, EmptyNodePolicy, EngineConfig, EngineKind, DEFAULT_DEPTH, MAX_DEPTH};
pub use eval::{evaluate, piece_value, Score, KING_VALUE};
pub use game::{Game, GameError, TurnReport};
pub use normalize::normalize_promotion;
pub use random::RandomEngine;
pub use search::{
    best_move, best_move_for, minimax, search, SearchResult, Searcher, INFINITY, MATE_SCORE,
};

/// Something that can pick a move for the side to move.
///
/// The game controller only talks to engines through this trait, so the
/// searching engine, the random baseline or a test double are
/// interchangeable.
pub trait Engine {
    /// Chooses a move for the side to move on `board`.
    ///
    /// Implementations may play moves on `board` while thinking but must hand
    /// it back exactly as they received it.
    fn choose_move(&mut self, board: &mut Board, depth: u8) -> SearchResult;

    /// Returns the engine's name for display and UCI identification
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}

impl<E: Engine + ?Sized> Engine for Box<E> {
    fn choose_move(&mut self, board: &mut Board, depth: u8) -> SearchResult {
        (**self).choose_move(board, depth)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn new_game(&mut self) {
        (**self).new_game()
    }
}

/// The alpha-beta engine.
///
/// The root's polarity follows the side to move, so the engine playing Black
/// minimizes, as the game controller expects.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    searcher: Searcher,
}

impl MinimaxEngine {
    pub fn new(policy: EmptyNodePolicy) -> Self {
        Self {
            searcher: Searcher::new(policy),
        }
    }
}

impl Engine for MinimaxEngine {
    fn choose_move(&mut self, board: &mut Board, depth: u8) -> SearchResult {
        self.searcher.best_move(board, depth)
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }
}
