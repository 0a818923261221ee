//! Fixed-depth minimax with alpha-beta pruning.
//!
//! White maximizes the evaluation, Black minimizes it. The board is shared
//! down the whole tree: every child is explored through `Board::scoped`, which
//! takes the move back before the loop looks at the result, so a cutoff can
//! never leave the board modified.

use chess_core::{Board, Color, Move};
use tracing::debug;

use crate::config::EmptyNodePolicy;
use crate::eval::{evaluate, Score};

/// Bound used to seed alpha, beta and the running max/min.
pub const INFINITY: Score = 1_000_000_000;

/// Base score for a checkmated side; dominates any material difference.
pub const MATE_SCORE: Score = 1_000_000;

/// Result of a root search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if no legal moves)
    pub best_move: Option<Move>,
    /// Value of the root, from White's point of view
    pub score: Score,
    /// Depth searched in plies
    pub depth: u8,
    /// Nodes visited, leaves included
    pub nodes: u64,
}

/// Runs searches and counts the nodes they visit.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    policy: EmptyNodePolicy,
    nodes: u64,
}

impl Searcher {
    pub fn new(policy: EmptyNodePolicy) -> Self {
        Self { policy, nodes: 0 }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Picks a move for the side to move: White maximizes, Black minimizes.
    pub fn best_move(&mut self, board: &mut Board, depth: u8) -> SearchResult {
        let maximizing = board.side_to_move() == Color::White;
        self.best_move_for(board, depth, maximizing)
    }

    /// Picks the move whose subtree value is best for the given polarity.
    ///
    /// Ties go to the first move in generation order. When no move improves
    /// on the seed (every child returned the opposite sentinel) the first
    /// legal move is still returned so a legal position always yields a move.
    /// A depth of 0 is searched as depth 1.
    pub fn best_move_for(&mut self, board: &mut Board, depth: u8, maximizing: bool) -> SearchResult {
        self.nodes = 1;
        let moves = board.legal_moves();
        let Some(&first) = moves.first() else {
            return SearchResult {
                best_move: None,
                score: self.empty_node(board, depth, maximizing),
                depth,
                nodes: self.nodes,
            };
        };

        let child_depth = depth.saturating_sub(1);
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;
        let mut best_move = first;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            let value = board.scoped(mv, |b| self.search(b, child_depth, !maximizing, alpha, beta));
            if maximizing {
                if value > best_score {
                    best_score = value;
                    best_move = mv;
                }
                alpha = alpha.max(best_score);
            } else {
                if value < best_score {
                    best_score = value;
                    best_move = mv;
                }
                beta = beta.min(best_score);
            }
        }

        debug!(
            depth,
            maximizing,
            nodes = self.nodes,
            score = best_score,
            best = %best_move,
            "root search finished"
        );
        SearchResult {
            best_move: Some(best_move),
            score: best_score,
            depth,
            nodes: self.nodes,
        }
    }

    /// Alpha-beta value of the current position `depth` plies deep.
    ///
    /// Depth-0 nodes are scored by `evaluate` without looking for mate or
    /// stalemate. The board is left exactly as it was passed in.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.nodes += 1;
        if depth == 0 {
            return evaluate(board.position());
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return self.empty_node(board, depth, maximizing);
        }

        if maximizing {
            let mut max_val = -INFINITY;
            for mv in moves {
                let value = board.scoped(mv, |b| self.search(b, depth - 1, false, alpha, beta));
                max_val = max_val.max(value);
                alpha = alpha.max(max_val);
                if alpha >= beta {
                    break; // beta cutoff
                }
            }
            max_val
        } else {
            let mut min_val = INFINITY;
            for mv in moves {
                let value = board.scoped(mv, |b| self.search(b, depth - 1, true, alpha, beta));
                min_val = min_val.min(value);
                beta = beta.min(min_val);
                if beta <= alpha {
                    break; // alpha cutoff
                }
            }
            min_val
        }
    }

    /// Plain minimax over the same tree, visiting every node.
    pub fn minimax(&mut self, board: &mut Board, depth: u8, maximizing: bool) -> Score {
        self.nodes += 1;
        if depth == 0 {
            return evaluate(board.position());
        }

        let moves = board.legal_moves();
        if moves.is_empty() {
            return self.empty_node(board, depth, maximizing);
        }

        let values = moves
            .into_iter()
            .map(|mv| board.scoped(mv, |b| self.minimax(b, depth - 1, !maximizing)));
        let best = if maximizing { values.max() } else { values.min() };
        best.unwrap_or(0)
    }

    /// Value of a node whose side to move has no legal moves.
    fn empty_node(&self, board: &Board, depth: u8, maximizing: bool) -> Score {
        match self.policy {
            EmptyNodePolicy::Sentinel => {
                if maximizing {
                    -INFINITY
                } else {
                    INFINITY
                }
            }
            EmptyNodePolicy::Classify if board.in_check() => {
                // More remaining depth means the mate came sooner.
                let mate = MATE_SCORE + Score::from(depth);
                if maximizing {
                    -mate
                } else {
                    mate
                }
            }
            EmptyNodePolicy::Classify => 0,
        }
    }
}

/// `Searcher::search` with the default empty-node policy.
pub fn search(board: &mut Board, depth: u8, maximizing: bool, alpha: Score, beta: Score) -> Score {
    Searcher::default().search(board, depth, maximizing, alpha, beta)
}

/// Unpruned minimax value with the default empty-node policy.
pub fn minimax(board: &mut Board, depth: u8, maximizing: bool) -> Score {
    Searcher::default().minimax(board, depth, maximizing)
}

/// Best move for the side to move, searched `depth` plies deep.
pub fn best_move(board: &mut Board, depth: u8) -> Option<Move> {
    Searcher::default().best_move(board, depth).best_move
}

/// Best move with an explicit root polarity. `maximizing = false` is the
/// engine playing Black.
pub fn best_move_for(board: &mut Board, depth: u8, maximizing: bool) -> Option<Move> {
    Searcher::default().best_move_for(board, depth, maximizing).best_move
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
