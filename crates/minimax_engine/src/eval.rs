//! Material-based position evaluation

use chess_core::{Color, PieceKind, Position};

/// Evaluation score. Positive favours White, negative favours Black.
pub type Score = i32;

/// Stands in for "infinitely valuable". Both kings are always on a legal
/// board, so it cancels out of every real evaluation.
pub const KING_VALUE: Score = 9999;

/// Returns the material value of a piece in pawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => KING_VALUE,
    }
}

/// Sums material over every occupied square from White's point of view,
/// independent of the side to move.
pub fn evaluate(pos: &Position) -> Score {
    pos.pieces()
        .map(|(_, pc)| {
            let v = piece_value(pc.kind);
            match pc.color {
                Color::White => v,
                Color::Black => -v,
            }
        })
        .sum()
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
