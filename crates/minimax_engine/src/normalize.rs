use chess_core::{is_back_rank, Move, PieceKind, Position};

/// Turns a pawn move onto rank 1 or 8 that names no promotion piece into a
/// queen promotion. Anything else comes back unchanged.
///
/// `pos` is the position before the move. Only applied to moves typed by a
/// player; generated moves already carry their promotion piece.
pub fn normalize_promotion(pos: &Position, mv: Move) -> Move {
    let is_pawn = pos
        .piece_at(mv.from)
        .map_or(false, |pc| pc.kind == PieceKind::Pawn);

    if is_pawn && is_back_rank(mv.to) && mv.promo.is_none() {
        Move {
            promo: Some(PieceKind::Queen),
            ..mv
        }
    } else {
        mv
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod normalize_tests;
