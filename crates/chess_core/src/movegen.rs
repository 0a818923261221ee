use crate::board::{Position, CASTLE_RULES, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::types::*;

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
///
/// Order is deterministic: origin squares a1..h8, then each piece's direction
/// order, promotions as queen, rook, bishop, knight. `pos` is played on and
/// restored while filtering out moves that leave the mover in check.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let legal = !pos.in_check(mover);
        pos.unmake_move(mv, undo);
        legal
    });
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let us = pos.side_to_move;
    for (from, pc) in pos.pieces().filter(|(_, pc)| pc.color == us) {
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, us, out),
            PieceKind::Knight => gen_steps(pos, from, us, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_slides(pos, from, us, &DIAGONALS, out),
            PieceKind::Rook => gen_slides(pos, from, us, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slides(pos, from, us, &DIAGONALS, out);
                gen_slides(pos, from, us, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, us, &KING_DELTAS, out);
                gen_castles(pos, from, us, out);
            }
        }
    }
}

/// Pushes a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(from: Square, to: Square, out: &mut Vec<Move>) {
    if is_back_rank(to) {
        out.extend(
            PieceKind::PROMOTIONS
                .iter()
                .map(|&kind| Move::with_promo(from, to, kind)),
        );
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_pawn(pos: &Position, from: Square, us: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = us.forward();
    let home_rank = match us {
        Color::White => 1,
        Color::Black => 6,
    };

    if let Some(one) = sq(f, r + dir).filter(|&s| pos.piece_at(s).is_none()) {
        push_pawn_move(from, one, out);
        if r == home_rank {
            if let Some(two) = sq(f, r + 2 * dir).filter(|&s| pos.piece_at(s).is_none()) {
                out.push(Move::new(from, two));
            }
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != us => push_pawn_move(from, to, out),
            None if pos.en_passant == Some(to) => out.push(Move {
                is_en_passant: true,
                ..Move::new(from, to)
            }),
            _ => {}
        }
    }
}

/// Single-step movers: knight and king.
fn gen_steps(pos: &Position, from: Square, us: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f, r) = (file_of(from), rank_of(from));
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            if pos.piece_at(to).map_or(true, |pc| pc.color != us) {
                out.push(Move::new(from, to));
            }
        }
    }
}

fn gen_slides(pos: &Position, from: Square, us: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let (f0, r0) = (file_of(from), rank_of(from));
    for (df, dr) in dirs {
        let (mut f, mut r) = (f0 + df, r0 + dr);
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(pc) => {
                    if pc.color != us {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

fn gen_castles(pos: &Position, from: Square, us: Color, out: &mut Vec<Move>) {
    // Castling out of check is never allowed; through or into check is
    // covered by the `safe` squares and the final legality filter.
    let mut checked = None;
    for rule in CASTLE_RULES.iter().filter(|r| r.color == us && r.king_from == from) {
        if !pos.castling.allows(us, rule.side) {
            continue;
        }
        if rule.empty.iter().any(|&s| pos.piece_at(s).is_some()) {
            continue;
        }
        if *checked.get_or_insert_with(|| pos.in_check(us)) {
            return;
        }
        if rule.safe.iter().any(|&s| pos.is_square_attacked(s, us.other())) {
            continue;
        }
        out.push(Move {
            is_castle: true,
            ..Move::new(rule.king_from, rule.king_to)
        });
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
