use super::*;

fn normalized(fen: &str, uci: &str) -> String {
    let pos = Position::from_fen(fen).unwrap();
    normalize_promotion(&pos, Move::from_uci(uci).unwrap()).to_string()
}

const WHITE_PAWN_ON_7: &str = "k7/4P3/8/8/8/8/8/4K3 w - - 0 1";
const BLACK_PAWN_ON_2: &str = "4k3/8/8/8/8/8/4p3/K7 b - - 0 1";

#[test]
fn white_pawn_reaching_rank_8_becomes_queen() {
    assert_eq!(normalized(WHITE_PAWN_ON_7, "e7e8"), "e7e8q");
}

#[test]
fn black_pawn_reaching_rank_1_becomes_queen() {
    assert_eq!(normalized(BLACK_PAWN_ON_2, "e2e1"), "e2e1q");
}

#[test]
fn explicit_underpromotion_is_kept() {
    assert_eq!(normalized(WHITE_PAWN_ON_7, "e7e8n"), "e7e8n");
}

#[test]
fn non_pawn_move_to_back_rank_is_untouched() {
    assert_eq!(normalized("k7/8/8/8/8/8/8/R3K3 w - - 0 1", "a1a8"), "a1a8");
    assert_eq!(normalized(WHITE_PAWN_ON_7, "e1d1"), "e1d1");
}

#[test]
fn pawn_move_off_the_back_rank_is_untouched() {
    assert_eq!(normalized(Position::startpos().to_fen().as_str(), "e2e4"), "e2e4");
}

#[test]
fn empty_origin_is_untouched() {
    assert_eq!(normalized(WHITE_PAWN_ON_7, "d7d8"), "d7d8");
}
