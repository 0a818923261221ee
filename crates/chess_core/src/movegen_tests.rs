use super::*;
use crate::board::Position;

fn uci_list(pos: &Position) -> Vec<String> {
    legal_moves(pos).iter().map(|m| m.to_string()).collect()
}

#[test]
fn test_startpos_moves() {
    let pos = Position::startpos();
    let moves = legal_moves(&pos);
    // Starting position has 20 legal moves
    assert_eq!(moves.len(), 20);
}

#[test]
fn test_kiwipete_moves() {
    let pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    assert_eq!(legal_moves(&pos).len(), 48);
}

#[test]
fn test_generation_order_is_by_origin_square() {
    let moves = legal_moves(&Position::startpos());
    let origins: Vec<u8> = moves.iter().map(|m| m.from).collect();
    let mut sorted = origins.clone();
    sorted.sort();
    assert_eq!(origins, sorted);
    // b1 knight comes first, c3 before a3 in delta order
    assert_eq!(moves[0].to_string(), "b1c3");
    assert_eq!(moves[1].to_string(), "b1a3");
}

#[test]
fn test_promotions_generated_queen_first() {
    let pos = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
    let promos: Vec<String> = uci_list(&pos)
        .into_iter()
        .filter(|m| m.starts_with("e7"))
        .collect();
    assert_eq!(promos, vec!["e7e8q", "e7e8r", "e7e8b", "e7e8n"]);
}

#[test]
fn test_castling_blocked_through_check() {
    // Black rook on f8 covers f1, so O-O is illegal but O-O-O is fine.
    let pos = Position::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = uci_list(&pos);
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(moves.contains(&"e1c1".to_string()));
}

#[test]
fn test_no_castling_out_of_check() {
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = uci_list(&pos);
    assert!(!moves.contains(&"e1g1".to_string()));
    assert!(!moves.contains(&"e1c1".to_string()));
}

#[test]
fn test_en_passant_generated_and_flagged() {
    let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    let ep = legal_moves(&pos)
        .into_iter()
        .find(|m| m.to_string() == "e5d6")
        .expect("en passant capture is legal");
    assert!(ep.is_en_passant);
}

#[test]
fn test_pinned_piece_cannot_move() {
    // White knight on e2 is pinned against the king by the rook on e8.
    let pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(legal_moves(&pos).iter().all(|m| m.from != 12));
}
