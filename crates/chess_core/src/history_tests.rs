use super::*;
use crate::types::{Move, PieceKind};

#[test]
fn apply_then_undo_restores_fen_and_history() {
    let mut board = Board::default();
    let before = board.to_fen();
    board.apply_uci("e2e4").unwrap();
    assert_ne!(board.to_fen(), before);
    assert_eq!(board.ply(), 1);
    assert_eq!(board.undo().map(|m| m.to_string()).as_deref(), Some("e2e4"));
    assert_eq!(board.to_fen(), before);
    assert_eq!(board.ply(), 0);
}

#[test]
fn undo_on_fresh_board_is_none() {
    let mut board = Board::default();
    assert!(board.undo().is_none());
}

#[test]
fn illegal_move_leaves_board_unchanged() {
    let mut board = Board::default();
    let before = board.to_fen();
    let err = board.apply_uci("e2e5").unwrap_err();
    assert_eq!(err, MoveError::Illegal("e2e5".to_string()));
    assert_eq!(board.to_fen(), before);
}

#[test]
fn malformed_text_is_parse_error() {
    let mut board = Board::default();
    assert!(matches!(board.apply_uci("z9z9"), Err(MoveError::Parse(_))));
    assert!(matches!(board.apply_uci("e2"), Err(MoveError::Parse(_))));
    assert!(matches!(board.apply_uci("e7e8k"), Err(MoveError::Parse(_))));
}

#[test]
fn apply_picks_up_generator_flags() {
    let mut board = Board::from_fen("r3k3/8/8/8/8/8/8/4K2R w Kq - 0 1").unwrap();
    board.apply(Move::new(4, 6)).unwrap();
    assert_eq!(board.position().piece_at(5).map(|p| p.kind), Some(PieceKind::Rook));
    board.undo();
    assert_eq!(board.position().piece_at(7).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(board.position().castling.wk);
}

#[test]
fn scoped_restores_board() {
    let mut board = Board::default();
    let before = board.to_fen();
    let mv = board.legal_moves()[0];
    let inner_fen = board.scoped(mv, |b| b.to_fen());
    assert_ne!(inner_fen, before);
    assert_eq!(board.to_fen(), before);
}

#[test]
fn fools_mate_is_checkmate() {
    let mut board = Board::default();
    for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        board.apply_uci(mv).unwrap();
    }
    assert!(board.is_checkmate());
    assert!(board.is_game_over());
    assert_eq!(
        board.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::Black
        })
    );
}

#[test]
fn knight_shuffle_repeats_three_times() {
    let mut board = Board::default();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for mv in shuffle.iter().chain(shuffle.iter()) {
        assert!(!board.is_threefold_repetition());
        board.apply_uci(mv).unwrap();
    }
    assert!(board.is_threefold_repetition());
    // Claimable, so the game is not over yet.
    assert_eq!(board.outcome(), None);
}

#[test]
fn fifth_repetition_ends_the_game() {
    let mut board = Board::default();
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for _ in 0..3 {
        for mv in shuffle {
            assert_eq!(board.outcome(), None);
            board.apply_uci(mv).unwrap();
        }
    }
    assert!(!board.is_fivefold_repetition());
    for mv in shuffle {
        board.apply_uci(mv).unwrap();
    }
    assert!(board.is_fivefold_repetition());
    assert_eq!(board.outcome(), Some(Outcome::FivefoldRepetition));
}

#[test]
fn unplayable_en_passant_square_does_not_split_repetitions() {
    // After 1.e4 no black pawn can take on e3.
    let with_ep = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        .unwrap();
    let without = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
        .unwrap();
    assert_eq!(with_ep.legal_en_passant(), None);
    assert_eq!(with_ep.position_key(), without.position_key());
}

#[test]
fn playable_en_passant_square_is_part_of_the_key() {
    let with_ep = Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        .unwrap();
    let without = Position::from_fen("rnbqkbnr/ppp1pppp/8/8/3pP3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
        .unwrap();
    assert_eq!(with_ep.legal_en_passant(), Some(20));
    assert_ne!(with_ep.position_key(), without.position_key());
}

#[test]
fn en_passant_that_exposes_the_king_is_not_playable() {
    // Taking on e3 would open the fourth rank to the rook on h4.
    let pos = Position::from_fen("8/8/8/8/k2pP2R/8/8/4K3 b - e3 0 1").unwrap();
    assert_eq!(pos.legal_en_passant(), None);
}
