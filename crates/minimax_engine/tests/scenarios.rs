//! End-to-end turns through the public API.

use chess_core::{Board, Color, Outcome, Piece, PieceKind, START_FEN};
use minimax_engine::game::{HUMAN_WINS, INVALID_MOVE};
use minimax_engine::{
    evaluate, search, Engine, Game, MinimaxEngine, SearchResult, DEFAULT_DEPTH, INFINITY,
};

#[derive(Default)]
struct Spy {
    inner: MinimaxEngine,
    calls: usize,
}

impl Engine for Spy {
    fn choose_move(&mut self, board: &mut Board, depth: u8) -> SearchResult {
        self.calls += 1;
        self.inner.choose_move(board, depth)
    }

    fn name(&self) -> &str {
        "spy"
    }
}

#[test]
fn invalid_input_leaves_the_start_position() {
    let mut game = Game::new(Spy::default(), DEFAULT_DEPTH);
    let (engine_move, human_move, hint, score) = game.play_turn(Some("z9z9")).unwrap().into_tuple();

    assert_eq!(engine_move, "");
    assert_eq!(human_move, "invalid move: z9z9");
    assert_eq!(hint, INVALID_MOVE);
    assert_eq!(score, 0);
    assert_eq!(game.board().to_fen(), START_FEN);
}

#[test]
fn pawn_advance_without_suffix_becomes_a_queen() {
    let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mut game = Game::with_board(board, Spy::default(), DEFAULT_DEPTH);
    game.play_turn(Some("a7a8")).unwrap();

    assert_eq!(
        game.position().piece_at(56),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
}

#[test]
fn depth_zero_ignores_polarity() {
    let mut board = Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4")
        .unwrap();
    let expected = evaluate(board.position());
    assert_eq!(search(&mut board, 0, true, -INFINITY, INFINITY), expected);
    assert_eq!(search(&mut board, 0, false, -INFINITY, INFINITY), expected);
}

#[test]
fn scholars_mate_ends_the_turn_without_searching() {
    let mut board = Board::default();
    for mv in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6"] {
        board.apply_uci(mv).unwrap();
    }
    let mut game = Game::with_board(board, Spy::default(), DEFAULT_DEPTH);
    let report = game.play_turn(Some("h5f7")).unwrap();

    assert_eq!(report.human_move, "human move: h5f7");
    assert_eq!(report.engine_move, "");
    assert_eq!(report.hint, HUMAN_WINS);
    assert_eq!(
        report.outcome,
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
    assert_eq!(report.score, 1);
    assert_eq!(game.engine().calls, 0);
}

#[test]
fn a_few_turns_keep_the_board_consistent() {
    let mut game = Game::new(MinimaxEngine::default(), 2);
    for mv in ["e2e4", "g1f3", "f1c4"] {
        let report = game.play_turn(Some(mv)).unwrap();
        // The engine may have made the next planned move illegal.
        if report.hint == INVALID_MOVE {
            continue;
        }
        assert!(report.engine_move.starts_with("computer move: "));
        assert_eq!(report.score, evaluate(game.position()));
        assert_eq!(game.board().side_to_move(), Color::White);
    }
    assert_eq!(game.board().ply() % 2, 0);
}
