use super::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const KNIGHT_TAKES_QUEEN: &str = "4k3/8/8/5n2/7Q/8/8/4K3 b - - 0 1";
const BACK_RANK_MATE: &str = "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1";
const QUEEN_CAN_STALEMATE: &str = "7k/8/8/5q2/8/8/8/7K b - - 0 1";

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

/// Positions reached by short seeded random games from the start.
fn random_positions(count: usize, plies: usize) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(7);
    (0..count)
        .map(|_| {
            let mut b = Board::default();
            for _ in 0..plies {
                let moves = b.legal_moves();
                match moves.choose(&mut rng) {
                    Some(&mv) => b.push(mv),
                    None => break,
                }
            }
            Board::new(b.position().clone())
        })
        .collect()
}

#[test]
fn depth_zero_is_static_evaluation() {
    for fen in [KNIGHT_TAKES_QUEEN, BACK_RANK_MATE, chess_core::START_FEN] {
        let mut b = board(fen);
        let expected = evaluate(b.position());
        assert_eq!(search(&mut b, 0, true, -INFINITY, INFINITY), expected);
        assert_eq!(search(&mut b, 0, false, -INFINITY, INFINITY), expected);
    }
}

#[test]
fn depth_zero_ignores_checkmate() {
    // Black is mated here, but a depth-0 node only counts material.
    let mut b = board("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    assert_eq!(search(&mut b, 0, false, -INFINITY, INFINITY), 2);
}

#[test]
fn minimizing_root_takes_hanging_queen() {
    for depth in 1..=3 {
        let mut b = board(KNIGHT_TAKES_QUEEN);
        let mv = best_move(&mut b, depth).expect("black has moves");
        assert_eq!(mv.to_string(), "f5h4", "depth {depth}");
    }
}

#[test]
fn root_polarity_follows_side_to_move() {
    let mut b = board("4k3/8/8/8/7q/8/6N1/K7 w - - 0 1");
    let result = Searcher::default().best_move(&mut b, 2);
    assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("g2h4"));
    assert!(result.score > 0);
}

#[test]
fn explicit_polarity_matches_side_to_move_default() {
    let mut b = board(KNIGHT_TAKES_QUEEN);
    assert_eq!(best_move_for(&mut b, 3, false), best_move(&mut b, 3));
}

#[test]
fn finds_mate_in_one_and_scores_it() {
    for depth in [2u8, 3] {
        let mut b = board(BACK_RANK_MATE);
        let result = Searcher::default().best_move(&mut b, depth);
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("a8a1"));
        assert_eq!(result.score, -(MATE_SCORE + Score::from(depth - 1)));
    }
}

#[test]
fn sentinel_policy_returns_seed_for_mate() {
    let mut b = board(BACK_RANK_MATE);
    let result = Searcher::new(EmptyNodePolicy::Sentinel).best_move(&mut b, 2);
    assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("a8a1"));
    assert_eq!(result.score, -INFINITY);
}

#[test]
fn classify_policy_avoids_stalemate_sentinel_walks_into_it() {
    let mut b = board(QUEEN_CAN_STALEMATE);
    let classify = Searcher::new(EmptyNodePolicy::Classify).best_move(&mut b, 2);
    let sentinel = Searcher::new(EmptyNodePolicy::Sentinel).best_move(&mut b, 2);

    assert_ne!(classify.best_move.map(|m| m.to_string()).as_deref(), Some("f5f2"));
    assert_eq!(classify.score, -9);
    assert_eq!(sentinel.best_move.map(|m| m.to_string()).as_deref(), Some("f5f2"));
}

#[test]
fn empty_root_has_no_move() {
    let mut b = board("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");
    let result = Searcher::default().best_move(&mut b, 3);
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
}

#[test]
fn search_leaves_board_untouched() {
    for mut b in random_positions(4, 12) {
        let fen = b.to_fen();
        let ply = b.ply();
        Searcher::default().best_move(&mut b, 3);
        search(&mut b, 2, true, -INFINITY, INFINITY);
        minimax(&mut b, 2, false);
        assert_eq!(b.to_fen(), fen);
        assert_eq!(b.ply(), ply);
    }
}

#[test]
fn search_is_deterministic() {
    let mut b = Board::default();
    b.apply_uci("e2e4").unwrap();
    let first = best_move(&mut b, 3);
    let second = best_move(&mut b, 3);
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn pruning_never_changes_the_value() {
    for policy in [EmptyNodePolicy::Classify, EmptyNodePolicy::Sentinel] {
        let mut positions = random_positions(4, 16);
        positions.push(board(BACK_RANK_MATE));
        positions.push(board(QUEEN_CAN_STALEMATE));
        for mut b in positions {
            for depth in 1..=3 {
                for maximizing in [true, false] {
                    let pruned = Searcher::new(policy).search(
                        &mut b,
                        depth,
                        maximizing,
                        -INFINITY,
                        INFINITY,
                    );
                    let full = Searcher::new(policy).minimax(&mut b, depth, maximizing);
                    assert_eq!(pruned, full, "{} depth {depth} max {maximizing}", b.to_fen());
                }
            }
        }
    }
}

#[test]
fn root_value_matches_unpruned_minimax() {
    for mut b in random_positions(4, 10) {
        let maximizing = b.side_to_move() == chess_core::Color::White;
        let result = Searcher::default().best_move(&mut b, 3);
        assert_eq!(result.score, minimax(&mut b, 3, maximizing), "{}", b.to_fen());
    }
}

#[test]
fn pruning_visits_fewer_nodes() {
    let mut b = Board::default();
    let mut pruned = Searcher::default();
    pruned.search(&mut b, 3, true, -INFINITY, INFINITY);
    let mut full = Searcher::default();
    full.minimax(&mut b, 3, true);
    assert!(pruned.nodes() < full.nodes());
}
