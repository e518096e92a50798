//! Alpha-beta must agree with a plain minimax over the same tree.

use kibitz_core::{ChessPosition, Color, Move, Position};
use kibitz_engine::{Evaluator, PieceSquareEvaluator, Score, SearchConfig, SearchTree, Tier};

fn sign(position: &ChessPosition) -> i32 {
    match position.side_to_move() {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Unpruned negamax; returns the score and every move reaching it at the root.
fn minimax(position: &mut ChessPosition, depth: u8, ply: u32) -> (Score, Vec<Move>) {
    let leaf = |position: &ChessPosition| {
        let raw = PieceSquareEvaluator
            .evaluate(position, Tier::Complete)
            .unwrap();
        (sign(position) * raw).at_ply(ply)
    };

    if depth == 0 || (ply > 0 && position.outcome().is_some()) {
        return (leaf(&*position), Vec::new());
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        return (leaf(&*position), Vec::new());
    }

    let mut best: Option<Score> = None;
    let mut best_moves = Vec::new();
    for mv in moves {
        let score = {
            let mut guard = position.push_scoped(mv).unwrap();
            -minimax(&mut guard, depth - 1, ply + 1).0
        };
        match best {
            Some(b) if score < b => {}
            Some(b) if score == b => best_moves.push(mv),
            _ => {
                best = Some(score);
                best_moves = vec![mv];
            }
        }
    }
    (best.unwrap_or(Score::ZERO), best_moves)
}

fn check(fen: &str, depth: u8) {
    let mut position: ChessPosition = fen.parse().unwrap();
    let (expected, optimal) = minimax(&mut position, depth, 0);

    let result = SearchTree::new(SearchConfig {
        start_depth: 1,
        max_depth: depth,
    })
    .play(&mut position, &PieceSquareEvaluator, |_| false)
    .unwrap()
    .unwrap();

    assert_eq!(result.score, expected, "{fen} at depth {depth}");
    assert!(
        optimal.contains(&result.best_move),
        "{fen}: {} not among {optimal:?}",
        result.best_move
    );
    if optimal.len() == 1 {
        assert_eq!(result.best_move, optimal[0]);
    }
    assert_eq!(position.fen(), fen);
}

#[test]
fn starting_position() {
    check("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3);
}

#[test]
fn open_middlegame() {
    check(
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        3,
    );
}

#[test]
fn black_to_move() {
    check("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq - 0 1", 2);
}

#[test]
fn rook_endgame() {
    check("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4);
}

#[test]
fn mate_is_seen_through_the_window() {
    check("k7/8/1K6/8/8/8/8/1Q6 w - - 0 1", 3);
}

#[test]
fn tactical_promotion() {
    check("8/P6k/8/8/8/8/8/K7 w - - 0 1", 3);
}

#[test]
fn stalemate_is_avoided_by_the_stronger_side() {
    check("k7/8/1K6/8/8/8/8/2Q5 w - - 0 1", 3);
}

#[test]
fn weaker_side_takes_the_draw() {
    let fen = "7k/8/8/8/8/8/1r6/2K5 w - - 0 1";
    check(fen, 3);

    let mut position: ChessPosition = fen.parse().unwrap();
    let result = SearchTree::new(SearchConfig {
        start_depth: 1,
        max_depth: 3,
    })
    .play(&mut position, &PieceSquareEvaluator, |_| false)
    .unwrap()
    .unwrap();
    assert_eq!(result.best_move, Move::from_uci("c1b2").unwrap());
    assert!(result.score.is_draw());
    assert_eq!(result.score, Score::ZERO);
}
