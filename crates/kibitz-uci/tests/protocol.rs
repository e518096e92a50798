//! Drive parsed UCI commands through a search, the way the event loop does.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use kibitz_core::{ChessPosition, Position};
use kibitz_engine::{Searcher, limits_from_go};
use kibitz_uci::engine::{bestmove_line, info_line};
use kibitz_uci::{Command, GoParams, parse_command};

fn position(line: &str) -> ChessPosition {
    match parse_command(line).unwrap() {
        Command::Position(p) => p,
        other => panic!("expected Position, got {other:?}"),
    }
}

fn go(line: &str) -> GoParams {
    match parse_command(line).unwrap() {
        Command::Go(params) => params,
        other => panic!("expected Go, got {other:?}"),
    }
}

fn answer(position_cmd: &str, go_cmd: &str) -> (Vec<String>, String) {
    let mut p = position(position_cmd);
    let params = go(go_cmd);
    let control = limits_from_go(
        params.wtime,
        params.btime,
        params.winc,
        params.binc,
        params.movestogo,
        params.movetime,
        params.infinite,
        p.side_to_move(),
        Arc::new(AtomicBool::new(false)),
    );
    let mut info = Vec::new();
    let result = Searcher::new()
        .search(&mut p, &control, params.depth, |it| {
            info.push(info_line(it, control.elapsed()));
        })
        .unwrap();
    (info, bestmove_line(result.as_ref()))
}

#[test]
fn scholars_mate_is_announced() {
    let (info, bestmove) = answer(
        "position startpos moves e2e4 e7e5 d1h5 b8c6 f1c4 g8f6",
        "go depth 2",
    );
    assert_eq!(info.len(), 2);
    assert!(info[0].starts_with("info depth 1 score mate 1 "), "{}", info[0]);
    assert!(info[1].contains(" pv h5f7"), "{}", info[1]);
    assert_eq!(bestmove, "bestmove h5f7");
}

#[test]
fn checkmated_side_answers_null_move() {
    let (info, bestmove) = answer(
        "position startpos moves f2f3 e7e5 g2g4 d8h4",
        "go depth 3",
    );
    assert!(info.is_empty());
    assert_eq!(bestmove, "bestmove 0000");
}

#[test]
fn depth_limited_search_reports_each_depth() {
    let (info, bestmove) = answer("position startpos", "go depth 3");
    let depths: Vec<&str> = info
        .iter()
        .map(|line| line.split_whitespace().nth(2).unwrap())
        .collect();
    assert_eq!(depths, ["1", "2", "3"]);
    assert!(bestmove.starts_with("bestmove "));
    assert_ne!(bestmove, "bestmove 0000");
}
