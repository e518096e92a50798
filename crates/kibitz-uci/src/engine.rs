//! Event-driven UCI engine with a search worker thread.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use kibitz_core::{ChessPosition, Position};
use kibitz_engine::{Iteration, Score, SearchError, SearchResult, Searcher, limits_from_go};

use crate::command::{Command, GoParams, MAX_DEPTH_OPTION, UciOption, parse_command};
use crate::error::UciError;

/// Whether a search is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EngineState {
    Idle,
    Searching,
}

/// Events processed by the main engine loop.
enum EngineEvent {
    UciCommand(Result<Command, UciError>),
    SearchDone(Result<Option<SearchResult>, SearchError>),
    InputClosed,
}

/// The UCI engine: current position, search settings and worker state.
///
/// Commands are read on a separate thread and handled on the main one.
/// Each `go` runs on its own worker thread with a clone of the position,
/// so `isready` and `stop` are answered while it searches.
pub struct UciEngine {
    position: ChessPosition,
    searcher: Searcher,
    state: EngineState,
    stop_flag: Arc<AtomicBool>,
    debug: bool,
}

impl UciEngine {
    /// Create a new engine with the starting position.
    pub fn new() -> Self {
        Self {
            position: ChessPosition::starting_position(),
            searcher: Searcher::new(),
            state: EngineState::Idle,
            stop_flag: Arc::new(AtomicBool::new(false)),
            debug: false,
        }
    }

    /// Run the UCI event loop, reading from stdin until `quit` or input closes.
    pub fn run(mut self) -> Result<(), UciError> {
        let (tx, rx) = mpsc::channel::<EngineEvent>();

        let stdin_tx = tx.clone();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        debug!(cmd = %trimmed, "received UCI command");
                        if stdin_tx.send(EngineEvent::UciCommand(parse_command(trimmed))).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        let _ = stdin_tx.send(EngineEvent::UciCommand(Err(err.into())));
                        break;
                    }
                }
            }
            let _ = stdin_tx.send(EngineEvent::InputClosed);
        });

        info!("kibitz ready");

        for event in &rx {
            match event {
                EngineEvent::UciCommand(Ok(cmd)) => match cmd {
                    Command::Uci => self.handle_uci(),
                    Command::IsReady => println!("readyok"),
                    Command::UciNewGame => self.handle_ucinewgame(),
                    Command::Position(position) => self.position = position,
                    Command::Go(params) => self.handle_go(params, &tx),
                    Command::SetOption(option) => self.handle_setoption(option),
                    Command::Stop => self.handle_stop(),
                    Command::Debug(on) => {
                        self.debug = on;
                        info!(debug = on, "debug mode changed");
                    }
                    Command::Quit => break,
                    Command::Unknown(name) => debug!(%name, "ignoring unknown command"),
                },
                EngineEvent::UciCommand(Err(e)) => {
                    warn!(error = %e, "UCI parse error");
                }
                EngineEvent::SearchDone(result) => self.finish_search(result),
                EngineEvent::InputClosed => break,
            }
        }

        if self.state == EngineState::Searching {
            self.handle_stop();
            for event in &rx {
                if let EngineEvent::SearchDone(result) = event {
                    self.finish_search(result);
                    break;
                }
            }
        }

        info!("kibitz shutting down");
        Ok(())
    }

    fn handle_uci(&self) {
        println!("id name kibitz");
        println!("id author the kibitz developers");
        println!(
            "option name Depth type spin default {} min 1 max {MAX_DEPTH_OPTION}",
            self.searcher.config().max_depth
        );
        println!("uciok");
    }

    fn handle_ucinewgame(&mut self) {
        self.position = ChessPosition::starting_position();
    }

    fn handle_setoption(&mut self, option: UciOption) {
        match option {
            UciOption::Depth(depth) => {
                self.searcher.set_max_depth(depth);
                info!(depth, "default search depth changed");
            }
        }
    }

    fn handle_go(&mut self, params: GoParams, tx: &mpsc::Sender<EngineEvent>) {
        if self.state == EngineState::Searching {
            warn!("go received while searching, ignoring");
            return;
        }

        self.stop_flag = Arc::new(AtomicBool::new(false));

        let control = limits_from_go(
            params.wtime,
            params.btime,
            params.winc,
            params.binc,
            params.movestogo,
            params.movetime,
            params.infinite,
            self.position.side_to_move(),
            Arc::clone(&self.stop_flag),
        );
        let max_depth = params.depth.or(params.infinite.then_some(u8::MAX));

        let searcher = self.searcher.clone();
        let mut position = self.position.clone();
        let tx = tx.clone();
        let show_debug = self.debug;

        debug!(fen = %position, ?max_depth, budget = ?control.soft_limit(), "search started");

        std::thread::spawn(move || {
            let result = searcher.search(&mut position, &control, max_depth, |iteration| {
                println!("{}", info_line(iteration, control.elapsed()));
                if show_debug {
                    println!("info string searched {} nodes", iteration.nodes);
                }
            });
            let _ = tx.send(EngineEvent::SearchDone(result));
        });

        self.state = EngineState::Searching;
    }

    fn handle_stop(&mut self) {
        self.stop_flag.store(true, Ordering::Release);
    }

    fn finish_search(&mut self, result: Result<Option<SearchResult>, SearchError>) {
        self.state = EngineState::Idle;

        let found = match result {
            Ok(found) => found,
            Err(err) => {
                error!(error = %err, "search failed");
                None
            }
        };
        println!("{}", bestmove_line(found.as_ref()));
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The `score` part of an `info` line: `cp X` or `mate N` in moves.
pub fn score_text(score: Score) -> String {
    match score.mate_plies() {
        Some(plies) => {
            let moves = i64::from(plies.div_ceil(2).max(1));
            let moves = if score < Score::ZERO { -moves } else { moves };
            format!("mate {moves}")
        }
        None if score.is_draw() => "cp 0".to_owned(),
        None => format!("cp {}", score.value().round() as i64),
    }
}

/// One `info` line for a completed depth.
pub fn info_line(iteration: &Iteration, elapsed: Duration) -> String {
    let pv: Vec<String> = iteration.pv.iter().map(|m| m.to_uci()).collect();
    format!(
        "info depth {} score {} nodes {} time {} pv {}",
        iteration.depth,
        score_text(iteration.score),
        iteration.nodes,
        elapsed.as_millis(),
        pv.join(" ")
    )
}

/// The `bestmove` reply; `0000` when there is no move to play.
pub fn bestmove_line(result: Option<&SearchResult>) -> String {
    match result {
        Some(SearchResult {
            best_move,
            ponder_move: Some(ponder),
            ..
        }) => format!("bestmove {} ponder {}", best_move.to_uci(), ponder.to_uci()),
        Some(found) => format!("bestmove {}", found.best_move.to_uci()),
        None => "bestmove 0000".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use kibitz_core::Move;

    use super::*;

    fn mv(uci: &str) -> Move {
        Move::from_uci(uci).unwrap()
    }

    fn result(pv: &[&str]) -> SearchResult {
        let pv: Vec<Move> = pv.iter().map(|m| mv(m)).collect();
        SearchResult {
            best_move: pv[0],
            ponder_move: pv.get(1).copied(),
            pv,
            score: Score::new(35.0),
            depth: 4,
            nodes: 1234,
        }
    }

    #[test]
    fn centipawn_scores_round() {
        assert_eq!(score_text(Score::new(35.4)), "cp 35");
        assert_eq!(score_text(Score::new(-120.6)), "cp -121");
        assert_eq!(score_text(Score::DRAW), "cp 0");
    }

    #[test]
    fn mate_scores_count_moves() {
        let mating = Score::WIN.at_ply(1);
        assert_eq!(score_text(mating), "mate 1");
        assert_eq!(score_text(Score::WIN.at_ply(3)), "mate 2");
        assert_eq!(score_text(Score::LOSS.at_ply(2)), "mate -1");
        assert_eq!(score_text(Score::LOSS.at_ply(4)), "mate -2");
    }

    #[test]
    fn info_line_layout() {
        let iteration = Iteration {
            depth: 3,
            score: Score::new(-12.0),
            best_move: mv("e2e4"),
            pv: vec![mv("e2e4"), mv("e7e5"), mv("g1f3")],
            nodes: 987,
        };
        assert_eq!(
            info_line(&iteration, Duration::from_millis(42)),
            "info depth 3 score cp -12 nodes 987 time 42 pv e2e4 e7e5 g1f3"
        );
    }

    #[test]
    fn bestmove_with_and_without_ponder() {
        assert_eq!(
            bestmove_line(Some(&result(&["e2e4", "e7e5"]))),
            "bestmove e2e4 ponder e7e5"
        );
        assert_eq!(bestmove_line(Some(&result(&["a7a8q"]))), "bestmove a7a8q");
        assert_eq!(bestmove_line(None), "bestmove 0000");
    }
}
