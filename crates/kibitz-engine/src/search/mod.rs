//! Negamax alpha-beta search with iterative deepening.

pub mod control;
pub mod killers;
pub mod node;
pub mod ordering;

use std::time::Instant;

use kibitz_core::{Color, Move, Position};
use tracing::{debug, trace};

use crate::error::SearchError;
use crate::eval::{Evaluator, PieceSquareEvaluator, Tier};
use crate::score::Score;
use control::SearchControl;
use killers::{KillerTable, MAX_PLY};
use node::{NodeArena, NodeId};
use ordering::order_moves;

/// Depth range for iterative deepening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// First depth searched.
    pub start_depth: u8,
    /// Last depth searched unless the probe stops earlier.
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_depth: 1,
            max_depth: 6,
        }
    }
}

/// Summary of one completed deepening pass, handed to the probe.
#[derive(Debug, Clone, PartialEq)]
pub struct Iteration {
    pub depth: u8,
    /// Score from the root mover's point of view.
    pub score: Score,
    pub best_move: Move,
    pub pv: Vec<Move>,
    /// Nodes visited so far, over all passes.
    pub nodes: u64,
}

/// Result of a search: the last completed pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best move found at the deepest completed depth.
    pub best_move: Move,
    /// Second move in the PV, the expected reply.
    pub ponder_move: Option<Move>,
    /// Full principal variation line.
    pub pv: Vec<Move>,
    /// Score from the root mover's point of view.
    pub score: Score,
    /// Depth reached.
    pub depth: u8,
    /// Total nodes visited during the search.
    pub nodes: u64,
}

impl From<Iteration> for SearchResult {
    fn from(iteration: Iteration) -> Self {
        Self {
            best_move: iteration.best_move,
            ponder_move: iteration.pv.get(1).copied(),
            pv: iteration.pv,
            score: iteration.score,
            depth: iteration.depth,
            nodes: iteration.nodes,
        }
    }
}

/// One search tree: node arena, killer table and counters.
///
/// A tree belongs to a single search. Its nodes are kept between deepening
/// passes so each pass starts from the previous pass's best moves.
pub struct SearchTree {
    config: SearchConfig,
    arena: NodeArena,
    killers: KillerTable,
    nodes: u64,
    root_ply: u32,
    pass: u32,
}

impl SearchTree {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            arena: NodeArena::new(1),
            killers: KillerTable::new(),
            nodes: 0,
            root_ply: 0,
            pass: 0,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn killers(&self) -> &KillerTable {
        &self.killers
    }

    pub fn killers_mut(&mut self) -> &mut KillerTable {
        &mut self.killers
    }

    /// Search `position` with iterative deepening.
    ///
    /// After every completed depth `probe` receives the pass summary and
    /// returns `true` to stop. Returns the last completed pass, or `None`
    /// when the side to move has no legal move. `position` is left as it
    /// was found, on success and on error.
    pub fn play<P, E, F>(
        &mut self,
        position: &mut P,
        evaluator: &E,
        mut probe: F,
    ) -> Result<Option<SearchResult>, SearchError>
    where
        P: Position,
        E: Evaluator,
        F: FnMut(&Iteration) -> bool,
    {
        let sign = match position.side_to_move() {
            Color::White => 1,
            Color::Black => -1,
        };
        self.arena = NodeArena::new(sign);
        self.root_ply = position.ply();
        self.pass = 0;

        let last_depth = (MAX_PLY - 1) as u8;
        let start = self.config.start_depth.clamp(1, last_depth);
        let max = self.config.max_depth.clamp(start, last_depth);

        let mut completed: Option<Iteration> = None;

        for depth in start..=max {
            self.pass += 1;
            self.arena.reset_root(depth, self.pass);

            let score = self.negamax(NodeArena::ROOT, None, position, evaluator)?;

            let Some(best_move) = self.arena.best_move(NodeArena::ROOT) else {
                debug!(depth, "no legal move at the root");
                return Ok(None);
            };

            let iteration = Iteration {
                depth,
                score,
                best_move,
                pv: self.arena.principal_variation(usize::from(depth)),
                nodes: self.nodes,
            };
            debug!(
                depth,
                score = %iteration.score,
                best = %best_move,
                nodes = self.nodes,
                "depth completed"
            );

            let stop = probe(&iteration);
            completed = Some(iteration);
            if stop {
                break;
            }
        }

        Ok(completed.map(SearchResult::from))
    }

    fn negamax<P, E>(
        &mut self,
        id: NodeId,
        parent: Option<NodeId>,
        position: &mut P,
        evaluator: &E,
    ) -> Result<Score, SearchError>
    where
        P: Position,
        E: Evaluator,
    {
        self.nodes += 1;
        let ply = position.ply().saturating_sub(self.root_ply);

        if self.arena.get(id).depth() == 0 || (ply > 0 && position.outcome().is_some()) {
            return self.score_leaf(id, position, evaluator, ply);
        }

        let killers = self.killers.get(ply as usize);
        let ordered = order_moves(&*position, self.arena.best_move(id), killers);
        if self.arena.begin_iteration(id, parent, ordered) == 0 {
            self.arena.end_iteration(id);
            return self.score_leaf(id, position, evaluator, ply);
        }

        let mut best: Option<(NodeId, Score)> = None;

        while let Some((child, entry)) = self.arena.next_child(id) {
            let score = {
                let mut guard = match position.push_scoped(entry.mv) {
                    Ok(guard) => guard,
                    Err(err) => {
                        self.arena.end_iteration(id);
                        return Err(err.into());
                    }
                };
                match self.negamax(child, Some(id), &mut *guard, evaluator) {
                    Ok(score) => -score,
                    Err(err) => {
                        self.arena.end_iteration(id);
                        return Err(err);
                    }
                }
            };

            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((child, score));
            }

            if self.arena.get_mut(id).raise_alpha(score) {
                if entry.is_quiet() {
                    trace!(ply, mv = %entry.mv, "killer stored");
                    self.killers.store(ply as usize, entry.mv);
                }
                break;
            }
        }

        self.arena.end_iteration(id);

        match best {
            Some((child, score)) => {
                self.arena.get_mut(id).set_result(score, Some(child));
                Ok(score)
            }
            None => self.score_leaf(id, position, evaluator, ply),
        }
    }

    /// Static score of `id` for its side to move.
    fn score_leaf<P, E>(
        &mut self,
        id: NodeId,
        position: &P,
        evaluator: &E,
        ply: u32,
    ) -> Result<Score, SearchError>
    where
        P: Position,
        E: Evaluator,
    {
        let node = self.arena.get_mut(id);
        let score = (node.sign() * evaluator.evaluate(position, Tier::Complete)?).at_ply(ply);
        node.set_result(score, None);
        Ok(score)
    }
}

/// Stateless search driver: one fresh [`SearchTree`] per call.
#[derive(Debug, Clone, Default)]
pub struct Searcher<E = PieceSquareEvaluator> {
    evaluator: E,
    config: SearchConfig,
}

impl Searcher {
    /// Searcher with the default evaluator and depth range.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Evaluator> Searcher<E> {
    pub fn with_evaluator(evaluator: E, config: SearchConfig) -> Self {
        Self { evaluator, config }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_max_depth(&mut self, depth: u8) {
        self.config.max_depth = depth;
    }

    /// Run iterative deepening on `position` until `control` says stop or
    /// the depth limit is reached.
    ///
    /// `max_depth` overrides the configured limit for this search only.
    /// `on_iter` sees every completed depth, e.g. to print `info` lines.
    pub fn search<P, F>(
        &self,
        position: &mut P,
        control: &SearchControl,
        max_depth: Option<u8>,
        mut on_iter: F,
    ) -> Result<Option<SearchResult>, SearchError>
    where
        P: Position,
        F: FnMut(&Iteration),
    {
        let mut config = self.config;
        if let Some(depth) = max_depth {
            config.max_depth = depth;
        }

        let started = Instant::now();
        let mut tree = SearchTree::new(config);
        let result = tree.play(position, &self.evaluator, |iteration| {
            on_iter(iteration);
            control.should_stop_iterating()
        })?;

        match &result {
            Some(found) => debug!(
                best = %found.best_move,
                depth = found.depth,
                nodes = found.nodes,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "search finished"
            ),
            None => debug!("search finished without a move"),
        }
        Ok(result)
    }
}
