//! Search tree nodes, stored in an arena and reused across deepening passes.

use kibitz_core::Move;
use rustc_hash::FxHashMap;

use crate::score::Score;
use crate::search::ordering::OrderedMove;

/// Index of a node in a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One node of the search tree.
///
/// A node is created the first time its move is tried and lives as long as
/// the tree. Deeper passes refresh its depth and window in place, so the
/// children it registered earlier (and their best moves) are found again.
#[derive(Debug)]
pub struct SearchNode {
    entry: Option<OrderedMove>,
    sign: i32,
    depth: u8,
    alpha: Score,
    beta: Score,
    best: Option<NodeId>,
    score: Option<Score>,
    children: FxHashMap<Move, NodeId>,
    ordered: Vec<OrderedMove>,
    cursor: usize,
    iteration: u32,
}

impl SearchNode {
    fn new(entry: Option<OrderedMove>, sign: i32, depth: u8, alpha: Score, beta: Score) -> Self {
        Self {
            entry,
            sign,
            depth,
            alpha,
            beta,
            best: None,
            score: None,
            children: FxHashMap::default(),
            ordered: Vec::new(),
            cursor: 0,
            iteration: 0,
        }
    }

    /// The move leading here; `None` at the root.
    pub fn mv(&self) -> Option<Move> {
        self.entry.map(|e| e.mv)
    }

    /// `+1` if White moves at this node, `-1` if Black does.
    pub fn sign(&self) -> i32 {
        self.sign
    }

    /// Remaining depth budget.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn alpha(&self) -> Score {
        self.alpha
    }

    pub fn beta(&self) -> Score {
        self.beta
    }

    /// The child that produced this node's score.
    pub fn best(&self) -> Option<NodeId> {
        self.best
    }

    /// Score from the last time this node was searched.
    pub fn score(&self) -> Option<Score> {
        self.score
    }

    /// Deepening pass this node was last entered in.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Number of children registered so far.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Raise alpha to `score` if it improves on it.
    ///
    /// Returns `true` when the window has closed (beta cutoff).
    pub fn raise_alpha(&mut self, score: Score) -> bool {
        if score > self.alpha {
            self.alpha = score;
        }
        self.alpha >= self.beta
    }

    /// Record the result of a finished expansion.
    pub fn set_result(&mut self, score: Score, best: Option<NodeId>) {
        self.score = Some(score);
        if best.is_some() {
            self.best = best;
        }
    }
}

/// Owner of every node in a tree. The root is always the first node.
#[derive(Debug)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub const ROOT: NodeId = NodeId(0);

    /// Arena holding only a root for the side given by `sign`.
    pub fn new(sign: i32) -> Self {
        Self {
            nodes: vec![SearchNode::new(None, sign, 0, Score::MIN, Score::MAX)],
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    /// Prepare the root for a pass of the given depth with a full window.
    pub fn reset_root(&mut self, depth: u8, iteration: u32) {
        let root = &mut self.nodes[Self::ROOT.0];
        root.depth = depth;
        root.alpha = Score::MIN;
        root.beta = Score::MAX;
        root.iteration = iteration;
    }

    /// Best move known at `id`.
    pub fn best_move(&self, id: NodeId) -> Option<Move> {
        self.get(id).best.and_then(|child| self.get(child).mv())
    }

    /// Start iterating the children of `id` in the given order.
    ///
    /// The cursor goes back to the first child at the root, or when the
    /// node's pass counter is behind its parent's; the counter then catches
    /// up. Otherwise iteration resumes where it stopped. Returns the number
    /// of children; zero means the node is terminal.
    pub fn begin_iteration(
        &mut self,
        id: NodeId,
        parent: Option<NodeId>,
        ordered: Vec<OrderedMove>,
    ) -> usize {
        let parent_iteration = parent.map(|p| self.get(p).iteration);
        let node = self.get_mut(id);
        let count = ordered.len();
        node.ordered = ordered;

        match parent_iteration {
            None => node.cursor = 0,
            Some(pass) if node.iteration < pass => {
                node.cursor = 0;
                node.iteration = pass;
            }
            Some(_) => {}
        }
        count
    }

    /// Fetch the next child of `id`, or `None` once every child was handed out.
    ///
    /// A move seen in an earlier pass returns its existing node with depth
    /// and window refreshed from the parent; a new move gets a new node.
    pub fn next_child(&mut self, id: NodeId) -> Option<(NodeId, OrderedMove)> {
        let node = self.get(id);
        let entry = *node.ordered.get(node.cursor)?;
        let depth = node.depth.saturating_sub(1);
        let (alpha, beta) = (-node.beta, -node.alpha);
        let sign = -node.sign;
        let existing = node.children.get(&entry.mv).copied();

        self.get_mut(id).cursor += 1;

        if let Some(child) = existing {
            let node = self.get_mut(child);
            node.entry = Some(entry);
            node.depth = depth;
            node.alpha = alpha;
            node.beta = beta;
            return Some((child, entry));
        }

        let child = NodeId(self.nodes.len());
        self.nodes
            .push(SearchNode::new(Some(entry), sign, depth, alpha, beta));
        self.get_mut(id).children.insert(entry.mv, child);
        Some((child, entry))
    }

    /// Release the ordered move list of `id` once its pass is over.
    pub fn end_iteration(&mut self, id: NodeId) {
        self.get_mut(id).ordered = Vec::new();
    }

    /// Follow best-child links from the root, at most `limit` moves.
    pub fn principal_variation(&self, limit: usize) -> Vec<Move> {
        let mut pv = Vec::with_capacity(limit);
        let mut id = Self::ROOT;
        while pv.len() < limit {
            let Some(child) = self.get(id).best else {
                break;
            };
            let Some(mv) = self.get(child).mv() else {
                break;
            };
            pv.push(mv);
            id = child;
        }
        pv
    }
}
