//! Monte Carlo tree search with symmetry-pruned expansion and tree reuse.
//!
//! The tree lives in an arena (`Vec<MctsNode>` indexed by `NodeId`); parent
//! links are plain indices used only for backpropagation, so ownership flows
//! strictly root-to-children. Re-rooting copies the promoted subtree into a
//! fresh arena and drops everything else.

use rand::{Rng, SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::app::{PlayoutPolicy, SearchConfig};
use crate::tictactoe::{BoardState, GameResult, Variant, boards_equivalent, lines};

pub(crate) type NodeId = usize;

/// One state in the search tree, reached by one specific move from its parent
#[derive(Debug, Clone)]
struct MctsNode {
    board: BoardState,
    parent: Option<NodeId>,
    /// The move that produced this node from its parent (`None` for a root
    /// created directly from a driver board)
    position: Option<usize>,
    wins: u32,
    losses: u32,
    trials: u32,
    children: Vec<NodeId>,
    expanded: bool,
    /// Whether a playout has been run from this node itself (set on the
    /// first visit, when the node was a zero-trial child)
    simulated: bool,
}

impl MctsNode {
    fn root(board: BoardState) -> Self {
        MctsNode {
            board,
            parent: None,
            position: None,
            wins: 0,
            losses: 0,
            trials: 0,
            children: Vec::new(),
            expanded: false,
            simulated: false,
        }
    }

    fn child(board: BoardState, parent: NodeId, position: usize) -> Self {
        MctsNode {
            board,
            parent: Some(parent),
            position: Some(position),
            wins: 0,
            losses: 0,
            trials: 0,
            children: Vec::new(),
            expanded: false,
            simulated: false,
        }
    }
}

/// Per-move statistics of a root child, for drivers and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveStatistics {
    pub position: usize,
    pub trials: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Monte Carlo search tree rooted at one board state.
///
/// Trials run sequentially with no suspension points: each is
/// select → (expand) → simulate → backpropagate, completed before the next
/// begins.
pub struct MctsTree {
    arena: Vec<MctsNode>,
    root: NodeId,
    variant: Variant,
    exploration: f64,
    playout: PlayoutPolicy,
    rng: StdRng,
}

impl MctsTree {
    /// Create a fresh tree rooted at a copy of `board`
    pub fn new(board: &BoardState, config: &SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        MctsTree {
            arena: vec![MctsNode::root(*board)],
            root: 0,
            variant: config.variant,
            exploration: config.exploration,
            playout: config.playout,
            rng,
        }
    }

    /// The board the tree is currently rooted at
    pub fn root_board(&self) -> &BoardState {
        &self.arena[self.root].board
    }

    /// Trials recorded at the root
    pub fn root_trials(&self) -> u32 {
        self.arena[self.root].trials
    }

    /// Nodes currently held by the arena
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Run `trials` sequential search trials from the root
    pub fn run_trials(&mut self, trials: usize) {
        for _ in 0..trials {
            self.run_trial();
        }
    }

    /// One trial: descend from the root, expanding and simulating as needed,
    /// then backpropagate the observed result.
    fn run_trial(&mut self) {
        let mut node = self.root;
        loop {
            let result = self.variant.result(&self.arena[node].board);
            if result.is_over() {
                // Exhausted node: no children are ever created for it
                self.backpropagate(node, result);
                return;
            }

            if !self.arena[node].expanded {
                self.expand(node);
            }

            let unvisited: Vec<NodeId> = self.arena[node]
                .children
                .iter()
                .copied()
                .filter(|&c| self.arena[c].trials == 0)
                .collect();

            if let Some(&child) = unvisited.choose(&mut self.rng) {
                let outcome = self.simulate(child);
                self.arena[child].simulated = true;
                self.backpropagate(child, outcome);
                return;
            }

            node = self.select_child(node);
        }
    }

    /// Materialize every legal successor of `node`, dropping any board
    /// equivalent under symmetry to an earlier sibling of the same batch.
    ///
    /// Generation is row-major, so which member of an equivalence class
    /// survives is deterministic. The pruning only shrinks the branching
    /// factor; skipping it would explore more states, not change results.
    fn expand(&mut self, node: NodeId) {
        let board = self.arena[node].board;
        let mut kept: Vec<NodeId> = Vec::new();

        for position in board.empty_positions() {
            let next = board
                .make_move(position)
                .expect("empty positions are legal moves");

            let duplicate = kept
                .iter()
                .any(|&sibling| boards_equivalent(&self.arena[sibling].board, &next));
            if duplicate {
                continue;
            }

            let id = self.arena.len();
            self.arena.push(MctsNode::child(next, node, position));
            kept.push(id);
        }

        self.arena[node].children = kept;
        self.arena[node].expanded = true;
    }

    /// Upper-confidence child selection once every child has been visited.
    ///
    /// A child's counters are kept from its own mover's perspective, so
    /// `losses - wins` is the net score for the player choosing between the
    /// children.
    fn select_child(&self, node: NodeId) -> NodeId {
        let parent_trials = self.arena[node].trials;

        *self.arena[node]
            .children
            .iter()
            .max_by(|&&a, &&b| {
                let pa = self.child_potential(a, parent_trials);
                let pb = self.child_potential(b, parent_trials);
                pa.partial_cmp(&pb).unwrap_or(std::cmp::Ordering::Equal)
            })
            .expect("expanded non-terminal nodes have children")
    }

    fn child_potential(&self, child: NodeId, parent_trials: u32) -> f64 {
        let node = &self.arena[child];
        let n = node.trials as f64;
        let w = node.losses as f64 - node.wins as f64;
        w / n + self.exploration * ((parent_trials as f64).ln() / n).sqrt()
    }

    /// Play a simulation from `node`'s board to termination and return the
    /// terminal result. Works on a copy; the node's snapshot is untouched.
    fn simulate(&mut self, node: NodeId) -> GameResult {
        let mut board = self.arena[node].board;
        loop {
            let result = self.variant.result(&board);
            if result.is_over() {
                return result;
            }
            let position = self.playout_move(&board);
            board = board
                .make_move(position)
                .expect("playout moves come from empty cells");
        }
    }

    /// Pick the next playout move under the configured policy
    fn playout_move(&mut self, board: &BoardState) -> usize {
        let empty = board.empty_positions();

        if self.playout == PlayoutPolicy::Guided {
            match self.variant {
                Variant::Standard => {
                    // Decisive completions (own win or opponent block) first
                    if let Some(position) = lines::winning_or_blocking_move(&board.cells) {
                        return position;
                    }
                }
                Variant::Misere => {
                    // Prefer moves that do not complete a line for the mover
                    let losing = lines::winning_moves(&board.cells, board.to_move);
                    let safe: Vec<usize> = empty
                        .iter()
                        .copied()
                        .filter(|p| !losing.contains(p))
                        .collect();
                    if let Some(&position) = safe.choose(&mut self.rng) {
                        return position;
                    }
                }
            }
        }

        empty[self.rng.random_range(0..empty.len())]
    }

    /// Credit `result` to `node` and every ancestor up to the root.
    ///
    /// Each node counts a win when the result's winner is its own
    /// player-to-move, a loss for the opponent's win, and neither on a draw;
    /// every node on the path counts the trial.
    fn backpropagate(&mut self, node: NodeId, result: GameResult) {
        let mut current = Some(node);
        while let Some(id) = current {
            let entry = &mut self.arena[id];
            if let GameResult::Win(winner) = result {
                if winner == entry.board.to_move {
                    entry.wins += 1;
                } else {
                    entry.losses += 1;
                }
            }
            entry.trials += 1;
            current = entry.parent;
        }
    }

    /// The move of the root child with the most trials (first-encountered on
    /// ties) — the standard robustness criterion, not the best win rate.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` when the root is terminal, and `NoValidMoves` when
    /// no trial has been run (no children exist to compare).
    pub fn best_move(&self) -> crate::Result<usize> {
        if self.variant.result(&self.arena[self.root].board).is_over() {
            return Err(crate::Error::GameOver);
        }

        let mut best: Option<(usize, u32)> = None;
        for &child in &self.arena[self.root].children {
            let node = &self.arena[child];
            let position = node
                .position
                .expect("children always record their producing move");
            let better = match best {
                Some((_, trials)) => node.trials > trials,
                None => true,
            };
            if better {
                best = Some((position, node.trials));
            }
        }

        best.map(|(position, _)| position)
            .ok_or(crate::Error::NoValidMoves)
    }

    /// Statistics of every root child, in child order
    pub fn child_statistics(&self) -> Vec<MoveStatistics> {
        self.arena[self.root]
            .children
            .iter()
            .map(|&child| {
                let node = &self.arena[child];
                MoveStatistics {
                    position: node.position.unwrap_or(usize::MAX),
                    trials: node.trials,
                    wins: node.wins,
                    losses: node.losses,
                }
            })
            .collect()
    }

    /// Re-root the tree after `position` was played on the authoritative
    /// board, reusing the matching subtree when one exists.
    ///
    /// The promoted child keeps all accumulated statistics; its siblings and
    /// the old root are dropped. When the played move has no matching child
    /// (unexpanded root, or the move was symmetry-pruned away), the tree is
    /// rebuilt fresh from `board_after` — always correct, just slower to
    /// converge within a fixed budget.
    pub fn advance_root(&mut self, position: usize, board_after: &BoardState) {
        let promoted = self.arena[self.root]
            .children
            .iter()
            .copied()
            .find(|&child| self.arena[child].position == Some(position));

        match promoted {
            Some(child) => self.promote(child),
            None => {
                self.arena = vec![MctsNode::root(*board_after)];
                self.root = 0;
            }
        }
    }

    /// Copy the subtree under `new_root` into a fresh arena, severing its
    /// upward reference and dropping every node outside the subtree.
    fn promote(&mut self, new_root: NodeId) {
        let mut fresh: Vec<MctsNode> = Vec::new();
        // (old id, new parent id)
        let mut stack: Vec<(NodeId, Option<NodeId>)> = vec![(new_root, None)];

        while let Some((old_id, new_parent)) = stack.pop() {
            let mut node = self.arena[old_id].clone();
            let new_id = fresh.len();
            node.parent = new_parent;
            let old_children = std::mem::take(&mut node.children);
            fresh.push(node);
            for &child in old_children.iter().rev() {
                stack.push((child, Some(new_id)));
            }
        }

        // Rebuild child lists from the recorded parents, preserving order
        for id in (0..fresh.len()).rev() {
            if let Some(parent) = fresh[id].parent {
                fresh[parent].children.insert(0, id);
            }
        }

        self.arena = fresh;
        self.root = 0;
    }

    /// Check trial conservation across the whole tree: every expanded node's
    /// trials equal the sum of its children's, plus one when a playout was
    /// run from the node itself on its first visit. A root created directly
    /// from a driver board was never played out, so it satisfies the exact
    /// equality; a promoted root carries its first-visit playout.
    pub fn trial_counts_consistent(&self) -> bool {
        self.arena.iter().all(|node| {
            if !node.expanded {
                return true;
            }
            let child_sum: u32 = node.children.iter().map(|&c| self.arena[c].trials).sum();
            node.trials == child_sum + u32::from(node.simulated)
        })
    }
}
