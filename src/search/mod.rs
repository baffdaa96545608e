//! Move-selection engines and the polymorphic selector seam.
//!
//! Both engines score positions under the same rule variant and expose one
//! trait to the driver: ask for a move, then report every move actually
//! played so stateful engines can follow the game.

pub mod mcts;
pub mod minimax;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::app::SearchConfig;
use crate::tictactoe::BoardState;

pub use mcts::{MctsTree, MoveStatistics};
pub use minimax::{Minimax, SearchResult};

/// A strategy that picks moves for one side of the game.
///
/// The driver holds the authoritative board: `select_move` never mutates the
/// position it is handed, and the driver applies the returned move itself.
/// `notify_move` reports every move actually played (by either side) so
/// stateful selectors can track the game.
pub trait MoveSelector {
    /// Which engine this is
    fn kind(&self) -> SelectorKind;

    /// Choose a move for the player to move on `board`.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` when asked to move on a terminal board.
    fn select_move(&mut self, board: &BoardState) -> crate::Result<usize>;

    /// Observe a move that was played on the authoritative board
    fn notify_move(&mut self, position: usize, after: &BoardState);
}

/// Available engines, selectable from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum SelectorKind {
    /// Exhaustive depth-first search
    Minimax,
    /// Monte Carlo tree search
    Mcts,
}

impl SelectorKind {
    /// Create a boxed selector of this kind from a configuration
    pub fn into_selector(self, config: &SearchConfig) -> Box<dyn MoveSelector> {
        match self {
            SelectorKind::Minimax => Box::new(MinimaxSelector::new(config)),
            SelectorKind::Mcts => Box::new(MctsSelector::new(config)),
        }
    }
}

impl std::fmt::Display for SelectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectorKind::Minimax => write!(f, "minimax"),
            SelectorKind::Mcts => write!(f, "mcts"),
        }
    }
}

/// Stateless selector running a full minimax search per decision
pub struct MinimaxSelector {
    engine: Minimax,
}

impl MinimaxSelector {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            engine: Minimax::new(config),
        }
    }
}

impl MoveSelector for MinimaxSelector {
    fn kind(&self) -> SelectorKind {
        SelectorKind::Minimax
    }

    fn select_move(&mut self, board: &BoardState) -> crate::Result<usize> {
        let result = self.engine.best_move(board)?;
        result.position.ok_or(crate::Error::NoValidMoves)
    }

    fn notify_move(&mut self, _position: usize, _after: &BoardState) {}
}

/// Stateful selector that keeps its search tree across moves.
///
/// The tree is lazily rooted at the first board it is asked about and
/// re-rooted on every observed move, reusing the matching subtree instead of
/// rebuilding (TicTacToePlus-style tree reuse).
pub struct MctsSelector {
    config: SearchConfig,
    tree: Option<MctsTree>,
}

impl MctsSelector {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            config: config.clone(),
            tree: None,
        }
    }

    fn tree_for(&mut self, board: &BoardState) -> &mut MctsTree {
        let stale = match &self.tree {
            Some(tree) => tree.root_board() != board,
            None => true,
        };
        if stale {
            self.tree = Some(MctsTree::new(board, &self.config));
        }
        self.tree.as_mut().expect("tree was just ensured")
    }
}

impl MoveSelector for MctsSelector {
    fn kind(&self) -> SelectorKind {
        SelectorKind::Mcts
    }

    fn select_move(&mut self, board: &BoardState) -> crate::Result<usize> {
        if self.config.variant.result(board).is_over() {
            return Err(crate::Error::GameOver);
        }
        let trials = self.config.trials;
        let tree = self.tree_for(board);
        tree.run_trials(trials);
        tree.best_move()
    }

    fn notify_move(&mut self, position: usize, after: &BoardState) {
        match &mut self.tree {
            Some(tree) => tree.advance_root(position, after),
            None => self.tree = Some(MctsTree::new(after, &self.config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Variant;

    #[test]
    fn selector_factory_builds_both_kinds() {
        let config = SearchConfig::new().with_trials(100).with_seed(1);
        for kind in [SelectorKind::Minimax, SelectorKind::Mcts] {
            let selector = kind.into_selector(&config);
            assert_eq!(selector.kind(), kind);
        }
    }

    #[test]
    fn both_selectors_find_the_forced_win() {
        let board = BoardState::from_string("XX.OO....").unwrap();
        let config = SearchConfig::new()
            .with_variant(Variant::Standard)
            .with_trials(2_000)
            .with_seed(2);
        for kind in [SelectorKind::Minimax, SelectorKind::Mcts] {
            let mut selector = kind.into_selector(&config);
            assert_eq!(selector.select_move(&board).unwrap(), 2, "{kind}");
        }
    }

    #[test]
    fn mcts_selector_follows_the_game() {
        let config = SearchConfig::new().with_trials(300).with_seed(3);
        let mut selector = MctsSelector::new(&config);

        let board = BoardState::new();
        let position = selector.select_move(&board).unwrap();

        let after = board.make_move(position).unwrap();
        selector.notify_move(position, &after);
        let tree = selector.tree.as_ref().unwrap();
        assert_eq!(tree.root_board(), &after);

        // An opponent move the tree may have pruned still re-roots cleanly
        let reply = after.legal_moves()[0];
        let next = after.make_move(reply).unwrap();
        selector.notify_move(reply, &next);
        let tree = selector.tree.as_ref().unwrap();
        assert_eq!(tree.root_board(), &next);
    }

    #[test]
    fn selectors_reject_terminal_boards() {
        let board = BoardState::from_string("XXXOO....").unwrap();
        let config = SearchConfig::new().with_trials(50).with_seed(4);
        for kind in [SelectorKind::Minimax, SelectorKind::Mcts] {
            let mut selector = kind.into_selector(&config);
            assert!(selector.select_move(&board).is_err(), "{kind}");
        }
    }
}
