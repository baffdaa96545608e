//! Integration suite for the Monte Carlo tree search engine
//! Validates trial accounting, tree reuse, and playing strength invariants

use oxo::app::SearchConfig;
use oxo::search::{MctsTree, MoveSelector, SelectorKind};
use oxo::tictactoe::{BoardState, Game, GameOutcome, Player, Variant};

fn config(seed: u64) -> SearchConfig {
    SearchConfig::new().with_seed(seed)
}

mod trial_accounting {
    use super::*;

    #[test]
    fn budget_flows_through_the_root() {
        let mut tree = MctsTree::new(&BoardState::new(), &config(1));
        tree.run_trials(5_000);
        assert_eq!(tree.root_trials(), 5_000);
        assert!(tree.trial_counts_consistent());

        let child_sum: u32 = tree.child_statistics().iter().map(|s| s.trials).sum();
        assert_eq!(child_sum, 5_000);
    }

    #[test]
    fn trials_are_monotonic() {
        let mut tree = MctsTree::new(&BoardState::new(), &config(2));
        let mut previous = 0;
        for _ in 0..10 {
            tree.run_trials(100);
            let current = tree.root_trials();
            assert!(current > previous);
            previous = current;
            assert!(tree.trial_counts_consistent());
        }
    }

    #[test]
    fn symmetry_pruning_caps_the_opening_branching() {
        let mut tree = MctsTree::new(&BoardState::new(), &config(3));
        tree.run_trials(100);
        // Nine opening moves collapse to corner, edge, and center
        assert_eq!(tree.child_statistics().len(), 3);
    }
}

mod tree_reuse {
    use super::*;

    #[test]
    fn promoted_subtree_keeps_its_statistics() {
        let board = BoardState::new();
        let mut tree = MctsTree::new(&board, &config(4));
        tree.run_trials(2_000);

        let position = tree.best_move().unwrap();
        let promoted_trials = tree
            .child_statistics()
            .iter()
            .find(|s| s.position == position)
            .unwrap()
            .trials;

        let after = board.make_move(position).unwrap();
        tree.advance_root(position, &after);

        assert_eq!(tree.root_board(), &after);
        assert_eq!(tree.root_trials(), promoted_trials);
        assert!(tree.trial_counts_consistent());
    }

    #[test]
    fn reused_and_fresh_trees_agree_on_a_forced_position() {
        // Walk a tree through 0, 3, 1, 4; the resulting position has a single
        // winning reply, so reuse and a fresh build must choose the same move
        let mut board = BoardState::new();
        let mut tree = MctsTree::new(&board, &config(5));
        tree.run_trials(500);

        for position in [0, 3, 1, 4] {
            let after = board.make_move(position).unwrap();
            tree.advance_root(position, &after);
            board = after;
        }

        tree.run_trials(2_000);
        let reused_choice = tree.best_move().unwrap();

        let mut fresh = MctsTree::new(&board, &config(6));
        fresh.run_trials(2_000);

        assert_eq!(reused_choice, 2);
        assert_eq!(fresh.best_move().unwrap(), 2);
    }
}

mod strength {
    use super::*;

    fn duel(mcts_side: Player, seed: u64) -> Option<GameOutcome> {
        let variant = Variant::Standard;
        let config = SearchConfig::new()
            .with_variant(variant)
            .with_trials(3_000)
            .with_seed(seed);
        let (x_kind, o_kind) = match mcts_side {
            Player::X => (SelectorKind::Mcts, SelectorKind::Minimax),
            Player::O => (SelectorKind::Minimax, SelectorKind::Mcts),
        };
        let mut x_selector = x_kind.into_selector(&config);
        let mut o_selector = o_kind.into_selector(&config);

        let mut game = Game::new(variant);
        while !game.is_over() {
            let position = match game.to_move() {
                Player::X => x_selector.select_move(game.state()).unwrap(),
                Player::O => o_selector.select_move(game.state()).unwrap(),
            };
            game.play(position).unwrap();
            let after = *game.state();
            x_selector.notify_move(position, &after);
            o_selector.notify_move(position, &after);
        }
        game.outcome
    }

    #[test]
    fn minimax_never_loses_to_mcts() {
        // The optimal side cannot lose regardless of what MCTS plays
        assert_ne!(duel(Player::X, 7), Some(GameOutcome::Win(Player::X)));
        assert_ne!(duel(Player::O, 8), Some(GameOutcome::Win(Player::O)));
    }

    #[test]
    fn mcts_takes_an_immediate_win() {
        let board = BoardState::from_string("XX.OO....").unwrap();
        let mut tree = MctsTree::new(&board, &config(9));
        tree.run_trials(3_000);
        assert_eq!(tree.best_move().unwrap(), 2);
    }

    #[test]
    fn misere_mcts_avoids_the_losing_completion() {
        let board = BoardState::from_string("XX.OO....").unwrap();
        let mut tree = MctsTree::new(
            &board,
            &SearchConfig::new()
                .with_variant(Variant::Misere)
                .with_seed(10),
        );
        tree.run_trials(3_000);
        assert_ne!(tree.best_move().unwrap(), 2);
    }
}
