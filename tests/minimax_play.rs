//! Integration suite for the exhaustive minimax engine
//! Validates game-theoretic optimality and the engine's ownership contract

use oxo::app::SearchConfig;
use oxo::search::{Minimax, MoveSelector, SelectorKind};
use oxo::tictactoe::{BoardState, Game, GameOutcome, Player, Variant};

fn engine(variant: Variant, seed: u64) -> Minimax {
    Minimax::new(&SearchConfig::new().with_variant(variant).with_seed(seed))
}

mod optimality {
    use super::*;

    #[test]
    fn empty_board_is_a_draw() {
        let mut minimax = engine(Variant::Standard, 1);
        let result = minimax.best_move(&BoardState::new()).unwrap();
        assert_eq!(result.value, 0);
        assert!(result.position.is_some());
    }

    #[test]
    fn empty_board_is_a_draw_under_misere() {
        let mut minimax = engine(Variant::Misere, 1);
        let result = minimax.best_move(&BoardState::new()).unwrap();
        assert_eq!(result.value, 0);
    }

    #[test]
    fn completes_the_winning_row() {
        // X X .
        // O O .
        // . . .   X to move wins at (0, 2)
        let board = BoardState::from_string("XX.OO....").unwrap();
        let mut minimax = engine(Variant::Standard, 2);
        let result = minimax.best_move(&board).unwrap();
        assert_eq!(result.value, 1);
        assert_eq!(result.position, Some(2));
        assert_eq!(oxo::tictactoe::to_coords(2), (0, 2));
    }

    #[test]
    fn winning_or_blocking_agrees_with_minimax() {
        let board = BoardState::from_string("XX.OO....").unwrap();
        assert_eq!(
            oxo::tictactoe::lines::winning_or_blocking_move(&board.cells),
            Some(2)
        );
    }
}

mod ownership {
    use super::*;

    #[test]
    fn input_board_is_unchanged_by_a_search() {
        let board = BoardState::from_string("X...O...._O").unwrap();
        let snapshot = board.encode();
        let mut minimax = engine(Variant::Standard, 3);
        minimax.best_move(&board).unwrap();
        assert_eq!(board.encode(), snapshot);
    }

    #[test]
    fn terminal_board_is_rejected() {
        let board = BoardState::from_string("XXXOO....").unwrap();
        let mut minimax = engine(Variant::Standard, 3);
        assert!(minimax.best_move(&board).is_err());
    }
}

mod self_play {
    use super::*;

    fn play_out(variant: Variant, seed: u64) -> Option<GameOutcome> {
        let config = SearchConfig::new().with_variant(variant).with_seed(seed);
        let mut x_selector = SelectorKind::Minimax.into_selector(&config);
        let mut o_selector = SelectorKind::Minimax.into_selector(&config);

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
    fn perfect_play_never_produces_a_winner() {
        for seed in 0..2 {
            assert_eq!(play_out(Variant::Standard, seed), Some(GameOutcome::Draw));
        }
    }

    #[test]
    fn perfect_misere_play_never_produces_a_winner() {
        for seed in 0..2 {
            assert_eq!(play_out(Variant::Misere, seed), Some(GameOutcome::Draw));
        }
    }
}
