//! Exhaustive depth-first search over the full game tree.
//!
//! No pruning and no transposition table: the 3x3 state space is bounded by
//! 9! continuations, so the search always terminates without an iteration
//! budget.

use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::app::SearchConfig;
use crate::tictactoe::{BoardState, Player, Variant};

/// Value and chosen move of a completed search.
///
/// `value` is the game-theoretic value from X's perspective (+1 forced X win,
/// -1 forced O win, 0 forced draw).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub value: i32,
    pub position: Option<usize>,
}

/// Exhaustive minimax engine.
///
/// X maximizes and O minimizes the signed result. Ties among equally good
/// moves are broken uniformly at random with the engine's own RNG, so a
/// seeded engine is fully reproducible.
pub struct Minimax {
    variant: Variant,
    rng: StdRng,
}

impl Minimax {
    pub fn new(config: &SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        Self {
            variant: config.variant,
            rng,
        }
    }

    /// Search the full tree below `board` and return the value and one best
    /// move, chosen uniformly among the minimax-equivalent candidates.
    ///
    /// The board is taken by reference and never mutated; the recursion works
    /// on copies.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` when called on a terminal board (a driver must
    /// check terminality before asking for a move).
    pub fn best_move(&mut self, board: &BoardState) -> crate::Result<SearchResult> {
        let (value, candidates) = self.optimal_moves(board)?;
        let position = candidates.choose(&mut self.rng).copied();
        Ok(SearchResult { value, position })
    }

    /// The position's value and every minimax-equivalent best move, in
    /// row-major order.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` for a terminal board.
    pub fn optimal_moves(&self, board: &BoardState) -> crate::Result<(i32, Vec<usize>)> {
        if self.variant.result(board).is_over() {
            return Err(crate::Error::GameOver);
        }

        let mut best_value = match board.to_move {
            Player::X => i32::MIN,
            Player::O => i32::MAX,
        };
        let mut best_moves: Vec<usize> = Vec::new();

        for position in board.legal_moves() {
            let next = board
                .make_move(position)
                .expect("legal move generation should not fail");
            let child_value = self.value(next);

            let improves = match board.to_move {
                Player::X => child_value > best_value,
                Player::O => child_value < best_value,
            };

            if improves {
                best_value = child_value;
                best_moves.clear();
                best_moves.push(position);
            } else if child_value == best_value {
                best_moves.push(position);
            }
        }

        Ok((best_value, best_moves))
    }

    /// Game-theoretic value of `board`, exploring every legal continuation
    fn value(&self, board: BoardState) -> i32 {
        let result = self.variant.result(&board);
        if result.is_over() {
            return result.signed_value();
        }

        let mut best_value = match board.to_move {
            Player::X => i32::MIN,
            Player::O => i32::MAX,
        };

        for position in board.legal_moves() {
            let next = board
                .make_move(position)
                .expect("legal move generation should not fail");
            let child_value = self.value(next);

            best_value = match board.to_move {
                Player::X => best_value.max(child_value),
                Player::O => best_value.min(child_value),
            };
        }

        best_value
    }
}
