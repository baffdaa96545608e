//! High-level game management for drivers

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};
use super::rules::{GameResult, Variant};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// A game in progress, holding the authoritative board and move history.
///
/// The driver owns board mutation: engines receive a copy of the current
/// state and the chosen move is applied here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub variant: Variant,
    state: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game from the standard initial position
    pub fn new(variant: Variant) -> Self {
        Game {
            variant,
            state: BoardState::new(),
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// The current board state
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// The player to move next
    pub fn to_move(&self) -> Player {
        self.state.to_move
    }

    /// Whether the game has finished
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Play a move at `position`.
    ///
    /// # Errors
    ///
    /// Returns `GameOver` if the game already finished, or the board's own
    /// error for an out-of-range or occupied position (the driver re-prompts
    /// on those).
    pub fn play(&mut self, position: usize) -> Result<(), crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let player = self.state.to_move;
        let next = self.state.make_move(position)?;

        self.moves.push(Move { position, player });
        self.state = next;

        self.outcome = match self.variant.result(&self.state) {
            GameResult::Win(winner) => Some(GameOutcome::Win(winner)),
            GameResult::Draw => Some(GameOutcome::Draw),
            GameResult::InProgress => None,
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_to_win() {
        let mut game = Game::new(Variant::Standard);
        for pos in [0, 3, 1, 4, 2] {
            game.play(pos).unwrap();
        }
        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
        assert!(game.play(5).is_err());
    }

    #[test]
    fn test_misere_outcome() {
        let mut game = Game::new(Variant::Misere);
        // X completes the top row and loses
        for pos in [0, 3, 1, 4, 2] {
            game.play(pos).unwrap();
        }
        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::O)));
    }

    #[test]
    fn test_rejects_occupied_cell() {
        let mut game = Game::new(Variant::Standard);
        game.play(4).unwrap();
        assert!(game.play(4).is_err());
        assert_eq!(game.moves.len(), 1);
    }

    #[test]
    fn test_draw_game() {
        let mut game = Game::new(Variant::Standard);
        for pos in [0, 1, 2, 4, 3, 6, 5, 8, 7] {
            game.play(pos).unwrap();
        }
        assert_eq!(game.outcome, Some(GameOutcome::Draw));
    }
}
