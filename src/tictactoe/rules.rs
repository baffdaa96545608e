//! Game variants and result computation

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// Result of scanning a board, always derived, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Win(Player),
    Draw,
    InProgress,
}

impl GameResult {
    /// Signed game value: +1 for an X win, -1 for an O win, 0 otherwise
    pub fn signed_value(self) -> i32 {
        match self {
            GameResult::Win(Player::X) => 1,
            GameResult::Win(Player::O) => -1,
            GameResult::Draw | GameResult::InProgress => 0,
        }
    }

    /// Whether the game has ended
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Win(Player::X) => write!(f, "X wins"),
            GameResult::Win(Player::O) => write!(f, "O wins"),
            GameResult::Draw => write!(f, "draw"),
            GameResult::InProgress => write!(f, "in progress"),
        }
    }
}

/// Which rules decide who a completed line favors.
///
/// Under `Misere` ("anti" tic-tac-toe) completing three-in-a-row loses the
/// game, so the line owner's opponent is the winner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    #[default]
    Standard,
    Misere,
}

impl Variant {
    /// Compute the game result of a board under this variant.
    ///
    /// Scans rows, columns, and diagonals in fixed order; the first complete
    /// line decides (legal play admits at most one owner, and malformed
    /// boards are tolerated rather than rejected). A full board with no line
    /// is a draw.
    pub fn result(self, board: &BoardState) -> GameResult {
        if let Some(owner) = board.line_owner() {
            let winner = match self {
                Variant::Standard => owner,
                Variant::Misere => owner.opponent(),
            };
            return GameResult::Win(winner);
        }

        if board.occupied_count() == 9 {
            GameResult::Draw
        } else {
            GameResult::InProgress
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Standard => write!(f, "standard"),
            Variant::Misere => write!(f, "misere"),
        }
    }
}
