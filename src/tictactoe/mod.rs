//! Tic-Tac-Toe domain: board representation, line scanning, D4 symmetry,
//! rule variants, and driver-facing game state.

pub mod board;
pub mod game;
pub mod lines;
pub mod rules;
pub mod symmetry;

pub use board::{BoardState, Cell, Player, to_coords, to_position};
pub use game::{Game, GameOutcome, Move};
pub use rules::{GameResult, Variant};
pub use symmetry::{D4Transform, boards_equivalent};
