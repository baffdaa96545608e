//! Tic-Tac-Toe move-selection engines
//!
//! This crate provides:
//! - Complete board, line, and D4-symmetry primitives for 3x3 Tic-Tac-Toe
//! - Standard and misère ("anti") rule variants
//! - An exhaustive minimax engine with randomized tie-breaking
//! - A Monte Carlo tree search engine with symmetry-pruned expansion and
//!   incremental tree reuse across moves
//! - A polymorphic selector seam so drivers pick an engine by configuration

pub mod app;
pub mod cli;
pub mod error;
pub mod search;
pub mod tictactoe;

pub use app::{PlayoutPolicy, SearchConfig};
pub use error::{Error, Result};
pub use search::{MctsTree, Minimax, MoveSelector, SearchResult, SelectorKind};
pub use tictactoe::{BoardState, Cell, GameResult, Player, Variant};
