//! Analyze command - minimax and symmetry analysis of a position

use std::collections::{HashSet, VecDeque};

use anyhow::Result;
use clap::Parser;

use crate::app::SearchConfig;
use crate::cli::output::{format_number, print_section};
use crate::search::Minimax;
use crate::tictactoe::{BoardState, lines, symmetry::D4Transform, to_coords};

#[derive(Parser, Debug)]
#[command(about = "Analyze a position with minimax and D4 symmetry")]
pub struct AnalyzeArgs {
    /// Board position, e.g. "XX.OO...." with an optional _X/_O turn suffix;
    /// omit for the empty board
    pub position: Option<String>,

    /// Rule variant ('standard' or 'misere')
    #[arg(long, default_value = "standard")]
    pub variant: String,

    /// Show all 8 D4 symmetry transformations
    #[arg(long)]
    pub visualize: bool,

    /// Count the reachable canonical states of the game
    #[arg(long)]
    pub states: bool,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let variant = super::parse_variant(&args.variant)?;

    let state = match &args.position {
        Some(s) => BoardState::from_string(s)?,
        None => BoardState::new(),
    };

    print_section("Position Analysis");
    println!("{state}");

    if !state.is_valid() {
        println!("\nWarning: this position is not reachable by alternating play");
    }

    let result = variant.result(&state);
    println!("\nResult under {variant} rules: {result}");

    if !result.is_over() {
        let engine = Minimax::new(&SearchConfig::new().with_variant(variant));
        let (value, moves) = engine.optimal_moves(&state)?;
        let verdict = match value {
            1 => "X can force a win",
            -1 => "O can force a win",
            _ => "best play draws",
        };
        println!("\nMinimax value: {value} ({verdict})");
        println!("Optimal moves (all minimax-equivalent):");
        for position in &moves {
            let (row, col) = to_coords(*position);
            println!("  - position {position} (row {row}, col {col})");
        }

        match lines::winning_or_blocking_move(&state.cells) {
            Some(position) => {
                let (row, col) = to_coords(position);
                println!("\nWinning-or-blocking cell: position {position} (row {row}, col {col})");
            }
            None => println!("\nNo line is one move from completion"),
        }
    }

    let canonical = state.canonical();
    if canonical == state {
        println!("\nThis state is already in canonical form");
    } else {
        println!("\nCanonical form:");
        println!("{canonical}");
    }

    if args.visualize {
        println!("\nAll D4 symmetry transformations:");
        for (i, transform) in D4Transform::all().iter().enumerate() {
            let transformed = state.transform(transform);
            println!(
                "\n{}. rotation {}°{}",
                i + 1,
                transform.rotation,
                if transform.reflection {
                    ", reflected"
                } else {
                    ""
                }
            );
            println!("{transformed}");
        }
    }

    if args.states {
        let count = count_reachable_canonical_states();
        println!(
            "\nReachable canonical states under D4 reduction: {}",
            format_number(count)
        );
    }

    Ok(())
}

/// Count canonical states reachable from the standard starting position —
/// the classic 765-state enumeration.
pub fn count_reachable_canonical_states() -> usize {
    let mut canonical_states = HashSet::new();
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    let root = BoardState::new();
    visited.insert(root.encode());
    queue.push_back(root);

    while let Some(state) = queue.pop_front() {
        canonical_states.insert(state.canonical().encode());

        for position in state.legal_moves() {
            let next = state
                .make_move(position)
                .expect("legal move generation should not fail");
            if visited.insert(next.encode()) {
                queue.push_back(next);
            }
        }
    }

    canonical_states.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_state_count_matches_classic_enumeration() {
        assert_eq!(count_reachable_canonical_states(), 765);
    }
}
