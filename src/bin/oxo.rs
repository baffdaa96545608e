//! oxo CLI - play against, pit, and analyze the tic-tac-toe engines

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Tic-tac-toe move-selection engines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against an engine
    Play(oxo::cli::commands::play::PlayArgs),

    /// Run engine-vs-engine games and tally the results
    Duel(oxo::cli::commands::duel::DuelArgs),

    /// Analyze a position with minimax and D4 symmetry
    Analyze(oxo::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => oxo::cli::commands::play::execute(args),
        Commands::Duel(args) => oxo::cli::commands::duel::execute(args),
        Commands::Analyze(args) => oxo::cli::commands::analyze::execute(args),
    }
}
