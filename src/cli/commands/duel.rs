//! Duel command - pit two engines against each other

use std::{fs::File, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::app::{PlayoutPolicy, SearchConfig};
use crate::cli::output::{create_duel_progress, format_number, print_kv, print_section};
use crate::search::{MoveSelector, SelectorKind};
use crate::tictactoe::{Game, GameOutcome, Player};

#[derive(Parser, Debug)]
#[command(about = "Run engine-vs-engine games and tally the results")]
pub struct DuelArgs {
    /// Engine playing X
    #[arg(long, value_enum, default_value_t = SelectorKind::Mcts)]
    pub x_engine: SelectorKind,

    /// Engine playing O
    #[arg(long, value_enum, default_value_t = SelectorKind::Minimax)]
    pub o_engine: SelectorKind,

    /// Number of games
    #[arg(long, short = 'g', default_value_t = 20)]
    pub games: usize,

    /// Rule variant ('standard' or 'misere')
    #[arg(long, default_value = "standard")]
    pub variant: String,

    /// MCTS trial budget per decision
    #[arg(long, default_value_t = 10_000)]
    pub trials: usize,

    /// Use uniform random playouts instead of guided ones
    #[arg(long)]
    pub uniform_playouts: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export the summary as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Serialize)]
struct DuelSummary {
    x_engine: String,
    o_engine: String,
    variant: String,
    games: usize,
    trials: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

pub fn execute(args: DuelArgs) -> Result<()> {
    let variant = super::parse_variant(&args.variant)?;

    let mut config = SearchConfig::new()
        .with_variant(variant)
        .with_trials(args.trials);
    if args.uniform_playouts {
        config = config.with_playout(PlayoutPolicy::Uniform);
    }

    println!(
        "Running {} games: {} (X) vs {} (O), {} rules, {} trials per MCTS decision",
        args.games,
        args.x_engine,
        args.o_engine,
        variant,
        format_number(args.trials)
    );

    let mut x_wins = 0usize;
    let mut o_wins = 0usize;
    let mut draws = 0usize;

    let progress = create_duel_progress(args.games as u64);

    for game_index in 0..args.games {
        // Distinct per-game seeds keep runs reproducible without replaying
        // the identical game every time
        let game_config = match args.seed {
            Some(seed) => config.clone().with_seed(seed + game_index as u64),
            None => config.clone(),
        };

        let mut x_selector = args.x_engine.into_selector(&game_config);
        let mut o_selector = args.o_engine.into_selector(&game_config);

        let mut game = Game::new(variant);
        while !game.is_over() {
            let position = match game.to_move() {
                Player::X => x_selector.select_move(game.state())?,
                Player::O => o_selector.select_move(game.state())?,
            };
            game.play(position)?;
            let after = *game.state();
            x_selector.notify_move(position, &after);
            o_selector.notify_move(position, &after);
        }

        match game.outcome {
            Some(GameOutcome::Win(Player::X)) => x_wins += 1,
            Some(GameOutcome::Win(Player::O)) => o_wins += 1,
            Some(GameOutcome::Draw) => draws += 1,
            None => {}
        }

        progress.set_message(format!("X {x_wins} / O {o_wins} / draw {draws}"));
        progress.inc(1);
    }

    progress.finish_and_clear();

    print_section("Duel Results");
    print_kv("X engine", &args.x_engine.to_string());
    print_kv("O engine", &args.o_engine.to_string());
    print_kv("Variant", &variant.to_string());
    print_kv("Games", &format_number(args.games));
    print_kv("X wins", &format_number(x_wins));
    print_kv("O wins", &format_number(o_wins));
    print_kv("Draws", &format_number(draws));

    if let Some(path) = args.export {
        let summary = DuelSummary {
            x_engine: args.x_engine.to_string(),
            o_engine: args.o_engine.to_string(),
            variant: variant.to_string(),
            games: args.games,
            trials: args.trials,
            x_wins,
            o_wins,
            draws,
        };
        serde_json::to_writer_pretty(File::create(&path)?, &summary)?;
        println!("\nSummary exported to: {}", path.display());
    }

    Ok(())
}
