//! Play command - interactive console game against an engine

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use crate::app::{PlayoutPolicy, SearchConfig};
use crate::cli::output::render_board;
use crate::search::{MoveSelector, SelectorKind};
use crate::tictactoe::{Game, GameOutcome, Player, to_coords, to_position};

#[derive(Parser, Debug)]
#[command(about = "Play an interactive game against an engine")]
pub struct PlayArgs {
    /// Engine used for AI moves
    #[arg(long, short = 'e', value_enum, default_value_t = SelectorKind::Mcts)]
    pub engine: SelectorKind,

    /// Rule variant ('standard' or 'misere')
    #[arg(long, default_value = "standard")]
    pub variant: String,

    /// Side(s) the AI controls ('x', 'o', 'both', 'none')
    #[arg(long, default_value = "o")]
    pub ai: String,

    /// MCTS trial budget per decision
    #[arg(long, default_value_t = 100_000)]
    pub trials: usize,

    /// Use uniform random playouts instead of guided ones
    #[arg(long)]
    pub uniform_playouts: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let variant = super::parse_variant(&args.variant)?;
    let (ai_x, ai_o) = match args.ai.to_lowercase().as_str() {
        "x" => (true, false),
        "o" => (false, true),
        "both" => (true, true),
        "none" => (false, false),
        other => anyhow::bail!("unknown ai side '{other}' (expected 'x', 'o', 'both', or 'none')"),
    };

    let mut config = SearchConfig::new()
        .with_variant(variant)
        .with_trials(args.trials);
    if args.uniform_playouts {
        config = config.with_playout(PlayoutPolicy::Uniform);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut x_selector = ai_x.then(|| args.engine.into_selector(&config));
    let mut o_selector = ai_o.then(|| args.engine.into_selector(&config));

    println!("\nWelcome to Tic Tac Toe! ({variant} rules)");
    let mut game = Game::new(variant);
    println!("\n{}", render_board(game.state()));

    let stdin = io::stdin();
    let mut input = stdin.lock();

    while !game.is_over() {
        let mover = game.to_move();
        let selector = match mover {
            Player::X => &mut x_selector,
            Player::O => &mut o_selector,
        };

        let position = match selector {
            Some(engine) => {
                let position = engine.select_move(game.state())?;
                let (row, col) = to_coords(position);
                println!("{} plays {row} {col}", player_name(mover));
                position
            }
            None => prompt_move(&mut input, &game)?,
        };

        game.play(position)?;
        let after = *game.state();
        if let Some(engine) = &mut x_selector {
            engine.notify_move(position, &after);
        }
        if let Some(engine) = &mut o_selector {
            engine.notify_move(position, &after);
        }

        println!("\n{}", render_board(game.state()));
    }

    println!("Game over!");
    match game.outcome {
        Some(GameOutcome::Win(player)) => println!("{} won!", player_name(player)),
        Some(GameOutcome::Draw) => println!("Tie game!"),
        None => {}
    }

    Ok(())
}

fn player_name(player: Player) -> &'static str {
    match player {
        Player::X => "X",
        Player::O => "O",
    }
}

/// Prompt until a legal move is entered.
///
/// Out-of-range and occupied cells print a message and re-prompt; only a
/// closed input stream aborts.
fn prompt_move(input: &mut impl BufRead, game: &Game) -> Result<usize> {
    loop {
        print!("Enter row and column (0-2 0-2): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input closed before the game finished");
        }

        let tokens: Vec<usize> = line
            .split_whitespace()
            .filter_map(|t| t.parse().ok())
            .collect();
        let &[row, col] = tokens.as_slice() else {
            println!("Please enter two numbers between 0 and 2.");
            continue;
        };

        if row > 2 || col > 2 {
            println!("{row} {col} is outside the board!");
            continue;
        }

        let position = to_position(row, col);
        if !game.state().is_empty(position) {
            println!("{row} {col} is already occupied!");
            continue;
        }

        return Ok(position);
    }
}
