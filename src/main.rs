//! Gomoku in the terminal
//!
//! Play against the proof-number search engine from the console.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gomoku::ui::Game;
use gomoku::{PnSearch, SearchConfig};

#[derive(Parser, Debug)]
#[command(name = "gomoku", version, about = "Play Gomoku against a proof-number search engine")]
struct Args {
    /// Node budget of one engine search
    #[arg(long, default_value_t = 300_000)]
    nodes: usize,

    /// Fraction of the best candidate score a move needs to be searched (0..=1)
    #[arg(long, default_value_t = 0.5)]
    cut: f32,

    /// Maximum attacker moves in a forced-win sequence
    #[arg(long, default_value_t = 10)]
    depth: u8,

    /// Let the human play black and move first
    #[arg(long)]
    human_first: bool,

    /// Play the moves stored in FILE before starting
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Browse the search tree after every engine move
    #[arg(long)]
    inspect: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = SearchConfig::default()
        .with_node_budget(args.nodes)
        .with_selector_cut(args.cut)
        .with_forced_win_depth(args.depth);
    log::debug!("{config:?}");

    let mut game = Game::new(PnSearch::new(config), args.human_first);
    if args.inspect {
        game = game.with_inspector(PnSearch::tree);
    }
    if let Some(path) = &args.replay {
        game.replay(path)
            .with_context(|| format!("failed to replay moves from {}", path.display()))?;
    }

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    let outcome = game.run(&mut input, &mut output).context("game loop failed")?;
    log::info!("game over: {outcome:?}");
    Ok(())
}
