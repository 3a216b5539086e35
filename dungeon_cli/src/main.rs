//! Command-line entry point for the dungeon crawl.
//!
//! Usage:
//!   dungeon                 interactive start menu
//!   dungeon -n <rooms>      new game
//!   dungeon -l <file>       load a saved game

mod ui;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dungeon_core::{GameConfig, GameSession};
use dungeon_rules::GameRng;

use crate::ui::Console;

#[derive(Debug, Parser)]
#[command(name = "dungeon", version, about = "Explore a dungeon, fight monsters, find the treasure")]
struct Args {
    /// Start a new game with this many rooms
    #[arg(short = 'n', long = "new", value_name = "ROOMS", conflicts_with = "load", allow_negative_numbers = true)]
    new: Option<i64>,

    /// Load a saved game
    #[arg(short = 'l', long = "load", value_name = "FILE")]
    load: Option<PathBuf>,

    /// Configuration file (defaults to dungeon.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = GameConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    let dice = match args.seed {
        Some(seed) => GameRng::seeded(seed),
        None => GameRng::from_entropy(),
    };

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    let mut game = match (args.new, args.load) {
        (Some(rooms), _) => {
            let game = GameSession::new_game(rooms, &config, dice)?;
            writeln!(console.output(), "\nNew game started with {rooms} rooms\nStarting in room 0")?;
            game
        }
        (None, Some(path)) => {
            let game = GameSession::load(&path, &config, dice)
                .with_context(|| format!("could not load game from {}", path.display()))?;
            writeln!(
                console.output(),
                "\nGame loaded, starting in room {}",
                game.world().player.current_room
            )?;
            game
        }
        (None, None) => ui::start_menu(&mut console, &config, dice)?,
    };

    ui::play(&mut game, &mut console, &config)
}
