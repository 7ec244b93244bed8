//! Play a single narrated game of Liar's Dice.
//!
//! Usage:
//!   cargo run --release --bin play -- [OPTIONS]
//!
//! Seats are given as `NAME` or `NAME:STRATEGY`, for example
//! `--players Alice Bob:cautious Jeff:heuristic`. Without `--players` the
//! classic five-seat table is used.

use clap::Parser;

use liars_dice::engine::{ConsoleObserver, Game, GameConfig};
use liars_dice::strategies::{build_roster, default_roster};

#[derive(Parser)]
#[command(name = "play")]
#[command(about = "Play one narrated game of Liar's Dice")]
struct Args {
    /// Seats in table order, NAME or NAME:STRATEGY
    #[arg(short, long, num_args = 2..)]
    players: Option<Vec<String>>,

    /// Dice each player starts with
    #[arg(short, long, default_value = "5")]
    dice: usize,

    /// Random seed for a reproducible game
    #[arg(short, long)]
    seed: Option<u64>,

    /// Keep the given seating order instead of shuffling
    #[arg(long)]
    no_shuffle: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let entries = args.players.unwrap_or_else(default_roster);
    let roster = build_roster(&entries, args.dice)?;

    let mut config = GameConfig::new()
        .with_starting_dice(args.dice)
        .with_shuffle(!args.no_shuffle);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let observer = ConsoleObserver;
    let result = Game::new(roster, config)?
        .with_observer(&observer)
        .play_game()?;

    println!();
    println!("Rounds played: {}", result.rounds);
    Ok(())
}
