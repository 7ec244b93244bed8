//! Run a Liar's Dice tournament and print per-player statistics.
//!
//! Usage:
//!   cargo run --release --bin tournament -- [OPTIONS]
//!
//! Options on the command line override the JSON config file.

use clap::Parser;
use colored::Colorize;

use liars_dice::engine::{Tournament, TournamentConfig};
use liars_dice::strategies::{build_roster, default_roster};

#[derive(Parser)]
#[command(name = "tournament")]
#[command(about = "Play many Liar's Dice games and compare strategies")]
struct Args {
    /// Seats in table order, NAME or NAME:STRATEGY
    #[arg(short, long, num_args = 2..)]
    players: Option<Vec<String>>,

    /// Configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Number of games
    #[arg(short, long)]
    games: Option<usize>,

    /// Dice each player starts with
    #[arg(short, long)]
    dice: Option<usize>,

    /// Worker threads (default: all cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Base random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write the report as JSON to this file
    #[arg(short, long)]
    output: Option<String>,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Enable info logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let mut config = match &args.config {
        Some(path) => {
            println!("Loading configuration from: {}", path);
            TournamentConfig::from_json_file(path)?
        }
        None => TournamentConfig::default(),
    };
    if let Some(games) = args.games {
        config = config.with_games(games);
    }
    if let Some(dice) = args.dice {
        config.game = config.game.with_starting_dice(dice);
    }
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if args.progress {
        config = config.with_progress(true);
    }

    let entries = args.players.unwrap_or_else(default_roster);
    let roster = build_roster(&entries, config.game.starting_dice)?;

    println!("=================================================");
    println!("  Liar's Dice Tournament");
    println!("=================================================");
    println!();
    println!("Games: {}", config.games);
    println!("Players: {}", entries.join(", "));
    println!("Starting dice: {}", config.game.starting_dice);
    println!(
        "Threads: {}",
        config
            .threads
            .map(|t| t.to_string())
            .unwrap_or_else(|| "auto".to_string())
    );
    if let Some(seed) = config.game.seed {
        println!("Seed: {}", seed);
    }
    println!();

    let mut tournament = Tournament::new(roster, config)?;
    let report = tournament.run()?;

    for player in &report.players {
        println!(
            "{} {} {}",
            player.name.bold(),
            format!("[{}]", player.strategy).bright_black(),
            format!("{:.1}% wins", 100.0 * player.win_rate()).green()
        );
        println!("{}", player.stats);
        println!();
    }

    println!(
        "Played {} games in {:.2}s ({:.0} games/s)",
        report.games, report.elapsed_seconds, report.games_per_second
    );

    if let Some(path) = &args.output {
        report.save_json(path)?;
        println!("Report saved to {}", path);
    }
    Ok(())
}
