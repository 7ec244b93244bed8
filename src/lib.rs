//! # Liar's Dice
//!
//! A round engine and tournament simulator for Liar's Dice with pluggable
//! player strategies.
//!
//! ## Features
//!
//! - **Round State Machine**: Bidding, challenge polling and resolution with
//!   wild ones and out-of-turn calls
//! - **Strategy Trait**: Plug in any decision logic; illegal bids are turned
//!   into calls instead of errors
//! - **Tournaments**: Thousands of seeded games in parallel with per-player
//!   statistics
//! - **Narration**: Optional observers for console, log or custom output
//!
//! ## Quick Start
//!
//! ```
//! use liars_dice::{Tournament, TournamentConfig};
//! use liars_dice::strategies::{build_roster, default_roster};
//!
//! let roster = build_roster(&default_roster(), 5).unwrap();
//! let config = TournamentConfig::new().with_games(20).with_seed(42);
//! let report = Tournament::new(roster, config).unwrap().run().unwrap();
//!
//! for player in &report.players {
//!     println!("{}: {} wins", player.name, player.stats.wins());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`engine`]: Bids, probability model, rounds, games and tournaments
//! - [`strategies`]: Built-in strategies
//! - [`error`]: Crate error type

#![warn(missing_docs)]

/// Game engine module.
pub mod engine;

/// Error types.
pub mod error;

/// Built-in strategy implementations.
pub mod strategies;

pub use engine::{
    Bid, Game, GameConfig, GameResult, Player, PlayerStats, Round, RoundOutcome, Strategy,
    Tournament, TournamentConfig, TournamentReport,
};
pub use error::{Error, Result};
