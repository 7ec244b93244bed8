//! Liar's Dice game engine.
//!
//! This module holds everything needed to play rounds, games and
//! tournaments with pluggable strategies.
//!
//! # Overview
//!
//! Every player rolls a private cup of dice. Players take turns raising a
//! bid on how many dice across the whole table show a given face, ones
//! counting as wild. After each bid the other players may call it. A call
//! is settled by counting the dice; whoever was wrong loses a die. The last
//! player holding dice wins.
//!
//! # Layers
//!
//! ```text
//! Tournament ── many independent games, stats merged by name
//!     │
//!     ▼
//!   Game ────── rounds until one player holds dice
//!     │
//!     ▼
//!   Round ───── one bid-and-challenge cycle, ends in a single loser
//!     │
//!     ▼
//! Strategy ──── make_bid / challenge_bid / prepare_for_new_round
//! ```
//!
//! # Example
//!
//! ```
//! use liars_dice::engine::{Game, GameConfig};
//! use liars_dice::strategies::{build_roster, default_roster};
//!
//! let roster = build_roster(&default_roster(), 5).unwrap();
//! let result = Game::new(roster, GameConfig::new().with_seed(1))
//!     .unwrap()
//!     .play_game()
//!     .unwrap();
//! assert_eq!(result.standings.len(), 5);
//! ```

pub mod bid;
pub mod config;
pub mod game;
pub mod observer;
pub mod player;
pub mod probability;
pub mod round;
pub mod stats;
pub mod strategy;
pub mod tournament;

#[cfg(test)]
pub(crate) mod testing;

pub use bid::Bid;
pub use config::{ConfigError, GameConfig, TournamentConfig};
pub use game::{Game, GameResult};
pub use observer::{ConsoleObserver, LineObserver, LogObserver, Narration, Observer};
pub use player::Player;
pub use probability::estimate_truth_probability;
pub use round::{Phase, Round, RoundOutcome};
pub use stats::PlayerStats;
pub use strategy::{
    BidContext, BidRecord, ChallengeContext, DiceCount, RoundSetup, Strategy, StrategyError,
    StrategyResult,
};
pub use tournament::{PlayerReport, Tournament, TournamentReport};
