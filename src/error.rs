//! Error types for the Liar's Dice crate.

use thiserror::Error;

use crate::engine::config::ConfigError;
use crate::engine::strategy::StrategyError;

/// Main error type for the crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A round was set up with fewer than two players.
    #[error("a round needs at least 2 players, got {players}")]
    InvalidRoundState {
        /// Players seated.
        players: usize,
    },

    /// A strategy failed; the game is aborted.
    #[error("strategy for {player} failed: {source}")]
    Strategy {
        /// Owner of the failing strategy.
        player: String,
        /// What the strategy reported.
        #[source]
        source: StrategyError,
    },

    /// Preset dice were given for the wrong number of seats.
    #[error("preset dice cover {got} players but the round has {expected}")]
    DiceMismatch {
        /// Seats in the round.
        expected: usize,
        /// Dice lists supplied.
        got: usize,
    },

    /// A seat's preset dice do not match the dice it holds.
    #[error("{player} holds {expected} dice but {got} preset faces were given")]
    SeatDiceMismatch {
        /// Seat name.
        player: String,
        /// Dice the seat holds.
        expected: usize,
        /// Faces supplied.
        got: usize,
    },

    /// A name not in the roster.
    #[error("no player named '{0}' in the roster")]
    UnknownPlayer(String),

    /// Two seats share a name.
    #[error("player name '{0}' appears more than once")]
    DuplicatePlayer(String),

    /// The tournament worker pool could not be built.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading or writing a file failed.
    #[error("failed to {operation}: {source}")]
    Io {
        /// What was being attempted.
        operation: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, Error>;
