//! Configuration for games and tournaments.
//!
//! These structs control how a single game is set up (starting dice, seat
//! shuffling, seeding) and how a tournament repeats games.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dice each player starts a game with.
pub const DEFAULT_STARTING_DICE: usize = 5;

/// Games played by a tournament unless told otherwise.
pub const DEFAULT_GAMES: usize = 10_000;

/// Configuration for a single game.
///
/// # Example
/// ```
/// use liars_dice::engine::GameConfig;
///
/// let config = GameConfig::default().with_seed(7);
/// assert_eq!(config.starting_dice, 5);
/// assert!(config.shuffle);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Dice every player holds at the start of the game.
    #[serde(default = "default_starting_dice")]
    pub starting_dice: usize,

    /// Shuffle the seating order before the first round.
    #[serde(default = "default_true")]
    pub shuffle: bool,

    /// Random seed for reproducibility.
    ///
    /// If `None`, dice and seating are drawn from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_dice: DEFAULT_STARTING_DICE,
            shuffle: true,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new GameConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set starting dice per player.
    pub fn with_starting_dice(mut self, dice: usize) -> Self {
        self.starting_dice = dice;
        self
    }

    /// Builder method: set whether seats are shuffled.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_dice == 0 {
            return Err(ConfigError::InvalidStartingDice(self.starting_dice));
        }
        Ok(())
    }
}

/// Configuration for a tournament of repeated games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Number of games to play.
    #[serde(default = "default_games")]
    pub games: usize,

    /// Settings shared by every game. A seed here is the base seed; game `i`
    /// is played with `seed + i`.
    #[serde(default)]
    pub game: GameConfig,

    /// Number of worker threads.
    ///
    /// `Some(1)` plays games sequentially. `None` uses all available cores.
    #[serde(default)]
    pub threads: Option<usize>,

    /// Show a progress bar while games run.
    #[serde(default)]
    pub progress: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            games: DEFAULT_GAMES,
            game: GameConfig::default(),
            threads: None,
            progress: false,
        }
    }
}

impl TournamentConfig {
    /// Create a new TournamentConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set number of games.
    pub fn with_games(mut self, games: usize) -> Self {
        self.games = games;
        self
    }

    /// Builder method: set per-game settings.
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Builder method: set base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.game.seed = Some(seed);
        self
    }

    /// Builder method: toggle the progress bar.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.games == 0 {
            return Err(ConfigError::NoGames);
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidThreads);
        }
        self.game.validate()
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_starting_dice() -> usize {
    DEFAULT_STARTING_DICE
}

fn default_games() -> usize {
    DEFAULT_GAMES
}

fn default_true() -> bool {
    true
}

/// Errors raised while building or validating configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Players must hold at least one die.
    #[error("players must start with at least one die, got {0}")]
    InvalidStartingDice(usize),

    /// Zero games requested.
    #[error("a tournament needs at least one game")]
    NoGames,

    /// Zero worker threads requested.
    #[error("thread count must be positive")]
    InvalidThreads,

    /// Fewer than two players.
    #[error("a game needs at least 2 players, got {0}")]
    TooFewPlayers(usize),

    /// Strategy name not in the registry.
    #[error("unknown strategy '{0}' (expected incremental, heuristic or cautious)")]
    UnknownStrategy(String),

    /// Roster entry is not `NAME` or `NAME:STRATEGY`.
    #[error("malformed roster entry '{0}' (expected NAME or NAME:STRATEGY)")]
    MalformedRosterEntry(String),

    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(String),

    /// Config JSON could not be parsed.
    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.games, 10_000);
        assert_eq!(config.game.starting_dice, 5);
        assert!(config.game.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = TournamentConfig::new()
            .with_games(20)
            .with_threads(2)
            .with_seed(9)
            .with_game(GameConfig::new().with_starting_dice(3).with_seed(11));
        assert_eq!(config.games, 20);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.game.starting_dice, 3);
        assert_eq!(config.game.seed, Some(11));
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            GameConfig::new().with_starting_dice(0).validate(),
            Err(ConfigError::InvalidStartingDice(0))
        );
        assert_eq!(
            TournamentConfig::new().with_games(0).validate(),
            Err(ConfigError::NoGames)
        );
        assert_eq!(
            TournamentConfig::new().with_threads(0).validate(),
            Err(ConfigError::InvalidThreads)
        );
    }

    #[test]
    fn test_json_with_partial_fields() {
        let config = TournamentConfig::from_json_str(
            r#"{ "games": 50, "game": { "seed": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.games, 50);
        assert_eq!(config.game.seed, Some(3));
        assert_eq!(config.game.starting_dice, 5);
        assert!(config.game.shuffle);
    }

    #[test]
    fn test_json_rejects_invalid() {
        let err = TournamentConfig::from_json_str(r#"{ "games": 0 }"#).unwrap_err();
        assert_eq!(err, ConfigError::NoGames);

        let err = TournamentConfig::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
