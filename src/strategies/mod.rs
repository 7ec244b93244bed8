//! Strategy implementations.
//!
//! Each strategy is an independent type implementing the
//! [`Strategy`](crate::engine::Strategy) trait. Players own one boxed
//! strategy each.
//!
//! ## Available Strategies
//!
//! - [`incremental`]: raises the face by one every turn, calls bids below 40%
//! - [`heuristic`]: chooses raises from a per-round probability table
//! - [`cautious`]: bids only what it believes, otherwise calls
//!
//! ## Adding New Strategies
//!
//! 1. Create a new module under `src/strategies/`
//! 2. Implement the `Strategy` trait
//! 3. Register it in [`StrategyKind`]
//! 4. Add tests for its bidding and calling decisions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::config::ConfigError;
use crate::engine::player::Player;
use crate::engine::strategy::Strategy;

pub mod cautious;
pub mod heuristic;
pub mod incremental;

pub use cautious::CautiousStrategy;
pub use heuristic::HeuristicStrategy;
pub use incremental::IncrementalStrategy;

/// Strategies that can be built by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// [`IncrementalStrategy`]
    Incremental,
    /// [`HeuristicStrategy`]
    Heuristic,
    /// [`CautiousStrategy`]
    Cautious,
}

impl StrategyKind {
    /// Every registered strategy.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Incremental,
        StrategyKind::Heuristic,
        StrategyKind::Cautious,
    ];

    /// Build a strategy for the seat called `player`.
    pub fn build(&self, player: &str) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Incremental => Box::new(IncrementalStrategy::new()),
            StrategyKind::Heuristic => Box::new(HeuristicStrategy::new(player)),
            StrategyKind::Cautious => Box::new(CautiousStrategy::new()),
        }
    }

    /// Registry name.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Incremental => "incremental",
            StrategyKind::Heuristic => "heuristic",
            StrategyKind::Cautious => "cautious",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "incremental" | "default" => Ok(StrategyKind::Incremental),
            "heuristic" | "bad" => Ok(StrategyKind::Heuristic),
            "cautious" => Ok(StrategyKind::Cautious),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Parse a roster entry of the form `NAME` or `NAME:STRATEGY`.
///
/// A bare name plays the incremental strategy.
pub fn parse_seat(entry: &str) -> Result<(String, StrategyKind), ConfigError> {
    let (name, kind) = match entry.split_once(':') {
        Some((name, kind)) => (name.trim(), kind.parse()?),
        None => (entry.trim(), StrategyKind::Incremental),
    };
    if name.is_empty() {
        return Err(ConfigError::MalformedRosterEntry(entry.to_string()));
    }
    Ok((name.to_string(), kind))
}

/// Build players from roster entries.
pub fn build_roster<S: AsRef<str>>(entries: &[S], dice: usize) -> Result<Vec<Player>, ConfigError> {
    if entries.len() < 2 {
        return Err(ConfigError::TooFewPlayers(entries.len()));
    }
    entries
        .iter()
        .map(|entry| {
            let (name, kind) = parse_seat(entry.as_ref())?;
            let strategy = kind.build(&name);
            Ok(Player::with_dice(name, strategy, dice))
        })
        .collect()
}

/// The classic table: four incremental players and one heuristic player.
pub fn default_roster() -> Vec<String> {
    ["Alice", "Bob", "Charlie", "Diana"]
        .iter()
        .map(|name| format!("{}:incremental", name))
        .chain(std::iter::once("Jeff:heuristic".to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_name() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.name().parse::<StrategyKind>().unwrap(), kind);
            assert_eq!(kind.build("x").label(), kind.name());
        }
    }

    #[test]
    fn test_unknown_kind() {
        assert_eq!(
            "psychic".parse::<StrategyKind>(),
            Err(ConfigError::UnknownStrategy("psychic".to_string()))
        );
    }

    #[test]
    fn test_parse_seat() {
        assert_eq!(
            parse_seat("Jeff:heuristic").unwrap(),
            ("Jeff".to_string(), StrategyKind::Heuristic)
        );
        assert_eq!(
            parse_seat(" Alice ").unwrap(),
            ("Alice".to_string(), StrategyKind::Incremental)
        );
        assert!(matches!(
            parse_seat(":cautious"),
            Err(ConfigError::MalformedRosterEntry(_))
        ));
        assert!(matches!(
            parse_seat("Bob:nope"),
            Err(ConfigError::UnknownStrategy(_))
        ));
    }

    #[test]
    fn test_build_roster() {
        let roster = build_roster(&default_roster(), 5).unwrap();
        assert_eq!(roster.len(), 5);
        assert!(roster.iter().all(|p| p.dice_count == 5));
        assert_eq!(roster[4].name, "Jeff");
        assert_eq!(roster[4].strategy.label(), "heuristic");

        assert_eq!(
            build_roster(&["Solo"], 5).err(),
            Some(ConfigError::TooFewPlayers(1))
        );
    }
}
