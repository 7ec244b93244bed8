//! Running statistics for a player.
//!
//! Counters and sequences only ever grow. A game works on its own copy of a
//! player's stats; the tournament folds each game's copy back into a single
//! per-name aggregate with [`PlayerStats::merge`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cumulative statistics for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Finishing position per game, 0 = winner.
    pub placements: Vec<usize>,
    /// Bids accepted into a round history.
    pub bids: usize,
    /// Truth estimate recorded at every call this player made.
    pub calls: Vec<f64>,
    /// Times one of this player's bids was called.
    pub bids_called: usize,
    /// Called bids that turned out true.
    pub successful_bids: usize,
    /// Calls that caught a false bid.
    pub successful_calls: usize,
    /// Calls made before the player's turn came up.
    pub calls_out_of_turn: usize,
    /// Dice held at the end of each game.
    pub dice_left: Vec<usize>,
}

impl PlayerStats {
    /// Create empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Games played.
    pub fn games(&self) -> usize {
        self.placements.len()
    }

    /// Games won.
    pub fn wins(&self) -> usize {
        self.placements.iter().filter(|&&p| p == 0).count()
    }

    /// Average finishing position, 1-based.
    pub fn average_placement(&self) -> Option<f64> {
        if self.placements.is_empty() {
            return None;
        }
        let sum: usize = self.placements.iter().sum();
        Some((sum + self.placements.len()) as f64 / self.placements.len() as f64)
    }

    /// Average truth estimate at the moment of calling.
    pub fn average_call_probability(&self) -> f64 {
        if self.calls.is_empty() {
            return 0.0;
        }
        self.calls.iter().sum::<f64>() / self.calls.len() as f64
    }

    /// Share of calls that were correct. 1.0 before any call.
    pub fn call_accuracy(&self) -> f64 {
        if self.calls.is_empty() {
            return 1.0;
        }
        self.successful_calls as f64 / self.calls.len() as f64
    }

    /// Share of called bids that held up. 1.0 before any bid was called.
    pub fn bid_accuracy(&self) -> f64 {
        if self.bids_called == 0 {
            return 1.0;
        }
        self.successful_bids as f64 / self.bids_called as f64
    }

    /// Dice left in games the player survived.
    pub fn winning_dice(&self) -> impl Iterator<Item = usize> + '_ {
        self.dice_left.iter().copied().filter(|&d| d > 0)
    }

    /// Average dice left in games the player won.
    pub fn average_dice_left(&self) -> f64 {
        let (sum, n) = self
            .winning_dice()
            .fold((0usize, 0usize), |(s, n), d| (s + d, n + 1));
        if n == 0 {
            return 0.0;
        }
        sum as f64 / n as f64
    }

    /// Record the result of a finished game.
    pub fn record_game(&mut self, placement: usize, dice_left: usize) {
        self.placements.push(placement);
        self.dice_left.push(dice_left);
    }

    /// Fold another set of stats into this one.
    pub fn merge(&mut self, other: &PlayerStats) {
        self.placements.extend_from_slice(&other.placements);
        self.bids += other.bids;
        self.calls.extend_from_slice(&other.calls);
        self.bids_called += other.bids_called;
        self.successful_bids += other.successful_bids;
        self.successful_calls += other.successful_calls;
        self.calls_out_of_turn += other.calls_out_of_turn;
        self.dice_left.extend_from_slice(&other.dice_left);
    }

    /// Clear everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let average = self
            .average_placement()
            .map(|a| format!("{:.2}", a))
            .unwrap_or_else(|| "-".to_string());
        writeln!(f, "-------------- {} Games --------------", self.games())?;
        writeln!(f, "| performance -- w: {}, avg: {}", self.wins(), average)?;
        writeln!(
            f,
            "| bids -- total: {}, c: {}, s: {}, acc: {:.2}",
            self.bids,
            self.bids_called,
            self.successful_bids,
            self.bid_accuracy()
        )?;
        writeln!(
            f,
            "| calls -- total: {}, oot: {}, s: {}, avg: {:.2}, acc: {:.2}",
            self.calls.len(),
            self.calls_out_of_turn,
            self.successful_calls,
            self.average_call_probability(),
            self.call_accuracy()
        )?;
        writeln!(f, "| dice left -- avg: {:.0}", self.average_dice_left())?;
        write!(f, "-------------------------------------")
    }
}
