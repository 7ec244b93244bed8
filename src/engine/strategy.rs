//! Strategy trait definition.
//!
//! Every player owns one strategy. The round engine calls into it at three
//! points: once when the round starts, whenever the player must bid, and
//! whenever the player may challenge the standing bid.
//!
//! All context is handed over as borrowed, read-only snapshots. A strategy
//! can inspect the round history and the table's dice counts but cannot
//! change anything the engine owns.
//!
//! # Example
//! ```
//! use liars_dice::engine::{Bid, BidContext, ChallengeContext, Strategy, StrategyResult};
//!
//! #[derive(Debug, Clone)]
//! struct AlwaysCall;
//!
//! impl Strategy for AlwaysCall {
//!     fn make_bid(&mut self, ctx: &BidContext<'_>) -> StrategyResult<Bid> {
//!         Ok(ctx.current_bid.unwrap_or(Bid::new(1, 2)))
//!     }
//!
//!     fn challenge_bid(&mut self, _ctx: &ChallengeContext<'_>) -> StrategyResult<bool> {
//!         Ok(true)
//!     }
//!
//!     fn clone_box(&self) -> Box<dyn Strategy> {
//!         Box::new(self.clone())
//!     }
//! }
//! ```

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::bid::Bid;

/// One accepted bid in the round history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRecord {
    /// Name of the player who made the bid.
    pub player: String,
    /// The bid itself.
    pub bid: Bid,
}

/// Dice held by one seat, in turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceCount {
    /// Player name.
    pub player: String,
    /// Dice the player holds this round.
    pub dice: usize,
}

/// What a strategy sees when a round starts.
#[derive(Debug, Clone, Copy)]
pub struct RoundSetup<'a> {
    /// Every seat in turn order, starting with the opening bidder.
    pub dice_counts: &'a [DiceCount],
    /// The player's own dice.
    pub own_dice: &'a [u8],
}

/// What a strategy sees when it must bid.
#[derive(Debug, Clone, Copy)]
pub struct BidContext<'a> {
    /// Accepted bids so far, oldest first.
    pub history: &'a [BidRecord],
    /// The bid to beat, if any.
    pub current_bid: Option<Bid>,
    /// Every seat in turn order.
    pub dice_counts: &'a [DiceCount],
    /// Turns before this player bids again.
    pub turns_until_own_turn: usize,
    /// The player's own dice.
    pub own_dice: &'a [u8],
}

/// What a strategy sees when it may challenge the standing bid.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeContext<'a> {
    /// Accepted bids so far, oldest first. The last entry is the bid under
    /// consideration.
    pub history: &'a [BidRecord],
    /// The bid that may be challenged.
    pub current_bid: Bid,
    /// Every seat in turn order.
    pub dice_counts: &'a [DiceCount],
    /// Truth estimate for `current_bid` from this player's point of view.
    pub probability_of_truth: f64,
    /// Turns before this player would bid.
    pub turns_until_own_turn: usize,
    /// The player's own dice.
    pub own_dice: &'a [u8],
    /// `true` when this player is not the next bidder and is only getting an
    /// early chance to call.
    pub out_of_turn: bool,
}

impl DiceCount {
    /// Create a dice count entry.
    pub fn new(player: impl Into<String>, dice: usize) -> Self {
        Self {
            player: player.into(),
            dice,
        }
    }
}

/// Total dice across a set of seats.
pub fn total_dice(dice_counts: &[DiceCount]) -> usize {
    dice_counts.iter().map(|c| c.dice).sum()
}

/// Failure inside a strategy's own computation.
///
/// This aborts the current game; the engine never retries.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct StrategyError {
    /// What went wrong.
    pub message: String,
}

impl StrategyError {
    /// Create a strategy error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type returned by strategy calls.
pub type StrategyResult<T> = Result<T, StrategyError>;

/// The decision-making capability a player carries.
///
/// Implementations have wide latitude: a bid that does not outrank the
/// standing bid is not an error, the engine turns it into a call on the
/// previous bidder.
pub trait Strategy: Debug + Send + Sync {
    /// Called once per round before any bid or challenge query.
    ///
    /// The default implementation does nothing.
    fn prepare_for_new_round(&mut self, _setup: &RoundSetup<'_>) -> StrategyResult<()> {
        Ok(())
    }

    /// Choose a bid. It should outrank `ctx.current_bid`.
    fn make_bid(&mut self, ctx: &BidContext<'_>) -> StrategyResult<Bid>;

    /// Decide whether to call the standing bid.
    fn challenge_bid(&mut self, ctx: &ChallengeContext<'_>) -> StrategyResult<bool>;

    /// Deep copy of the strategy, internal state included.
    fn clone_box(&self) -> Box<dyn Strategy>;

    /// Short label for display.
    fn label(&self) -> &str {
        "custom"
    }
}

impl Clone for Box<dyn Strategy> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_dice() {
        let counts = vec![DiceCount::new("a", 3), DiceCount::new("b", 5), DiceCount::new("c", 0)];
        assert_eq!(total_dice(&counts), 8);
        assert_eq!(total_dice(&[]), 0);
    }

    #[test]
    fn test_strategy_error_display() {
        let err = StrategyError::new("table overflow");
        assert_eq!(err.to_string(), "table overflow");
    }
}
