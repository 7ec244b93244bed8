//! The default strategy.
//!
//! Opens at one two, then nudges the face up by one each turn, moving to the
//! next count once the face reaches six. Calls any bid it rates below 40%.
//!
//! The wrap from `(c x 6)` to `(c + 1 x 2)` does not outrank the standing
//! bid, so the engine treats it as a call on whoever bid `(c x 6)`.

use crate::engine::bid::{Bid, MAX_FACE, MIN_FACE};
use crate::engine::strategy::{BidContext, ChallengeContext, Strategy, StrategyResult};

/// Call threshold on the truth estimate.
pub const CALL_THRESHOLD: f64 = 0.4;

/// Always raises the face by one; calls unlikely bids.
#[derive(Debug, Clone, Default)]
pub struct IncrementalStrategy;

impl IncrementalStrategy {
    /// Create the strategy.
    pub fn new() -> Self {
        Self
    }

    /// The bid this strategy makes over `current`.
    pub fn next_bid(current: Option<Bid>) -> Bid {
        match current {
            None => Bid::new(1, MIN_FACE),
            Some(bid) if bid.face < MAX_FACE => Bid::new(bid.count, bid.face + 1),
            Some(bid) => Bid::new(bid.count + 1, MIN_FACE),
        }
    }
}

impl Strategy for IncrementalStrategy {
    fn make_bid(&mut self, ctx: &BidContext<'_>) -> StrategyResult<Bid> {
        Ok(Self::next_bid(ctx.current_bid))
    }

    fn challenge_bid(&mut self, ctx: &ChallengeContext<'_>) -> StrategyResult<bool> {
        Ok(ctx.probability_of_truth < CALL_THRESHOLD)
    }

    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }

    fn label(&self) -> &str {
        "incremental"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::strategy::DiceCount;

    fn challenge(probability: f64, out_of_turn: bool) -> bool {
        let counts = [DiceCount::new("a", 2), DiceCount::new("b", 2)];
        let ctx = ChallengeContext {
            history: &[],
            current_bid: Bid::new(2, 3),
            dice_counts: &counts,
            probability_of_truth: probability,
            turns_until_own_turn: 0,
            own_dice: &[2, 5],
            out_of_turn,
        };
        IncrementalStrategy::new().challenge_bid(&ctx).unwrap()
    }

    #[test]
    fn test_bid_sequence() {
        assert_eq!(IncrementalStrategy::next_bid(None), Bid::new(1, 2));
        assert_eq!(IncrementalStrategy::next_bid(Some(Bid::new(1, 2))), Bid::new(1, 3));
        assert_eq!(IncrementalStrategy::next_bid(Some(Bid::new(3, 5))), Bid::new(3, 6));
        assert_eq!(IncrementalStrategy::next_bid(Some(Bid::new(3, 6))), Bid::new(4, 2));
    }

    #[test]
    fn test_wrap_does_not_raise() {
        let standing = Bid::new(3, 6);
        let next = IncrementalStrategy::next_bid(Some(standing));
        assert!(!next.is_higher_than(Some(&standing)));
    }

    #[test]
    fn test_make_bid_uses_current_bid() {
        let counts = [DiceCount::new("a", 1), DiceCount::new("b", 1)];
        let ctx = BidContext {
            history: &[],
            current_bid: Some(Bid::new(1, 4)),
            dice_counts: &counts,
            turns_until_own_turn: 1,
            own_dice: &[3],
        };
        let bid = IncrementalStrategy::new().make_bid(&ctx).unwrap();
        assert_eq!(bid, Bid::new(1, 5));
    }

    #[test]
    fn test_calls_below_threshold() {
        assert!(challenge(0.1, false));
        assert!(challenge(0.39, true));
        assert!(!challenge(0.4, false));
        assert!(!challenge(0.9, true));
    }
}
