//! A conservative strategy that only bids what it believes.
//!
//! It opens on the face it holds most of and raises to the most believable
//! legal bid. Once nothing left on the table clears its safety threshold it
//! stops raising and calls instead.

use crate::engine::bid::{Bid, MAX_FACE, MIN_FACE};
use crate::engine::probability::estimate_truth_probability;
use crate::engine::strategy::{
    total_dice, BidContext, ChallengeContext, Strategy, StrategyResult,
};

/// Lowest truth estimate the strategy will put its name to.
pub const SAFE_BID_THRESHOLD: f64 = 0.7;

/// On-turn call threshold.
pub const CALL_THRESHOLD: f64 = 0.5;

/// Out-of-turn call threshold.
pub const OUT_OF_TURN_THRESHOLD: f64 = 0.2;

/// Raises only while the bid stays believable.
#[derive(Debug, Clone)]
pub struct CautiousStrategy {
    safe_threshold: f64,
}

impl Default for CautiousStrategy {
    fn default() -> Self {
        Self {
            safe_threshold: SAFE_BID_THRESHOLD,
        }
    }
}

impl CautiousStrategy {
    /// Create the strategy with the default threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the safety threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.safe_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Most believable legal raise, if it clears the threshold.
    pub fn safest_raise(&self, current: Option<Bid>, own_dice: &[u8], total: usize) -> Option<Bid> {
        let mut best: Option<(Bid, f64)> = None;
        for face in MIN_FACE..=MAX_FACE {
            for count in 1..=total {
                let bid = Bid::new(count, face);
                if !bid.is_higher_than(current.as_ref()) {
                    continue;
                }
                let truth = estimate_truth_probability(Some(&bid), Some(own_dice), total);
                // Ties go to the higher count, which leaves less room to raise
                let better = match best {
                    None => true,
                    Some((held, p)) => truth > p || (truth == p && count > held.count),
                };
                if better {
                    best = Some((bid, truth));
                }
            }
        }
        best.filter(|&(_, truth)| truth >= self.safe_threshold)
            .map(|(bid, _)| bid)
    }
}

impl Strategy for CautiousStrategy {
    fn make_bid(&mut self, ctx: &BidContext<'_>) -> StrategyResult<Bid> {
        let total = total_dice(ctx.dice_counts);
        Ok(self
            .safest_raise(ctx.current_bid, ctx.own_dice, total)
            .or(ctx.current_bid)
            .unwrap_or(Bid::new(1, MIN_FACE)))
    }

    fn challenge_bid(&mut self, ctx: &ChallengeContext<'_>) -> StrategyResult<bool> {
        let threshold = if ctx.out_of_turn {
            OUT_OF_TURN_THRESHOLD
        } else {
            CALL_THRESHOLD
        };
        Ok(ctx.probability_of_truth < threshold)
    }

    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }

    fn label(&self) -> &str {
        "cautious"
    }
}
