//! Probability table strategy.
//!
//! At the start of each round the strategy rates every bid it could make,
//! from one die up to every die in play on each face, using its own dice.
//! When bidding it picks the raise with the widest gap between its own
//! truth estimate and the chance the hidden dice alone back the same count,
//! i.e. the bid it believes most while an opponent looking only at the
//! unknown pool believes it least.
//!
//! It calls a bid on turn only when the bid looks very unlikely (below 15%)
//! and calling beats its best raise. Out of turn it needs the bid to look
//! below 10%.

use crate::engine::bid::{Bid, MAX_FACE, MIN_FACE};
use crate::engine::probability::{estimate_truth_probability, upper_tail};
use crate::engine::strategy::{
    total_dice, BidContext, ChallengeContext, RoundSetup, Strategy, StrategyError,
    StrategyResult,
};

/// On-turn call threshold.
pub const CHALLENGE_THRESHOLD: f64 = 0.15;

/// Out-of-turn call threshold.
pub const OUT_OF_TURN_THRESHOLD: f64 = 0.1;

/// Another seat, as seen from this player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opponent {
    /// Seat name.
    pub name: String,
    /// Turns after ours before this seat bids. The seat right after us is 0.
    pub turns_away: usize,
    /// Dice the seat holds this round.
    pub dice: usize,
}

/// Picks raises from a precomputed probability table.
#[derive(Debug, Clone)]
pub struct HeuristicStrategy {
    name: String,
    own_dice: Vec<u8>,
    opponents: Vec<Opponent>,
    total_dice: usize,
    /// `table[face - 2][count - 1]`
    table: Vec<Vec<f64>>,
}

impl HeuristicStrategy {
    /// Create the strategy for the seat called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            own_dice: Vec::new(),
            opponents: Vec::new(),
            total_dice: 0,
            table: Vec::new(),
        }
    }

    /// Other seats, ordered by how soon they bid after us.
    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    /// Dice hidden from this player.
    pub fn hidden_dice(&self) -> usize {
        self.opponents.iter().map(|o| o.dice).sum()
    }

    /// Table lookup for a bid's truth estimate. Bids beyond the table are
    /// impossible.
    pub fn truth(&self, bid: &Bid) -> f64 {
        if !bid.is_well_formed() {
            return 0.0;
        }
        self.table
            .get((bid.face - MIN_FACE) as usize)
            .and_then(|row| row.get(bid.count - 1))
            .copied()
            .unwrap_or(0.0)
    }

    /// Chance the hidden dice alone hold `count` matches.
    fn hidden_support(&self, count: usize) -> f64 {
        upper_tail(count, self.hidden_dice())
    }

    /// Best raise over `current` and its truth estimate.
    ///
    /// If no raise opens a gap over the hidden-pool estimate, the standing
    /// bid is returned unchanged with a zero estimate; the engine reads that
    /// as a call.
    pub fn best_raise(&self, current: Option<Bid>) -> (Bid, f64) {
        let floor = current.unwrap_or(Bid::new(1, MIN_FACE));
        let (mut best, mut best_truth) = match current {
            None => (floor, self.truth(&floor)),
            Some(bid) => (bid, 0.0),
        };
        let mut best_gap = 0.0;

        let same_face = (floor.count + 1..=self.total_dice).map(|count| Bid::new(count, floor.face));
        let higher_faces = (floor.face + 1..=MAX_FACE).flat_map(|face| {
            (floor.count..=self.total_dice).map(move |count| Bid::new(count, face))
        });

        for candidate in same_face.chain(higher_faces) {
            let truth = self.truth(&candidate);
            let gap = truth - self.hidden_support(candidate.count);
            if gap > best_gap {
                best_gap = gap;
                best = candidate;
                best_truth = truth;
            }
        }

        (best, best_truth)
    }

    fn build_table(&mut self) {
        let own = self.own_dice.as_slice();
        let total = self.total_dice;
        self.table = (MIN_FACE..=MAX_FACE)
            .map(|face| {
                (1..=total)
                    .map(|count| {
                        estimate_truth_probability(Some(&Bid::new(count, face)), Some(own), total)
                    })
                    .collect()
            })
            .collect();
    }
}

impl Strategy for HeuristicStrategy {
    fn prepare_for_new_round(&mut self, setup: &RoundSetup<'_>) -> StrategyResult<()> {
        let n = setup.dice_counts.len();
        let seat = setup
            .dice_counts
            .iter()
            .position(|c| c.player == self.name)
            .ok_or_else(|| StrategyError::new(format!("{} is not seated this round", self.name)))?;

        self.own_dice = setup.own_dice.to_vec();
        self.total_dice = total_dice(setup.dice_counts);
        self.opponents = setup
            .dice_counts
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != seat)
            .map(|(i, c)| Opponent {
                name: c.player.clone(),
                turns_away: (i + n - seat) % n - 1,
                dice: c.dice,
            })
            .collect();
        self.opponents.sort_by_key(|o| o.turns_away);
        self.build_table();
        Ok(())
    }

    fn make_bid(&mut self, ctx: &BidContext<'_>) -> StrategyResult<Bid> {
        Ok(self.best_raise(ctx.current_bid).0)
    }

    fn challenge_bid(&mut self, ctx: &ChallengeContext<'_>) -> StrategyResult<bool> {
        let p = ctx.probability_of_truth;
        if ctx.out_of_turn {
            return Ok(p < OUT_OF_TURN_THRESHOLD);
        }
        if p < CHALLENGE_THRESHOLD {
            let (_, raise_truth) = self.best_raise(Some(ctx.current_bid));
            return Ok(1.0 - p > raise_truth);
        }
        Ok(false)
    }

    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }

    fn label(&self) -> &str {
        "heuristic"
    }
}
