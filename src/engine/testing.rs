//! Scripted strategy used by engine tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::engine::bid::Bid;
use crate::engine::player::Player;
use crate::engine::strategy::{
    BidContext, ChallengeContext, RoundSetup, Strategy, StrategyError, StrategyResult,
};

/// A call made on a scripted strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Prepare(String),
    Bid(String, Option<Bid>),
    Challenge { player: String, out_of_turn: bool, turns: usize, probability: f64 },
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// Plays back queued bids and challenge answers, then falls back to
/// raising the face by one and never calling.
#[derive(Debug, Clone)]
pub struct Scripted {
    name: String,
    bids: VecDeque<Bid>,
    calls: VecDeque<bool>,
    fail_on_bid: bool,
    log: CallLog,
}

impl Scripted {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            bids: VecDeque::new(),
            calls: VecDeque::new(),
            fail_on_bid: false,
            log: Arc::clone(log),
        }
    }

    pub fn bids(mut self, bids: &[Bid]) -> Self {
        self.bids = bids.iter().copied().collect();
        self
    }

    pub fn calls(mut self, calls: &[bool]) -> Self {
        self.calls = calls.iter().copied().collect();
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_on_bid = true;
        self
    }

    pub fn player(self, dice: usize) -> Player {
        let name = self.name.clone();
        Player::with_dice(name, Box::new(self), dice)
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

impl Strategy for Scripted {
    fn prepare_for_new_round(&mut self, _setup: &RoundSetup<'_>) -> StrategyResult<()> {
        self.record(Call::Prepare(self.name.clone()));
        Ok(())
    }

    fn make_bid(&mut self, ctx: &BidContext<'_>) -> StrategyResult<Bid> {
        self.record(Call::Bid(self.name.clone(), ctx.current_bid));
        if self.fail_on_bid {
            return Err(StrategyError::new("scripted failure"));
        }
        Ok(self.bids.pop_front().unwrap_or_else(|| match ctx.current_bid {
            None => Bid::new(1, 2),
            Some(b) if b.face < 6 => Bid::new(b.count, b.face + 1),
            Some(b) => Bid::new(b.count + 1, b.face),
        }))
    }

    fn challenge_bid(&mut self, ctx: &ChallengeContext<'_>) -> StrategyResult<bool> {
        self.record(Call::Challenge {
            player: self.name.clone(),
            out_of_turn: ctx.out_of_turn,
            turns: ctx.turns_until_own_turn,
            probability: ctx.probability_of_truth,
        });
        Ok(self.calls.pop_front().unwrap_or(false))
    }

    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }

    fn label(&self) -> &str {
        "scripted"
    }
}

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}
