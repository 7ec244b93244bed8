//! Round state machine.
//!
//! A round runs from fresh dice to a resolved challenge:
//!
//! ```text
//! Rolling
//!    │ every seat rolls, strategies prepare
//!    ▼
//! Bidding(active) ──── illegal bid ───────────────┐
//!    │ bid accepted                                │ active calls the
//!    ▼                                             │ previous bidder
//! Polling(active, candidate) ── candidate calls ──┤
//!    │ everyone declines                           ▼
//!    └──► Bidding(next)                         Resolved
//! ```
//!
//! After a bid is accepted every other seat gets a chance to call it, in turn
//! order starting with the next bidder. Anyone past the next bidder is
//! calling out of turn. A bid that does not outrank the standing bid, names
//! more dice than are on the table, or is malformed counts as the bidder
//! calling the previous bid.

use rand::Rng;

use crate::engine::bid::Bid;
use crate::engine::observer::{Narration, Observer};
use crate::engine::player::Player;
use crate::engine::probability::{count_matching, estimate_truth_probability};
use crate::engine::strategy::{BidContext, BidRecord, ChallengeContext, DiceCount, RoundSetup};
use crate::error::{Error, Result};

/// Where the round currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Dice not yet rolled.
    Rolling,
    /// Waiting for `active` to bid.
    Bidding {
        /// Seat whose turn it is.
        active: usize,
    },
    /// Asking `candidate` whether to call the bid `active` just made.
    /// `checked` counts the seats already asked.
    Polling {
        /// Seat that made the bid.
        active: usize,
        /// Seat being asked.
        candidate: usize,
        /// Seats asked so far.
        checked: usize,
    },
    /// A call was resolved.
    Resolved,
}

/// How a round ended.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    /// Player who keeps their dice.
    pub winner: String,
    /// Player who loses a die.
    pub loser: String,
    /// Owner of the called bid.
    pub bidder: String,
    /// Player who called.
    pub challenger: String,
    /// The called bid. `None` when the opening bid was illegal.
    pub bid: Option<Bid>,
    /// Dice on the table matching the bid face or wild.
    pub matching: usize,
    /// Truth estimate from the challenger's point of view.
    pub probability: f64,
    /// The call was forced by an illegal bid.
    pub forced: bool,
    /// The call was made out of turn.
    pub out_of_turn: bool,
    /// Accepted bids, oldest first.
    pub history: Vec<BidRecord>,
}

/// One bid-and-challenge cycle among a fixed set of players.
pub struct Round<'a> {
    players: Vec<&'a mut Player>,
    observer: Option<&'a dyn Observer>,
    phase: Phase,
    current_bid: Option<Bid>,
    history: Vec<BidRecord>,
    dice_counts: Vec<DiceCount>,
    table: Vec<u8>,
    total_dice: usize,
    outcome: Option<RoundOutcome>,
}

impl<'a> Round<'a> {
    /// Create a round. `players` is the turn order; the first player opens.
    ///
    /// # Errors
    /// Returns `Error::InvalidRoundState` with fewer than two players.
    pub fn new(players: Vec<&'a mut Player>) -> Result<Self> {
        if players.len() < 2 {
            return Err(Error::InvalidRoundState {
                players: players.len(),
            });
        }
        let dice_counts: Vec<DiceCount> = players
            .iter()
            .map(|p| DiceCount::new(p.name.clone(), p.dice_count))
            .collect();
        let total_dice = dice_counts.iter().map(|c| c.dice).sum();

        Ok(Self {
            players,
            observer: None,
            phase: Phase::Rolling,
            current_bid: None,
            history: Vec::new(),
            dice_counts,
            table: Vec::new(),
            total_dice,
            outcome: None,
        })
    }

    /// Attach an observer for narration.
    pub fn with_observer(mut self, observer: &'a dyn Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Roll fresh dice for everyone and play to the end.
    pub fn play<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<RoundOutcome> {
        for player in self.players.iter_mut() {
            player.roll(rng);
        }
        self.begin()?;
        self.run()
    }

    /// Play to the end with preset dice, one list per seat in turn order.
    ///
    /// # Errors
    /// Returns `Error::DiceMismatch` if the lists do not line up with the
    /// seats, or `Error::SeatDiceMismatch` if a list's length differs from
    /// that seat's dice count. No dice are set on error.
    pub fn play_with_dice(&mut self, dice: Vec<Vec<u8>>) -> Result<RoundOutcome> {
        if dice.len() != self.players.len() {
            return Err(Error::DiceMismatch {
                expected: self.players.len(),
                got: dice.len(),
            });
        }
        if let Some((player, faces)) = self
            .players
            .iter()
            .zip(&dice)
            .find(|(player, faces)| faces.len() != player.dice_count)
        {
            return Err(Error::SeatDiceMismatch {
                player: player.name.clone(),
                expected: player.dice_count,
                got: faces.len(),
            });
        }
        for (player, faces) in self.players.iter_mut().zip(dice) {
            player.current_dice = faces;
        }
        self.begin()?;
        self.run()
    }

    /// Advance the state machine by one decision.
    ///
    /// Does nothing while rolling or once resolved.
    pub fn step(&mut self) -> Result<()> {
        match self.phase {
            Phase::Rolling | Phase::Resolved => Ok(()),
            Phase::Bidding { active } => self.take_bid(active),
            Phase::Polling {
                active,
                candidate,
                checked,
            } => self.poll(active, candidate, checked),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The standing bid, if any.
    pub fn current_bid(&self) -> Option<Bid> {
        self.current_bid
    }

    /// Accepted bids so far.
    pub fn history(&self) -> &[BidRecord] {
        &self.history
    }

    /// Every die on the table this round.
    pub fn total_dice(&self) -> usize {
        self.total_dice
    }

    /// Number of seats.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// How the round ended, once resolved.
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        self.outcome.as_ref()
    }

    /// Seat after `index`.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.players.len()
    }

    /// Seat before `index`.
    pub fn prev_index(&self, index: usize) -> usize {
        let n = self.players.len();
        (index + n - 1) % n
    }

    /// Seat whose turn it is, or who made the bid being polled.
    pub fn active_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Bidding { active } | Phase::Polling { active, .. } => Some(active),
            Phase::Rolling => Some(0),
            Phase::Resolved => None,
        }
    }

    /// Turns before seat `index` bids, counted from the active seat.
    ///
    /// The active seat itself waits for everyone else; the next seat waits
    /// zero turns.
    pub fn turns_until(&self, index: usize) -> usize {
        let n = self.players.len();
        let active = match self.active_index() {
            Some(active) => active,
            None => return 0,
        };
        if index == active {
            return n - 1;
        }
        (index + n - active) % n - 1
    }

    /// Truth estimate for the standing bid from seat `index`'s point of view.
    pub fn probability_for(&self, index: Option<usize>) -> f64 {
        let own = index
            .and_then(|i| self.players.get(i))
            .map(|p| p.current_dice.as_slice());
        estimate_truth_probability(self.current_bid.as_ref(), own, self.total_dice)
    }

    fn begin(&mut self) -> Result<()> {
        self.current_bid = None;
        self.history.clear();
        self.table = self
            .players
            .iter()
            .flat_map(|p| p.current_dice.iter().copied())
            .collect();

        for player in self.players.iter() {
            self.narrate(Narration::DiceRolled {
                player: &player.name,
                dice: &player.current_dice,
            });
        }

        for player in self.players.iter_mut() {
            let player: &mut Player = player;
            let setup = RoundSetup {
                dice_counts: &self.dice_counts,
                own_dice: &player.current_dice,
            };
            player
                .strategy
                .prepare_for_new_round(&setup)
                .map_err(|source| Error::Strategy {
                    player: player.name.clone(),
                    source,
                })?;
        }

        self.phase = Phase::Bidding { active: 0 };
        Ok(())
    }

    fn run(&mut self) -> Result<RoundOutcome> {
        while self.phase != Phase::Resolved {
            self.step()?;
        }
        match self.outcome.clone() {
            Some(outcome) => Ok(outcome),
            None => Err(Error::InvalidRoundState {
                players: self.players.len(),
            }),
        }
    }

    fn is_legal(&self, bid: &Bid) -> bool {
        bid.is_well_formed()
            && bid.count <= self.total_dice
            && bid.is_higher_than(self.current_bid.as_ref())
    }

    fn take_bid(&mut self, active: usize) -> Result<()> {
        let turns = self.turns_until(active);
        let player: &mut Player = &mut self.players[active];
        let ctx = BidContext {
            history: &self.history,
            current_bid: self.current_bid,
            dice_counts: &self.dice_counts,
            turns_until_own_turn: turns,
            own_dice: &player.current_dice,
        };
        let bid = player
            .strategy
            .make_bid(&ctx)
            .map_err(|source| Error::Strategy {
                player: player.name.clone(),
                source,
            })?;

        if !self.is_legal(&bid) {
            log::warn!(
                "{} bid {} over {:?} with {} dice in play, forcing a call",
                self.players[active].name,
                bid,
                self.current_bid,
                self.total_dice
            );
            self.narrate(Narration::IllegalBid {
                player: &self.players[active].name,
                bid,
            });
            let probability = self.probability_for(Some(active));
            let previous = self.prev_index(active);
            self.resolve(previous, active, false, probability, true);
            return Ok(());
        }

        self.history.push(BidRecord {
            player: self.players[active].name.clone(),
            bid,
        });
        self.current_bid = Some(bid);
        self.players[active].stats.bids += 1;
        self.narrate(Narration::BidMade {
            player: &self.players[active].name,
            bid,
        });

        self.phase = Phase::Polling {
            active,
            candidate: self.next_index(active),
            checked: 0,
        };
        Ok(())
    }

    fn poll(&mut self, active: usize, candidate: usize, checked: usize) -> Result<()> {
        let bid = match self.current_bid {
            Some(bid) => bid,
            None => {
                self.phase = Phase::Bidding { active };
                return Ok(());
            }
        };

        let out_of_turn = checked > 0;
        let probability = self.probability_for(Some(candidate));
        let turns = self.turns_until(candidate);
        let player: &mut Player = &mut self.players[candidate];
        let ctx = ChallengeContext {
            history: &self.history,
            current_bid: bid,
            dice_counts: &self.dice_counts,
            probability_of_truth: probability,
            turns_until_own_turn: turns,
            own_dice: &player.current_dice,
            out_of_turn,
        };
        let calls = player
            .strategy
            .challenge_bid(&ctx)
            .map_err(|source| Error::Strategy {
                player: player.name.clone(),
                source,
            })?;

        if calls {
            self.resolve(active, candidate, out_of_turn, probability, false);
        } else if checked + 1 >= self.players.len() - 1 {
            self.phase = Phase::Bidding {
                active: self.next_index(active),
            };
        } else {
            self.phase = Phase::Polling {
                active,
                candidate: self.next_index(candidate),
                checked: checked + 1,
            };
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        bidder: usize,
        challenger: usize,
        out_of_turn: bool,
        probability: f64,
        forced: bool,
    ) {
        self.narrate(Narration::CallMade {
            challenger: &self.players[challenger].name,
            bidder: &self.players[bidder].name,
            out_of_turn,
            probability,
        });

        // An absent bid claims nothing and always holds.
        let (matching, claimed) = match self.current_bid {
            Some(bid) => (count_matching(&self.table, bid.face), bid.count),
            None => (0, 0),
        };
        let bid_held = matching >= claimed;

        // Nobody owns an absent bid
        let contested = self.current_bid.is_some();
        if contested {
            self.players[bidder].stats.bids_called += 1;
        }
        {
            let stats = &mut self.players[challenger].stats;
            stats.calls.push(probability);
            if out_of_turn {
                stats.calls_out_of_turn += 1;
            }
        }

        let (winner, loser) = if bid_held {
            if contested {
                self.players[bidder].stats.successful_bids += 1;
            }
            (bidder, challenger)
        } else {
            self.players[challenger].stats.successful_calls += 1;
            (challenger, bidder)
        };

        self.narrate(Narration::Resolved {
            matching,
            loser: &self.players[loser].name,
            bid_held,
        });

        self.outcome = Some(RoundOutcome {
            winner: self.players[winner].name.clone(),
            loser: self.players[loser].name.clone(),
            bidder: self.players[bidder].name.clone(),
            challenger: self.players[challenger].name.clone(),
            bid: self.current_bid,
            matching,
            probability,
            forced,
            out_of_turn,
            history: self.history.clone(),
        });
        self.phase = Phase::Resolved;
    }

    fn narrate(&self, event: Narration<'_>) {
        log::debug!("{}", event);
        if let Some(observer) = self.observer {
            observer.observe(&event);
        }
    }
}
