//! Narration of rounds and games.
//!
//! The engine reports what happens at fixed points (dice rolled, bid made,
//! call made, outcome, elimination, final standings) to an optional
//! [`Observer`]. Observers only watch; nothing they do feeds back into the
//! game.
//!
//! Three adapters are provided:
//! - [`ConsoleObserver`] prints colored lines to stdout
//! - [`LogObserver`] forwards each line to the `log` facade
//! - [`LineObserver`] hands each plain text line to a callback

use std::fmt;

use colored::Colorize;

use crate::engine::bid::Bid;

/// Something worth reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Narration<'a> {
    /// A new round begins.
    RoundStarted {
        /// Round number, starting at 1.
        round: usize,
    },
    /// A player's dice for this round.
    DiceRolled {
        /// Player name.
        player: &'a str,
        /// Faces rolled.
        dice: &'a [u8],
    },
    /// A bid was accepted.
    BidMade {
        /// Bidder.
        player: &'a str,
        /// The accepted bid.
        bid: Bid,
    },
    /// A bid was rejected and turned into a call on the previous bidder.
    IllegalBid {
        /// Player who made the rejected bid.
        player: &'a str,
        /// The rejected bid.
        bid: Bid,
    },
    /// A player called the standing bid.
    CallMade {
        /// Caller.
        challenger: &'a str,
        /// Owner of the called bid.
        bidder: &'a str,
        /// Called before the caller's turn came up.
        out_of_turn: bool,
        /// Caller's truth estimate for the bid.
        probability: f64,
    },
    /// The call was resolved.
    Resolved {
        /// Dice showing the bid face or wild.
        matching: usize,
        /// Player losing a die.
        loser: &'a str,
        /// Whether the bid was true.
        bid_held: bool,
    },
    /// A player ran out of dice.
    Eliminated {
        /// Player name.
        player: &'a str,
    },
    /// The game ended.
    GameOver {
        /// Names with dice left, winner first.
        standings: &'a [(String, usize)],
    },
}

impl fmt::Display for Narration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Narration::RoundStarted { round } => write!(f, "----- Round {} -----", round),
            Narration::DiceRolled { player, dice } => write!(f, "{}'s dice: {:?}", player, dice),
            Narration::BidMade { player, bid } => write!(f, "{} bids {}.", player, bid),
            Narration::IllegalBid { player, bid } => {
                write!(f, "{} cannot raise with {} and must call.", player, bid)
            }
            Narration::CallMade { challenger, bidder, out_of_turn, probability } => {
                let when = if *out_of_turn { " out of turn" } else { "" };
                write!(
                    f,
                    "{} calls {}{} (p = {:.2}).",
                    challenger, bidder, when, probability
                )
            }
            Narration::Resolved { matching, loser, .. } => {
                write!(f, "Total matching dice: {}. {} loses a die.", matching, loser)
            }
            Narration::Eliminated { player } => write!(f, "{} has been eliminated.", player),
            Narration::GameOver { standings } => {
                write!(f, "Game over!")?;
                for (place, (name, dice)) in standings.iter().enumerate() {
                    write!(f, " {}: {} ({} dice)", place + 1, name, dice)?;
                }
                Ok(())
            }
        }
    }
}

/// Receives narration from rounds and games.
pub trait Observer: Send + Sync {
    /// Called at every narration point.
    fn observe(&self, event: &Narration<'_>);
}

/// Prints narration to the terminal with colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl Observer for ConsoleObserver {
    fn observe(&self, event: &Narration<'_>) {
        match event {
            Narration::RoundStarted { round } => {
                println!("\n----- {} -----", format!("Round {}", round).blue());
            }
            Narration::DiceRolled { player, dice } => {
                println!("{}'s {} {:?}", player, "dice:".bright_black(), dice);
            }
            Narration::BidMade { player, bid } => {
                println!("{} {} {}{}", player, "bids".bright_black(), bid, ".".bright_black());
            }
            Narration::IllegalBid { .. } => println!("{}", event.to_string().yellow()),
            Narration::CallMade { challenger, out_of_turn, .. } => {
                let when = if *out_of_turn { " (out of turn)" } else { "" };
                println!("{} {}{}.", challenger, "calls".magenta(), when);
                println!("{}", "-------------------------".cyan());
            }
            Narration::Resolved { matching, loser, bid_held } => {
                let total = if *bid_held {
                    matching.to_string().green()
                } else {
                    matching.to_string().red()
                };
                println!("Total matching dice: {}. {} loses a die.", total, loser);
            }
            Narration::Eliminated { .. } => println!("{}", event.to_string().yellow()),
            Narration::GameOver { standings } => {
                println!("\n---------- {} ----------", "Game Over!".cyan());
                let last = standings.len();
                for (place, (name, dice)) in standings.iter().enumerate() {
                    match place + 1 {
                        1 => println!(
                            "{}: {} {}",
                            "Winner".green(),
                            name,
                            format!("({} dice remaining)", dice).bright_black()
                        ),
                        p if p == last => println!("{}: {}", p.to_string().red(), name),
                        p => println!("{}: {}", p, name),
                    }
                }
            }
        }
    }
}

/// Forwards narration to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn observe(&self, event: &Narration<'_>) {
        log::info!("{}", event);
    }
}

/// Hands each narration line to a callback.
pub struct LineObserver<F>
where
    F: Fn(&str) + Send + Sync,
{
    sink: F,
}

impl<F> LineObserver<F>
where
    F: Fn(&str) + Send + Sync,
{
    /// Wrap a callback.
    pub fn new(sink: F) -> Self {
        Self { sink }
    }
}

impl<F> Observer for LineObserver<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn observe(&self, event: &Narration<'_>) {
        (self.sink)(&event.to_string());
    }
}
