//! Players and their dice.

use rand::Rng;

use crate::engine::config::DEFAULT_STARTING_DICE;
use crate::engine::stats::PlayerStats;
use crate::engine::strategy::Strategy;

/// A seat at the table.
///
/// `dice_count` only goes down, one die per lost challenge. A player with no
/// dice left is out of the game.
#[derive(Debug, Clone)]
pub struct Player {
    /// Unique name.
    pub name: String,
    /// Dice the player still holds.
    pub dice_count: usize,
    /// Faces rolled this round. Empty before the roll and once eliminated.
    pub current_dice: Vec<u8>,
    /// Decision making.
    pub strategy: Box<dyn Strategy>,
    /// Running statistics.
    pub stats: PlayerStats,
}

impl Player {
    /// Create a player with the default number of dice.
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self::with_dice(name, strategy, DEFAULT_STARTING_DICE)
    }

    /// Create a player with a given number of dice.
    pub fn with_dice(name: impl Into<String>, strategy: Box<dyn Strategy>, dice: usize) -> Self {
        Self {
            name: name.into(),
            dice_count: dice,
            current_dice: Vec::new(),
            strategy,
            stats: PlayerStats::new(),
        }
    }

    /// Still holding dice.
    pub fn is_alive(&self) -> bool {
        self.dice_count > 0
    }

    /// Roll `dice_count` fresh dice.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current_dice = (0..self.dice_count).map(|_| rng.gen_range(1..=6)).collect();
    }

    /// Give up one die after losing a challenge.
    pub fn lose_die(&mut self) {
        self.dice_count = self.dice_count.saturating_sub(1);
        if !self.is_alive() {
            self.current_dice.clear();
        }
    }

    /// Copy for an isolated game: same name, strategy state and dice, empty
    /// stats.
    pub fn fresh_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            dice_count: self.dice_count,
            current_dice: Vec::new(),
            strategy: self.strategy.clone(),
            stats: PlayerStats::new(),
        }
    }
}
