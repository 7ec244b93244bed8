//! Game driver.
//!
//! Plays rounds until one player holds dice. Each round seats the surviving
//! players in table order starting with the previous round's winner; the
//! loser of each round gives up a die and leaves the table at zero.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::FxHashSet;

use crate::engine::config::{ConfigError, GameConfig};
use crate::engine::observer::{Narration, Observer};
use crate::engine::player::Player;
use crate::engine::round::Round;
use crate::error::{Error, Result};

/// Result of a finished game.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// Finishing order, winner first.
    pub standings: Vec<Player>,
    /// Rounds played.
    pub rounds: usize,
}

impl GameResult {
    /// The last player standing.
    pub fn winner(&self) -> Option<&Player> {
        self.standings.first()
    }
}

/// A single game of Liar's Dice.
pub struct Game<'o> {
    players: Vec<Player>,
    config: GameConfig,
    rng: StdRng,
    round_number: usize,
    observer: Option<&'o dyn Observer>,
    preset_rolls: VecDeque<Vec<Vec<u8>>>,
}

impl<'o> Game<'o> {
    /// Create a game. Every player starts with `config.starting_dice` dice.
    ///
    /// # Errors
    /// Fails on an invalid config, fewer than two players, or repeated names.
    pub fn new(mut players: Vec<Player>, config: GameConfig) -> Result<Self> {
        config.validate()?;
        check_roster(&players)?;

        for player in players.iter_mut() {
            player.dice_count = config.starting_dice;
            player.current_dice.clear();
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            players,
            config,
            rng,
            round_number: 0,
            observer: None,
            preset_rolls: VecDeque::new(),
        })
    }

    /// Attach an observer for narration.
    pub fn with_observer(mut self, observer: &'o dyn Observer) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Replay fixed dice. Each entry covers one round, one list per seat in
    /// that round's turn order. Rounds past the last entry roll normally.
    pub fn with_preset_rolls(mut self, rolls: Vec<Vec<Vec<u8>>>) -> Self {
        self.preset_rolls = rolls.into();
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Play to the end.
    ///
    /// Each player's stats receive their finishing place and dice left.
    pub fn play_game(mut self) -> Result<GameResult> {
        let mut table = std::mem::take(&mut self.players);
        if self.config.shuffle {
            table.shuffle(&mut self.rng);
        }
        let observer = self.observer;

        let mut eliminated: Vec<Player> = Vec::new();
        let mut start = 0;

        while table.len() > 1 {
            self.round_number += 1;
            narrate(observer, Narration::RoundStarted { round: self.round_number });

            let outcome = {
                let mut seats: Vec<&mut Player> = table.iter_mut().collect();
                seats.rotate_left(start);
                let mut round = Round::new(seats)?;
                if let Some(observer) = observer {
                    round = round.with_observer(observer);
                }
                match self.preset_rolls.pop_front() {
                    Some(dice) => round.play_with_dice(dice)?,
                    None => round.play(&mut self.rng)?,
                }
            };

            let loser = position(&table, &outcome.loser)?;
            table[loser].lose_die();
            if !table[loser].is_alive() {
                let out = table.remove(loser);
                narrate(observer, Narration::Eliminated { player: &out.name });
                eliminated.push(out);
            }

            start = position(&table, &outcome.winner)?;
        }

        let mut standings = table;
        standings.extend(eliminated.into_iter().rev());
        for (place, player) in standings.iter_mut().enumerate() {
            player.stats.record_game(place, player.dice_count);
        }

        let summary: Vec<(String, usize)> = standings
            .iter()
            .map(|p| (p.name.clone(), p.dice_count))
            .collect();
        narrate(observer, Narration::GameOver { standings: &summary });
        log::info!(
            "game over after {} rounds, {} wins",
            self.round_number,
            summary.first().map(|(name, _)| name.as_str()).unwrap_or("nobody")
        );

        Ok(GameResult {
            standings,
            rounds: self.round_number,
        })
    }
}

/// Check that a roster can sit down to a game.
pub(crate) fn check_roster(players: &[Player]) -> Result<()> {
    if players.len() < 2 {
        return Err(ConfigError::TooFewPlayers(players.len()).into());
    }
    let mut seen = FxHashSet::default();
    for player in players {
        if !seen.insert(player.name.as_str()) {
            return Err(Error::DuplicatePlayer(player.name.clone()));
        }
    }
    Ok(())
}

fn position(table: &[Player], name: &str) -> Result<usize> {
    table
        .iter()
        .position(|p| p.name == name)
        .ok_or_else(|| Error::UnknownPlayer(name.to_string()))
}

fn narrate(observer: Option<&dyn Observer>, event: Narration<'_>) {
    log::debug!("{}", event);
    if let Some(observer) = observer {
        observer.observe(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::bid::Bid;
    use crate::engine::observer::LineObserver;
    use crate::engine::testing::{new_log, Scripted};
    use crate::strategies::{build_roster, default_roster};
    use std::sync::{Arc, Mutex};

    fn roster() -> Vec<Player> {
        build_roster(&default_roster(), 5).unwrap()
    }

    #[test]
    fn test_game_produces_full_standings() {
        let config = GameConfig::new().with_seed(17);
        let result = Game::new(roster(), config).unwrap().play_game().unwrap();

        assert_eq!(result.standings.len(), 5);
        assert!(result.rounds >= 4 * 5);

        let winner = result.winner().unwrap();
        assert!(winner.dice_count > 0);
        for loser in &result.standings[1..] {
            assert_eq!(loser.dice_count, 0);
        }
        for (place, player) in result.standings.iter().enumerate() {
            assert_eq!(player.stats.placements, vec![place]);
            assert_eq!(player.stats.dice_left, vec![player.dice_count]);
        }
    }

    #[test]
    fn test_seeded_games_repeat() {
        let names = |seed| -> Vec<String> {
            let config = GameConfig::new().with_seed(seed);
            let result = Game::new(roster(), config).unwrap().play_game().unwrap();
            result.standings.iter().map(|p| p.name.clone()).collect()
        };
        assert_eq!(names(3), names(3));
    }

    #[test]
    fn test_starting_dice_applied() {
        let config = GameConfig::new().with_starting_dice(1).with_seed(8);
        let result = Game::new(roster(), config).unwrap().play_game().unwrap();
        // One die each: every round eliminates somebody
        assert_eq!(result.rounds, 4);
        assert_eq!(result.winner().unwrap().dice_count, 1);
    }

    #[test]
    fn test_wild_die_decides_last_round() {
        // Alice [4], Bob [1]: two fours counting the wild one
        let log = new_log();
        let players = vec![
            Scripted::new("Alice", &log).bids(&[Bid::new(2, 4)]).player(1),
            Scripted::new("Bob", &log).calls(&[true]).player(1),
        ];
        let config = GameConfig::new()
            .with_starting_dice(1)
            .with_shuffle(false)
            .with_seed(4);
        let result = Game::new(players, config)
            .unwrap()
            .with_preset_rolls(vec![vec![vec![4], vec![1]]])
            .play_game()
            .unwrap();

        assert_eq!(result.rounds, 1);
        let winner = result.winner().unwrap();
        assert_eq!(winner.name, "Alice");
        assert_eq!(winner.dice_count, 1);
        assert_eq!(winner.stats.successful_bids, 1);

        let loser = &result.standings[1];
        assert_eq!(loser.name, "Bob");
        assert_eq!(loser.dice_count, 0);
        assert!(!loser.is_alive());
        assert_eq!(loser.stats.placements, vec![1]);
    }

    #[test]
    fn test_preset_rolls_must_fit_seats() {
        let log = new_log();
        let players = vec![
            Scripted::new("Alice", &log).player(2),
            Scripted::new("Bob", &log).player(2),
        ];
        let config = GameConfig::new().with_starting_dice(2).with_shuffle(false);
        let err = Game::new(players, config)
            .unwrap()
            .with_preset_rolls(vec![vec![vec![3, 3], vec![5]]])
            .play_game()
            .unwrap_err();
        assert!(matches!(err, Error::SeatDiceMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn test_rejects_bad_rosters() {
        let log = new_log();
        let solo = vec![Scripted::new("Alice", &log).player(5)];
        assert!(matches!(
            Game::new(solo, GameConfig::default()),
            Err(Error::Config(ConfigError::TooFewPlayers(1)))
        ));

        let twins = vec![
            Scripted::new("Alice", &log).player(5),
            Scripted::new("Alice", &log).player(5),
        ];
        assert!(matches!(
            Game::new(twins, GameConfig::default()),
            Err(Error::DuplicatePlayer(name)) if name == "Alice"
        ));

        let pair = vec![
            Scripted::new("Alice", &log).player(5),
            Scripted::new("Bob", &log).player(5),
        ];
        assert!(matches!(
            Game::new(pair, GameConfig::default().with_starting_dice(0)),
            Err(Error::Config(ConfigError::InvalidStartingDice(0)))
        ));
    }

    #[test]
    fn test_strategy_failure_aborts_game() {
        let log = new_log();
        let players = vec![
            Scripted::new("Alice", &log).failing().player(5),
            Scripted::new("Bob", &log).failing().player(5),
        ];
        let err = Game::new(players, GameConfig::new().with_seed(1))
            .unwrap()
            .play_game()
            .unwrap_err();
        assert!(matches!(err, Error::Strategy { .. }));
    }

    #[test]
    fn test_narration_points() {
        let lines = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&lines);
        let observer = LineObserver::new(move |line: &str| sink.lock().unwrap().push(line.to_string()));

        let config = GameConfig::new().with_starting_dice(1).with_seed(21);
        let players = build_roster(&["Alice", "Bob"], 1).unwrap();
        let result = Game::new(players, config)
            .unwrap()
            .with_observer(&observer)
            .play_game()
            .unwrap();
        assert_eq!(result.rounds, 1);

        let lines = lines.lock().unwrap();
        assert_eq!(lines.first().unwrap(), "----- Round 1 -----");
        assert_eq!(lines.iter().filter(|l| l.contains("'s dice: ")).count(), 2);
        assert!(lines.iter().any(|l| l.contains(" calls ")));
        assert!(lines.iter().any(|l| l.ends_with("has been eliminated.")));
        assert!(lines.last().unwrap().starts_with("Game over!"));
    }
}
