//! Tournament runner.
//!
//! Plays many independent games from the same roster and aggregates each
//! player's statistics by name.
//!
//! Every game sits down with a fresh copy of the roster, so games share no
//! mutable state and can run in parallel. Their stats are folded into the
//! aggregate afterwards, on one thread, in game order.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::engine::config::TournamentConfig;
use crate::engine::game::{check_roster, Game};
use crate::engine::player::Player;
use crate::engine::stats::PlayerStats;
use crate::error::{Error, Result};

/// One player's line in a tournament report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerReport {
    /// Player name.
    pub name: String,
    /// Strategy label.
    pub strategy: String,
    /// Aggregated statistics.
    pub stats: PlayerStats,
}

impl PlayerReport {
    /// Share of games won.
    pub fn win_rate(&self) -> f64 {
        match self.stats.games() {
            0 => 0.0,
            games => self.stats.wins() as f64 / games as f64,
        }
    }
}

/// Summary of a tournament run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentReport {
    /// Games played in this run.
    pub games: usize,
    /// Wall clock time in seconds.
    pub elapsed_seconds: f64,
    /// Games per second.
    pub games_per_second: f64,
    /// Per-player results, most wins first.
    pub players: Vec<PlayerReport>,
}

impl TournamentReport {
    /// Save to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let path = path.as_ref();
        let mut file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        file.write_all(json.as_bytes()).map_err(|source| Error::Io {
            operation: format!("write {}", path.display()),
            source,
        })
    }

    /// Report line for a player.
    pub fn player(&self, name: &str) -> Option<&PlayerReport> {
        self.players.iter().find(|p| p.name == name)
    }
}

/// Repeats games over a fixed roster.
pub struct Tournament {
    roster: Vec<Player>,
    config: TournamentConfig,
    totals: FxHashMap<String, PlayerStats>,
}

impl Tournament {
    /// Create a tournament.
    ///
    /// # Errors
    /// Fails on an invalid config, fewer than two players, or repeated names.
    pub fn new(roster: Vec<Player>, config: TournamentConfig) -> Result<Self> {
        config.validate()?;
        check_roster(&roster)?;
        let totals = roster
            .iter()
            .map(|p| (p.name.clone(), p.stats.clone()))
            .collect();
        Ok(Self {
            roster,
            config,
            totals,
        })
    }

    /// Aggregated stats so far, by player name.
    pub fn totals(&self) -> &FxHashMap<String, PlayerStats> {
        &self.totals
    }

    /// Play `config.games` games and fold their stats into the totals.
    ///
    /// Running again keeps accumulating.
    pub fn run(&mut self) -> Result<TournamentReport> {
        let start = Instant::now();
        let games = self.config.games;
        log::info!(
            "starting {} games with {} players",
            games,
            self.roster.len()
        );

        let progress = self.config.progress.then(|| {
            let bar = ProgressBar::new(games as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{bar:40} {pos}/{len} games ({per_sec}, eta {eta})")
            {
                bar.set_style(style);
            }
            bar
        });

        let roster = &self.roster;
        let config = &self.config;
        let play_one = |index: usize| -> Result<Vec<Player>> {
            let seats: Vec<Player> = roster.iter().map(Player::fresh_copy).collect();
            let mut game_config = config.game.clone();
            game_config.seed = config.game.seed.map(|seed| seed.wrapping_add(index as u64));
            let result = Game::new(seats, game_config)?.play_game()?;
            if let Some(bar) = &progress {
                bar.inc(1);
            }
            Ok(result.standings)
        };

        let results: Vec<Vec<Player>> = match config.threads {
            Some(1) => (0..games).map(play_one).collect::<Result<Vec<_>>>()?,
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(|| {
                    (0..games)
                        .into_par_iter()
                        .map(play_one)
                        .collect::<Result<Vec<_>>>()
                })?,
            None => (0..games)
                .into_par_iter()
                .map(play_one)
                .collect::<Result<Vec<_>>>()?,
        };

        if let Some(bar) = &progress {
            bar.finish_and_clear();
        }

        for standings in &results {
            for player in standings {
                self.totals
                    .entry(player.name.clone())
                    .or_default()
                    .merge(&player.stats);
            }
        }

        let elapsed = start.elapsed().as_secs_f64();
        let report = self.report(games, elapsed);
        log::info!("finished {} games in {:.2}s", games, elapsed);
        Ok(report)
    }

    fn report(&self, games: usize, elapsed_seconds: f64) -> TournamentReport {
        let mut players: Vec<PlayerReport> = self
            .roster
            .iter()
            .map(|p| PlayerReport {
                name: p.name.clone(),
                strategy: p.strategy.label().to_string(),
                stats: self.totals.get(&p.name).cloned().unwrap_or_default(),
            })
            .collect();
        players.sort_by(|a, b| b.stats.wins().cmp(&a.stats.wins()));

        TournamentReport {
            games,
            elapsed_seconds,
            games_per_second: if elapsed_seconds > 0.0 {
                games as f64 / elapsed_seconds
            } else {
                0.0
            },
            players,
        }
    }
}
