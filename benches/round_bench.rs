//! Benchmarks for the round engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use liars_dice::engine::{Game, GameConfig, Player, Round};
use liars_dice::strategies::{build_roster, default_roster};

fn single_round_benchmark(c: &mut Criterion) {
    let mut players = build_roster(&default_roster(), 5).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("single_round_25_dice", |b| {
        b.iter(|| {
            let seats: Vec<&mut Player> = players.iter_mut().collect();
            let mut round = Round::new(seats).unwrap();
            black_box(round.play(&mut rng).unwrap())
        })
    });
}

fn full_game_benchmark(c: &mut Criterion) {
    let roster = build_roster(&default_roster(), 5).unwrap();
    let mut seed = 0u64;

    c.bench_function("full_game_5_players", |b| {
        b.iter(|| {
            seed += 1;
            let players: Vec<Player> = roster.iter().map(Player::fresh_copy).collect();
            let config = GameConfig::new().with_seed(black_box(seed));
            Game::new(players, config).unwrap().play_game().unwrap()
        })
    });
}

criterion_group!(benches, single_round_benchmark, full_game_benchmark);
criterion_main!(benches);
