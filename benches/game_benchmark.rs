//! Performance benchmarks for the Pig simulator
//!
//! This benchmark measures game and estimator throughput using Criterion.rs.
//! It supports three modes:
//!
//! 1. **Fresh** - Allocate a new game for each iteration
//! 2. **Snapshot** - Clone a saved mid-game state each iteration
//! 3. **Estimator** - Average turn score for one dice count
//!
//! Games are BestController vs HeuristicController on seeded dice.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pig_sim::{
    core::DiceCount,
    experiment::{average_score_for_dice, run_experiment_parallel, ExperimentConfig, SamplingMode},
    game::{
        BestController, GameDice, GameLoop, GameResult, GameState, HeuristicController,
        VerbosityLevel,
    },
    Result,
};
use std::time::{Duration, Instant};

/// Metrics collected during game execution
#[derive(Debug, Clone)]
struct GameMetrics {
    /// Rounds played
    rounds: u32,
    /// Turns resolved
    turns: usize,
    /// Game duration
    duration: Duration,
}

impl GameMetrics {
    fn games_per_sec(&self) -> f64 {
        1.0 / self.duration.as_secs_f64()
    }

    fn turns_per_sec(&self) -> f64 {
        self.turns as f64 / self.duration.as_secs_f64()
    }
}

fn play_from(mut game: GameState, seed: u64) -> Result<(GameState, GameResult)> {
    let mut dice = GameDice::seeded(seed);
    let mut best = BestController::new();
    let mut heuristic = HeuristicController::new();
    let result = GameLoop::new(&mut game, &mut dice)
        .with_verbosity(VerbosityLevel::Silent)
        .run_game(&mut best, &mut heuristic)?;
    Ok((game, result))
}

fn run_game_with_metrics(seed: u64) -> Result<GameMetrics> {
    let start = Instant::now();
    let (game, result) = play_from(GameState::new(100, 20)?, seed)?;
    Ok(GameMetrics {
        rounds: result.rounds_played,
        turns: game.history().len(),
        duration: start.elapsed(),
    })
}

/// Benchmark: Fresh mode - allocate new game each iteration
fn bench_game_fresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_execution");

    let seed = 42u64;
    println!("\nWarmup game (seed {}):", seed);
    if let Ok(metrics) = run_game_with_metrics(seed) {
        println!("  Rounds: {}", metrics.rounds);
        println!("  Turns: {}", metrics.turns);
        println!("  Duration: {:?}", metrics.duration);
        println!("  Games/sec: {:.2}", metrics.games_per_sec());
        println!("  Turns/sec: {:.2}", metrics.turns_per_sec());
    }

    group.bench_with_input(BenchmarkId::new("fresh", seed), &seed, |b, &seed| {
        b.iter(|| run_game_with_metrics(black_box(seed)).expect("Game should complete successfully"));
    });

    group.finish();
}

/// Benchmark: Snapshot mode - restore a saved mid-game state each iteration
fn bench_game_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("game_execution");

    let seed = 42u64;
    let snapshot = match GameState::new(100, 20) {
        Ok(game) => game.with_scores(55, 61),
        Err(e) => {
            eprintln!("Skipping benchmark - failed to build snapshot: {}", e);
            return;
        }
    };

    group.bench_function(BenchmarkId::new("snapshot", seed), |b| {
        b.iter(|| {
            play_from(black_box(snapshot.clone()), seed).expect("Game should complete successfully")
        });
    });

    group.finish();
}

/// Benchmark: average turn score for each dice count
fn bench_estimator(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimator");
    let simulations = 10_000;
    group.throughput(Throughput::Elements(simulations as u64));

    for n in [1u8, 6, 10] {
        let count = DiceCount::saturating(n);
        group.bench_with_input(BenchmarkId::new("average_score", n), &count, |b, &count| {
            let mut dice = GameDice::seeded(7);
            b.iter(|| {
                average_score_for_dice(&mut dice, count, simulations, SamplingMode::Exact)
                    .expect("simulations > 0")
            });
        });
    }

    group.finish();
}

/// Benchmark: parallel win-rate experiment
fn bench_experiment_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("experiment");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(20));

    let config = ExperimentConfig::new(10_000);
    let games = config.games().expect("simulations > 0");
    group.throughput(Throughput::Elements(games as u64));
    group.bench_function("parallel_10k", |b| {
        b.iter(|| {
            run_experiment_parallel(&config, black_box(1), |_| BestController::new())
                .expect("Experiment should complete successfully")
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_game_fresh,
    bench_game_snapshot,
    bench_estimator,
    bench_experiment_parallel
);
criterion_main!(benches);
