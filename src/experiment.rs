//! Monte-Carlo experiments: average turn score per dice count and win rates
//!
//! Two estimators:
//!
//! - [`average_score_for_dice`] / [`maximum_average_score_action`] sample
//!   single turns to find the dice count with the best expected score.
//! - [`run_experiment`] / [`run_experiment_parallel`] play many games of a
//!   strategy against [`HeuristicController`] and report the win rate.
//!
//! Historical results drew one sample more than they divided by. That bound
//! is kept as [`SamplingMode::Inclusive`]; the default draws exactly as many
//! samples as it divides by.

use crate::core::{DiceCount, Score};
use crate::game::{
    dice::roll_dice, play_pig, DiceSource, GameDice, GameLogger, GameOutcome, HeuristicController,
    Strategy, VerbosityLevel,
};
use crate::{PigError, Result};
use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// How many samples an estimator draws for `simulations` requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingMode {
    /// Draw `simulations` samples and divide by `simulations`
    #[default]
    Exact,
    /// Draw `simulations + 1` samples but divide by `simulations`
    ///
    /// Reproduces historical numbers; biased upward by one sample.
    Inclusive,
}

impl SamplingMode {
    pub fn sample_count(self, simulations: usize) -> Result<usize> {
        match self {
            SamplingMode::Exact => Ok(simulations),
            SamplingMode::Inclusive => simulations
                .checked_add(1)
                .ok_or(PigError::InvalidSimulationCount(simulations)),
        }
    }
}

/// Settings for a win-rate experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub simulations: usize,
    pub goal_score: Score,
    pub max_rounds: u32,
    pub sampling: SamplingMode,
    /// Logging level for progress and summary (games themselves are silent)
    pub verbosity: VerbosityLevel,
}

impl ExperimentConfig {
    /// Goal 100 over 20 rounds, the standard match
    pub fn new(simulations: usize) -> Self {
        ExperimentConfig {
            simulations,
            goal_score: 100,
            max_rounds: 20,
            sampling: SamplingMode::Exact,
            verbosity: VerbosityLevel::Silent,
        }
    }

    pub fn with_goal_score(mut self, goal_score: Score) -> Self {
        self.goal_score = goal_score;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Number of games actually played
    pub fn games(&self) -> Result<usize> {
        self.sampling.sample_count(self.simulations)
    }

    fn validate(&self) -> Result<()> {
        check_simulations(self.simulations)?;
        if self.goal_score == 0 || self.max_rounds == 0 {
            return Err(PigError::InvalidConfig(
                "goal score and round budget must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self::new(1000)
    }
}

fn check_simulations(simulations: usize) -> Result<()> {
    if simulations == 0 {
        return Err(PigError::InvalidSimulationCount(simulations));
    }
    Ok(())
}

/// Average score of one turn rolling `num_dice` dice
pub fn average_score_for_dice<D: DiceSource + ?Sized>(
    dice: &mut D,
    num_dice: DiceCount,
    simulations: usize,
    sampling: SamplingMode,
) -> Result<f64> {
    check_simulations(simulations)?;
    let total: u64 = (0..sampling.sample_count(simulations)?)
        .map(|_| u64::from(roll_dice(dice, num_dice)))
        .sum();
    Ok(total as f64 / simulations as f64)
}

/// Average turn score for every rolling count 1..=10, in increasing order
pub fn average_score_table<D: DiceSource + ?Sized>(
    dice: &mut D,
    simulations: usize,
    sampling: SamplingMode,
) -> Result<Vec<(DiceCount, f64)>> {
    DiceCount::rolling()
        .map(|n| Ok((n, average_score_for_dice(dice, n, simulations, sampling)?)))
        .collect()
}

/// The rolling count with the highest average turn score
///
/// Ties go to the larger dice count: the table is scanned in increasing
/// order and a later entry replaces the best on `>=`.
pub fn maximum_average_score_action<D: DiceSource + ?Sized>(
    dice: &mut D,
    simulations: usize,
    sampling: SamplingMode,
) -> Result<DiceCount> {
    let table = average_score_table(dice, simulations, sampling)?;
    best_of_table(&table).ok_or(PigError::InvalidSimulationCount(simulations))
}

/// Pick the best entry of an average-score table, last one winning ties
pub fn best_of_table(table: &[(DiceCount, f64)]) -> Option<DiceCount> {
    let mut best: Option<(DiceCount, f64)> = None;
    for &(count, score) in table {
        match best {
            Some((_, best_score)) if score < best_score => {}
            _ => best = Some((count, score)),
        }
    }
    best.map(|(count, _)| count)
}

/// Win/tie/loss counts from Player 1's seat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    wins: usize,
    ties: usize,
    losses: usize,
}

impl Tally {
    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Player1Wins => self.wins += 1,
            GameOutcome::Tie => self.ties += 1,
            GameOutcome::Player2Wins => self.losses += 1,
        }
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
        }
    }

    fn games(&self) -> usize {
        self.wins + self.ties + self.losses
    }
}

/// Outcome of a win-rate experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub strategy: String,
    pub opponent: String,
    pub config: ExperimentConfig,
    pub games_played: usize,
    pub wins: usize,
    pub ties: usize,
    pub losses: usize,
    /// wins / simulations * 100
    pub win_percentage: f64,
}

impl ExperimentReport {
    fn new(strategy: &str, opponent: &str, config: &ExperimentConfig, tally: Tally) -> Self {
        ExperimentReport {
            strategy: strategy.to_string(),
            opponent: opponent.to_string(),
            config: config.clone(),
            games_played: tally.games(),
            wins: tally.wins,
            ties: tally.ties,
            losses: tally.losses,
            win_percentage: tally.wins as f64 / config.simulations as f64 * 100.0,
        }
    }

    /// The win rate as printed by the CLI, e.g. "57.30%"
    pub fn percentage_string(&self) -> String {
        format!("{:.2}%", self.win_percentage)
    }

    fn log_summary(&self, logger: &GameLogger) {
        logger.normal(&format!(
            "{} vs {}: {} games, {} wins, {} ties, {} losses",
            self.strategy, self.opponent, self.games_played, self.wins, self.ties, self.losses
        ));
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.percentage_string())
    }
}

/// Play a strategy (Player 1) against the heuristic (Player 2) many times
/// on one shared dice source
///
/// `make_strategy(i)` builds a fresh Player 1 for game `i`, so scripted or
/// seeded strategies start over every game.
pub fn run_experiment<F, S>(
    dice: &mut dyn DiceSource,
    config: &ExperimentConfig,
    mut make_strategy: F,
) -> Result<ExperimentReport>
where
    F: FnMut(usize) -> S,
    S: Strategy,
{
    config.validate()?;
    let games = config.games()?;
    let logger = GameLogger::with_verbosity(config.verbosity);
    let strategy_name = make_strategy(0).name().to_string();
    let mut opponent = HeuristicController::new();
    let mut tally = Tally::default();
    let start = Instant::now();

    for game_idx in 0..games {
        let mut strategy = make_strategy(game_idx);
        let outcome = play_pig(
            config.goal_score,
            config.max_rounds,
            &mut strategy,
            &mut opponent,
            &mut *dice,
        )?;
        tally.record(outcome);

        if (game_idx + 1) % 1000 == 0 {
            logger.verbose(&format!("Completed {} games", game_idx + 1));
        }
    }

    logger.verbose(&format!(
        "Elapsed time: {:.2}s",
        start.elapsed().as_secs_f64()
    ));
    let report = ExperimentReport::new(&strategy_name, opponent.name(), config, tally);
    report.log_summary(&logger);
    Ok(report)
}

/// Seed for game `game_idx` of an experiment seeded with `master_seed`
///
/// Each game gets its own dice, so results do not depend on which thread
/// plays which game.
pub fn game_seed(master_seed: u64, game_idx: usize) -> u64 {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(
        master_seed.wrapping_add((game_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
    );
    rng.next_u64()
}

/// Seed for a randomized strategy in game `game_idx`
///
/// Distinct from [`game_seed`] for the same game, so a strategy's choices
/// are not tied to the faces it rolls.
pub fn strategy_seed(master_seed: u64, game_idx: usize) -> u64 {
    game_seed(master_seed ^ STRATEGY_SEED_SALT, game_idx)
}

const STRATEGY_SEED_SALT: u64 = 0xD1B5_4A32_D192_ED03;

/// Parallel version of [`run_experiment`]
///
/// `make_strategy(i)` builds a fresh Player 1 strategy for game `i`, which
/// rolls [`GameDice::seeded`] with [`game_seed`]`(seed, i)`. Randomized
/// strategies should seed from [`strategy_seed`]`(seed, i)`.
pub fn run_experiment_parallel<F, S>(
    config: &ExperimentConfig,
    seed: u64,
    make_strategy: F,
) -> Result<ExperimentReport>
where
    F: Fn(usize) -> S + Sync,
    S: Strategy,
{
    config.validate()?;
    let games = config.games()?;
    let logger = GameLogger::with_verbosity(config.verbosity);
    let strategy_name = make_strategy(0).name().to_string();
    let start = Instant::now();

    let tally = (0..games)
        .into_par_iter()
        .map(|game_idx| {
            let mut dice = GameDice::seeded(game_seed(seed, game_idx));
            let mut strategy = make_strategy(game_idx);
            let mut opponent = HeuristicController::new();
            play_pig(
                config.goal_score,
                config.max_rounds,
                &mut strategy,
                &mut opponent,
                &mut dice,
            )
        })
        .try_fold(Tally::default, |mut tally, outcome| {
            tally.record(outcome?);
            Ok::<_, PigError>(tally)
        })
        .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))?;

    let elapsed = start.elapsed().as_secs_f64();
    logger.verbose(&format!(
        "Elapsed time: {:.2}s ({:.0} games/s)",
        elapsed,
        tally.games() as f64 / elapsed.max(f64::EPSILON)
    ));
    let report = ExperimentReport::new(
        &strategy_name,
        HeuristicController::new().name(),
        config,
        tally,
    );
    report.log_summary(&logger);
    Ok(report)
}
