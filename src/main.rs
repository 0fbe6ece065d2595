//! Pig - Main Binary
//!
//! Play a game of Pig, tabulate expected turn scores, or measure a
//! strategy's win rate against the heuristic.

use clap::{Parser, Subcommand, ValueEnum};
use pig_sim::{
    experiment::{
        average_score_table, best_of_table, run_experiment, run_experiment_parallel,
        strategy_seed, ExperimentConfig, SamplingMode,
    },
    game::{
        BestController, ConstantController, FixedScriptController, GameDice, GameLoop, GameState,
        HeuristicController, InteractiveController, OutputFormat, RandomController, Strategy,
        VerbosityLevel,
    },
    core::Score,
    PigError, Result,
};

/// Strategy for a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ControllerType {
    /// Rolls 8 under threat, otherwise 2 or 3 depending on progress
    Heuristic,
    /// Takes the zero-dice gain when it pays, otherwise rolls 6 (8 under threat)
    Best,
    /// Text UI controller for human play via stdin
    Tui,
    /// Fixed script of dice counts (requires --p1-fixed-inputs / --p2-fixed-inputs)
    Fixed,
    /// Uniformly random dice count
    Random,
    /// Always rolls zero dice
    Zero,
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Log line format for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    /// Human-readable text
    Text,
    /// One JSON object per line
    Json,
}

impl From<LogFormatArg> for OutputFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => OutputFormat::Text,
            LogFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "pig")]
#[command(about = "Pig dice game simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between two strategies
    Play {
        /// Score that ends the game
        #[arg(long, default_value_t = 100)]
        goal: Score,

        /// Round budget
        #[arg(long, default_value_t = 20)]
        rounds: u32,

        /// Player 1 strategy
        #[arg(long, value_enum, default_value = "heuristic")]
        p1: ControllerType,

        /// Player 2 strategy
        #[arg(long, value_enum, default_value = "tui")]
        p2: ControllerType,

        /// Fixed script for player 1 (space or comma separated, e.g., "6 6 0" or "6,6,0")
        #[arg(long, value_name = "CHOICES")]
        p1_fixed_inputs: Option<String>,

        /// Fixed script for player 2 (space or comma separated, e.g., "6 6 0" or "6,6,0")
        #[arg(long, value_name = "CHOICES")]
        p2_fixed_inputs: Option<String>,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Format of game log lines
        #[arg(long, value_enum, default_value = "text")]
        log_format: LogFormatArg,
    },

    /// Estimate the average turn score for each dice count
    Dice {
        /// Samples per dice count
        #[arg(long, default_value_t = 10_000)]
        simulations: usize,

        /// Set random seed for deterministic estimates
        #[arg(long)]
        seed: Option<u64>,

        /// Draw one extra sample per estimate (reproduces historical numbers)
        #[arg(long)]
        legacy_sampling: bool,
    },

    /// Measure a strategy's win rate as Player 1 against the heuristic
    Experiment {
        /// Strategy under test
        #[arg(long, value_enum, default_value = "best")]
        strategy: ControllerType,

        /// Fixed script when --strategy=fixed
        #[arg(long, value_name = "CHOICES")]
        fixed_inputs: Option<String>,

        /// Number of games
        #[arg(long, default_value_t = 1000)]
        simulations: usize,

        /// Score that ends each game
        #[arg(long, default_value_t = 100)]
        goal: Score,

        /// Round budget per game
        #[arg(long, default_value_t = 20)]
        rounds: u32,

        /// Set random seed for deterministic experiments
        #[arg(long)]
        seed: Option<u64>,

        /// Play games on all cores (per-game dice derived from the seed)
        #[arg(long)]
        parallel: bool,

        /// Play one extra game (reproduces historical numbers)
        #[arg(long)]
        legacy_sampling: bool,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Verbosity level for progress output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "minimal", short = 'v')]
        verbosity: VerbosityArg,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            goal,
            rounds,
            p1,
            p2,
            p1_fixed_inputs,
            p2_fixed_inputs,
            seed,
            verbosity,
            log_format,
        } => {
            let p1 = SeatArgs::new(p1, p1_fixed_inputs, "--p1-fixed-inputs");
            let p2 = SeatArgs::new(p2, p2_fixed_inputs, "--p2-fixed-inputs");
            run_play(goal, rounds, p1, p2, seed, verbosity.into(), log_format.into())?
        }
        Commands::Dice {
            simulations,
            seed,
            legacy_sampling,
        } => run_dice(simulations, seed, sampling_mode(legacy_sampling))?,
        Commands::Experiment {
            strategy,
            fixed_inputs,
            simulations,
            goal,
            rounds,
            seed,
            parallel,
            legacy_sampling,
            json,
            verbosity,
        } => {
            let verbosity = if json {
                VerbosityLevel::Silent
            } else {
                verbosity.into()
            };
            let config = ExperimentConfig::new(simulations)
                .with_goal_score(goal)
                .with_max_rounds(rounds)
                .with_sampling(sampling_mode(legacy_sampling))
                .with_verbosity(verbosity);
            let seat = SeatArgs::new(strategy, fixed_inputs, "--fixed-inputs");
            run_experiment_command(&config, seat, seed, parallel, json)?
        }
    }

    Ok(())
}

fn sampling_mode(legacy: bool) -> SamplingMode {
    if legacy {
        SamplingMode::Inclusive
    } else {
        SamplingMode::Exact
    }
}

/// Strategy choice for one seat as given on the command line
struct SeatArgs {
    kind: ControllerType,
    fixed_inputs: Option<String>,
    flag: &'static str,
}

impl SeatArgs {
    fn new(kind: ControllerType, fixed_inputs: Option<String>, flag: &'static str) -> Self {
        SeatArgs {
            kind,
            fixed_inputs,
            flag,
        }
    }
}

/// An automated strategy that can be instantiated any number of times
#[derive(Debug, Clone)]
enum StrategySpec {
    Heuristic,
    Best,
    Fixed(FixedScriptController),
    Random(Option<u64>),
    Zero,
}

impl StrategySpec {
    fn from_args(seat: &SeatArgs, seed: Option<u64>) -> Result<Self> {
        Ok(match seat.kind {
            ControllerType::Heuristic => StrategySpec::Heuristic,
            ControllerType::Best => StrategySpec::Best,
            ControllerType::Random => StrategySpec::Random(seed),
            ControllerType::Zero => StrategySpec::Zero,
            ControllerType::Fixed => match &seat.fixed_inputs {
                Some(input) => StrategySpec::Fixed(FixedScriptController::parse(input).map_err(
                    |e| PigError::InvalidInput(format!("Error parsing {}: {}", seat.flag, e)),
                )?),
                None => {
                    return Err(PigError::InvalidConfig(format!(
                        "{} is required for the fixed strategy",
                        seat.flag
                    )));
                }
            },
            ControllerType::Tui => {
                return Err(PigError::InvalidConfig(
                    "the tui strategy needs a human and can only be used with `play`".to_string(),
                ));
            }
        })
    }

    /// A fresh strategy for game `game_idx`; seeded random players get a
    /// different seed every game
    fn build(&self, game_idx: usize) -> Box<dyn Strategy + Send> {
        match self {
            StrategySpec::Heuristic => Box::new(HeuristicController::new()),
            StrategySpec::Best => Box::new(BestController::new()),
            StrategySpec::Fixed(script) => Box::new(script.clone()),
            StrategySpec::Random(Some(seed)) => {
                Box::new(RandomController::with_seed(strategy_seed(*seed, game_idx)))
            }
            StrategySpec::Random(None) => Box::new(RandomController::new()),
            StrategySpec::Zero => Box::new(ConstantController::zero()),
        }
    }
}

/// Strategy for one seat of an interactive game; `seed_offset` keeps two
/// random seats from mirroring each other
fn seat_strategy(seat: &SeatArgs, seed: Option<u64>, seed_offset: u64) -> Result<Box<dyn Strategy>> {
    if seat.kind == ControllerType::Tui {
        return Ok(Box::new(InteractiveController::stdio()));
    }
    let seed = seed.map(|s| s.wrapping_add(seed_offset));
    let strategy: Box<dyn Strategy> = StrategySpec::from_args(seat, seed)?.build(0);
    Ok(strategy)
}

fn new_dice(seed: Option<u64>) -> GameDice {
    match seed {
        Some(seed) => GameDice::seeded(seed),
        None => GameDice::from_entropy(),
    }
}

fn run_play(
    goal: Score,
    rounds: u32,
    p1: SeatArgs,
    p2: SeatArgs,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    log_format: OutputFormat,
) -> Result<()> {
    let mut strategy1 = seat_strategy(&p1, seed, 1)?;
    let mut strategy2 = seat_strategy(&p2, seed, 2)?;
    let mut dice = new_dice(seed);

    // Banners would break one-object-per-line output
    let banners = verbosity >= VerbosityLevel::Normal && log_format == OutputFormat::Text;
    if banners {
        println!("=== Pig: first to {goal} in {rounds} rounds ===");
        println!("  Player 1: {}", strategy1.name());
        println!("  Player 2: {}\n", strategy2.name());
    }

    let mut game = GameState::new(goal, rounds)?;
    game.logger.set_output_format(log_format);
    let mut game_loop = GameLoop::new(&mut game, &mut dice).with_verbosity(verbosity);
    let result = game_loop.run_game(&mut *strategy1, &mut *strategy2)?;

    if banners {
        println!("\n=== Game Over ===");
        println!("Final score: {} to {}", result.player1_score, result.player2_score);
        println!("Rounds played: {}", result.rounds_played);
        println!("Reason: {:?}", result.end_reason);
    }

    Ok(())
}

fn run_dice(simulations: usize, seed: Option<u64>, sampling: SamplingMode) -> Result<()> {
    let mut dice = new_dice(seed);
    let table = average_score_table(&mut dice, simulations, sampling)?;
    for (count, average) in &table {
        println!("{:>2} dice: {:.3}", count.get(), average);
    }
    if let Some(best) = best_of_table(&table) {
        println!("Best: {} dice", best);
    }
    Ok(())
}

fn run_experiment_command(
    config: &ExperimentConfig,
    seat: SeatArgs,
    seed: Option<u64>,
    parallel: bool,
    json: bool,
) -> Result<()> {
    let spec = StrategySpec::from_args(&seat, seed)?;

    let report = if parallel {
        let master_seed = seed.unwrap_or_else(rand::random);
        run_experiment_parallel(config, master_seed, |game_idx| spec.build(game_idx))?
    } else {
        let mut dice = new_dice(seed);
        run_experiment(&mut dice, config, |game_idx| spec.build(game_idx))?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
