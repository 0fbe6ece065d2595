//! Game mechanics, strategies and the game loop

pub mod best_controller;
pub mod constant_controller;
pub mod controller;
pub mod dice;
pub mod fixed_script_controller;
pub mod game_loop;
pub mod heuristic_controller;
pub mod interactive_controller;
pub mod logger;
pub mod random_controller;
pub mod state;
pub mod turn;

pub use best_controller::BestController;
pub use constant_controller::ConstantController;
pub use controller::{FnStrategy, GameStateView, Strategy};
pub use dice::{roll_dice, DiceSource, GameDice, LoadedDice};
pub use fixed_script_controller::FixedScriptController;
pub use game_loop::{play_pig, GameEndReason, GameLoop, GameOutcome, GameResult, VerbosityLevel};
pub use heuristic_controller::HeuristicController;
pub use interactive_controller::InteractiveController;
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode};
pub use random_controller::RandomController;
pub use state::{GameState, TurnRecord};
pub use turn::{take_turn, zero_dice_gain};
