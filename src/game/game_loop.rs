//! Game loop implementation
//!
//! Alternates turns between two strategies until one reaches the goal score
//! or the round budget runs out.

/// Macro for conditional logging that avoids allocation when feature is disabled
///
/// When verbose-logging feature is disabled, this becomes a no-op at compile time,
/// eliminating the format! allocations on the per-turn hot path.
macro_rules! log_if_verbose {
    ($self:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $self.game.logger.verbose(&format!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$self; // Suppress unused variable warning
        }
    };
}

use crate::core::{DiceCount, Player, Score};
use crate::game::controller::{GameStateView, Strategy};
use crate::game::dice::DiceSource;
use crate::game::turn::take_turn;
use crate::game::GameState;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Verbosity level for game output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Silent - no output during game
    Silent = 0,
    /// Minimal - only game outcome
    Minimal = 1,
    /// Normal - rounds and choices (default)
    #[default]
    Normal = 2,
    /// Verbose - every roll and score change
    Verbose = 3,
}

/// Final outcome of one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Player1Wins,
    Tie,
    Player2Wins,
}

impl GameOutcome {
    /// Decide a game that ran out of rounds: higher score wins
    pub fn from_scores(player1: Score, player2: Score) -> Self {
        match player1.cmp(&player2) {
            std::cmp::Ordering::Greater => GameOutcome::Player1Wins,
            std::cmp::Ordering::Equal => GameOutcome::Tie,
            std::cmp::Ordering::Less => GameOutcome::Player2Wins,
        }
    }

    pub fn won_by(player: Player) -> Self {
        match player {
            Player::One => GameOutcome::Player1Wins,
            Player::Two => GameOutcome::Player2Wins,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Player1Wins => Some(Player::One),
            GameOutcome::Tie => None,
            GameOutcome::Player2Wins => Some(Player::Two),
        }
    }

    /// Numeric encoding: 1 for a Player 1 win, 0 for a tie, -1 for a Player 2 win
    pub fn as_i8(self) -> i8 {
        match self {
            GameOutcome::Player1Wins => 1,
            GameOutcome::Tie => 0,
            GameOutcome::Player2Wins => -1,
        }
    }

    /// Announcement printed at the end of a game
    pub fn message(self) -> &'static str {
        match self {
            GameOutcome::Player1Wins => "Player 1 wins!",
            GameOutcome::Tie => "Tie!",
            GameOutcome::Player2Wins => "Player 2 wins!",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Reason the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEndReason {
    /// A player reached the goal score
    GoalReached(Player),
    /// The round budget ran out; decided on score
    RoundLimit,
}

/// Result of running a game to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub outcome: GameOutcome,
    pub end_reason: GameEndReason,
    pub player1_score: Score,
    pub player2_score: Score,
    /// Rounds started, including a round cut short by Player 1 winning
    pub rounds_played: u32,
}

/// Game loop manager
///
/// Handles turn alternation, dice resolution and win condition checking
pub struct GameLoop<'a> {
    /// The game state
    pub game: &'a mut GameState,
    dice: &'a mut dyn DiceSource,
    /// Verbosity level for output (cached from game.logger)
    pub verbosity: VerbosityLevel,
}

impl<'a> GameLoop<'a> {
    /// Create a new game loop for the given game state and dice
    pub fn new(game: &'a mut GameState, dice: &'a mut dyn DiceSource) -> Self {
        let verbosity = game.logger.verbosity();
        GameLoop {
            game,
            dice,
            verbosity,
        }
    }

    /// Set verbosity level for output
    ///
    /// This sets the verbosity on both the game loop and the game's logger.
    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self.game.logger.set_verbosity(verbosity);
        self
    }

    /// Run the game loop with the given strategies
    ///
    /// Returns when a player reaches the goal or the round budget is spent
    pub fn run_game(
        &mut self,
        strategy1: &mut dyn Strategy,
        strategy2: &mut dyn Strategy,
    ) -> Result<GameResult> {
        loop {
            if let Some(result) = self.run_round_once(strategy1, strategy2)? {
                self.game.logger.minimal(result.outcome.message());
                self.notify_game_end(strategy1, strategy2, result.outcome);
                return Ok(result);
            }
        }
    }

    /// Run a single round and check for game-ending conditions
    ///
    /// Returns:
    /// - `Ok(Some(GameResult))` if the game ended (goal reached or round budget spent)
    /// - `Ok(None)` if the game should continue with another round
    /// - `Err(_)` if a strategy failed or chose an invalid dice count
    pub fn run_round_once(
        &mut self,
        strategy1: &mut dyn Strategy,
        strategy2: &mut dyn Strategy,
    ) -> Result<Option<GameResult>> {
        if self.game.rounds_played >= self.game.max_rounds() {
            let outcome = GameOutcome::from_scores(
                self.game.score(Player::One),
                self.game.score(Player::Two),
            );
            return Ok(Some(self.result(outcome, GameEndReason::RoundLimit)));
        }

        // Both players see the same remaining count within a round
        let remaining = self.game.remaining_rounds();
        self.game.rounds_played += 1;
        if self.verbosity >= VerbosityLevel::Normal {
            self.game.logger.normal(&format!(
                "Round {} of {} - {} to {}",
                self.game.rounds_played,
                self.game.max_rounds(),
                self.game.score(Player::One),
                self.game.score(Player::Two)
            ));
        }

        if self.run_turn(Player::One, strategy1, remaining)? {
            return Ok(Some(self.goal_result(Player::One)));
        }
        if self.run_turn(Player::Two, strategy2, remaining)? {
            return Ok(Some(self.goal_result(Player::Two)));
        }

        Ok(None)
    }

    /// Play one turn for `player`. Returns true if the player reached the goal.
    fn run_turn(&mut self, player: Player, strategy: &mut dyn Strategy, remaining: u32) -> Result<bool> {
        let opponent_score = self.game.score(player.opponent());
        let view = GameStateView::new(
            player,
            self.game.score(player),
            opponent_score,
            self.game.goal_score(),
            remaining,
        );

        let dice = DiceCount::new(strategy.choose_dice(&view)?)?;
        if self.verbosity >= VerbosityLevel::Normal {
            self.game
                .logger
                .controller_choice(&format!("{} chose {} dice", player, dice));
        }

        let gain = take_turn(&mut *self.dice, opponent_score, dice);
        let record = self.game.apply_turn(player, dice, gain);

        if record.is_bust() {
            log_if_verbose!(self, "{} busted, scoring 1 (now {})", player, record.score_after);
        } else {
            log_if_verbose!(self, "{} gained {} (now {})", player, gain, record.score_after);
        }

        Ok(self.game.has_reached_goal(player))
    }

    fn goal_result(&self, winner: Player) -> GameResult {
        self.result(GameOutcome::won_by(winner), GameEndReason::GoalReached(winner))
    }

    fn result(&self, outcome: GameOutcome, end_reason: GameEndReason) -> GameResult {
        GameResult {
            outcome,
            end_reason,
            player1_score: self.game.score(Player::One),
            player2_score: self.game.score(Player::Two),
            rounds_played: self.game.rounds_played,
        }
    }

    /// Notify both strategies of the outcome with their final view
    fn notify_game_end(
        &self,
        strategy1: &mut dyn Strategy,
        strategy2: &mut dyn Strategy,
        outcome: GameOutcome,
    ) {
        strategy1.on_game_end(&self.final_view(Player::One), outcome);
        strategy2.on_game_end(&self.final_view(Player::Two), outcome);
    }

    fn final_view(&self, player: Player) -> GameStateView {
        GameStateView::new(
            player,
            self.game.score(player),
            self.game.score(player.opponent()),
            self.game.goal_score(),
            self.game.remaining_rounds(),
        )
    }
}

/// Play one silent game from zero scores and return only the outcome
pub fn play_pig(
    goal_score: Score,
    max_rounds: u32,
    strategy1: &mut dyn Strategy,
    strategy2: &mut dyn Strategy,
    dice: &mut dyn DiceSource,
) -> Result<GameOutcome> {
    let mut game = GameState::new(goal_score, max_rounds)?;
    let mut game_loop = GameLoop::new(&mut game, dice).with_verbosity(VerbosityLevel::Silent);
    Ok(game_loop.run_game(strategy1, strategy2)?.outcome)
}
