//! Strategy trait and game state view
//!
//! This module defines the interface between the game loop and the
//! strategies (AI or human) that pick how many dice to roll. The game loop
//! calls the strategy once per turn with a read-only view of the four
//! values that drive every decision: own score, opponent score, goal score
//! and remaining rounds.

use crate::core::{Player, Score};
use crate::game::game_loop::GameOutcome;
use crate::game::turn::zero_dice_gain;
use crate::Result;

/// Read-only view of the game from one player's seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStateView {
    player: Player,
    own_score: Score,
    opponent_score: Score,
    goal_score: Score,
    remaining_rounds: u32,
}

impl GameStateView {
    pub fn new(
        player: Player,
        own_score: Score,
        opponent_score: Score,
        goal_score: Score,
        remaining_rounds: u32,
    ) -> Self {
        GameStateView {
            player,
            own_score,
            opponent_score,
            goal_score,
            remaining_rounds,
        }
    }

    /// The seat this view is for
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn own_score(&self) -> Score {
        self.own_score
    }

    pub fn opponent_score(&self) -> Score {
        self.opponent_score
    }

    pub fn goal_score(&self) -> Score {
        self.goal_score
    }

    /// Rounds left including the current one
    pub fn remaining_rounds(&self) -> u32 {
        self.remaining_rounds
    }

    /// Points this player still needs to reach the goal
    pub fn points_needed(&self) -> Score {
        self.goal_score.saturating_sub(self.own_score)
    }

    /// Points the opponent still needs to reach the goal
    pub fn opponent_points_needed(&self) -> Score {
        self.goal_score.saturating_sub(self.opponent_score)
    }

    /// What rolling zero dice would earn this turn
    pub fn zero_dice_gain(&self) -> Score {
        zero_dice_gain(self.opponent_score)
    }

    /// Opponent could reach the goal with one six, while we are below 70%
    /// of the goal
    pub fn opponent_threatens(&self) -> bool {
        self.opponent_points_needed() <= 6 && self.below_fraction_of_goal(7)
    }

    /// `own_score < tenths/10 * goal_score`, in exact integer arithmetic
    pub fn below_fraction_of_goal(&self, tenths: u32) -> bool {
        u64::from(self.own_score) * 10 < u64::from(self.goal_score) * u64::from(tenths)
    }
}

/// Strategy trait
///
/// Implement this trait to create AI players or connect a human. The game
/// loop validates the returned dice count, so a strategy returning a value
/// above 10 aborts the game with an error rather than being clamped.
pub trait Strategy {
    /// Short name used in logs and reports
    fn name(&self) -> &str;

    /// Choose how many dice to roll this turn (0-10)
    fn choose_dice(&mut self, view: &GameStateView) -> Result<u8>;

    /// Called when the game ends (for cleanup/logging)
    fn on_game_end(&mut self, _view: &GameStateView, _outcome: GameOutcome) {}
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose_dice(&mut self, view: &GameStateView) -> Result<u8> {
        (**self).choose_dice(view)
    }

    fn on_game_end(&mut self, view: &GameStateView, outcome: GameOutcome) {
        (**self).on_game_end(view, outcome)
    }
}

/// Strategy backed by a closure
pub struct FnStrategy<F> {
    name: String,
    choose: F,
}

impl<F> FnStrategy<F>
where
    F: FnMut(&GameStateView) -> u8,
{
    pub fn new(name: impl Into<String>, choose: F) -> Self {
        FnStrategy {
            name: name.into(),
            choose,
        }
    }
}

impl<F> Strategy for FnStrategy<F>
where
    F: FnMut(&GameStateView) -> u8,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_dice(&mut self, view: &GameStateView) -> Result<u8> {
        Ok((self.choose)(view))
    }
}
