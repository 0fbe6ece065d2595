//! Heuristic controller: roll three unless close to the end
//!
//! The baseline computer player. It rolls three dice by default and only
//! deviates in two end-game situations:
//!
//! - The opponent could win with a single six on their next turn while we
//!   are still below 70% of the goal: gamble on eight dice.
//! - We are at or above 90% of the goal: play it safe with two dice.
//!
//! The gamble is checked first.

use crate::game::controller::{GameStateView, Strategy};
use crate::Result;

const DEFAULT_DICE: u8 = 3;
const GAMBLE_DICE: u8 = 8;
const SAFE_DICE: u8 = 2;

/// Heuristic strategy that rolls three dice unless the game is nearly over
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicController;

impl HeuristicController {
    pub fn new() -> Self {
        HeuristicController
    }

    /// The decision itself, independent of any game loop
    pub fn decide(view: &GameStateView) -> u8 {
        if view.opponent_threatens() {
            GAMBLE_DICE
        } else if !view.below_fraction_of_goal(9) {
            SAFE_DICE
        } else {
            DEFAULT_DICE
        }
    }
}

impl Strategy for HeuristicController {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn choose_dice(&mut self, view: &GameStateView) -> Result<u8> {
        Ok(Self::decide(view))
    }
}
