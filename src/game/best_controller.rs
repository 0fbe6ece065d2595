//! Best-known strategy: zero dice when it pays, otherwise six
//!
//! Six dice give the highest expected turn score (about 8.7 points), so that
//! is the default. Rules are checked in this order:
//!
//! 1. Rolling zero dice reaches the goal: roll zero (a guaranteed win).
//! 2. Rolling zero dice is worth more than 8: roll zero.
//! 3. The opponent could win with a single six and we are below 70% of the
//!    goal: gamble on eight dice.
//! 4. Otherwise roll the default count.

use crate::core::DiceCount;
use crate::experiment::{maximum_average_score_action, SamplingMode};
use crate::game::controller::{GameStateView, Strategy};
use crate::game::dice::DiceSource;
use crate::Result;

const DEFAULT_DICE: u8 = 6;
const GAMBLE_DICE: u8 = 8;
/// Zero-dice gains above this beat the expected yield of six dice
const ZERO_DICE_THRESHOLD: u32 = 8;

/// The strongest known strategy against the heuristic player
#[derive(Debug, Clone, Copy)]
pub struct BestController {
    default_dice: DiceCount,
}

impl BestController {
    pub fn new() -> Self {
        BestController {
            default_dice: DiceCount::saturating(DEFAULT_DICE),
        }
    }

    /// Replace the default rolling count
    pub fn with_default_dice(mut self, dice: DiceCount) -> Self {
        self.default_dice = dice;
        self
    }

    /// Choose the default rolling count by Monte-Carlo estimation of the
    /// best average turn score
    pub fn calibrated<D: DiceSource + ?Sized>(dice: &mut D, simulations: usize) -> Result<Self> {
        let best = maximum_average_score_action(dice, simulations, SamplingMode::Exact)?;
        Ok(Self::new().with_default_dice(best))
    }

    pub fn default_dice(&self) -> DiceCount {
        self.default_dice
    }

    /// The decision itself, independent of any game loop
    pub fn decide(&self, view: &GameStateView) -> u8 {
        let zero_gain = view.zero_dice_gain();
        if zero_gain >= view.points_needed() {
            0
        } else if zero_gain > ZERO_DICE_THRESHOLD {
            0
        } else if view.opponent_threatens() {
            GAMBLE_DICE
        } else {
            self.default_dice.get()
        }
    }
}

impl Default for BestController {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for BestController {
    fn name(&self) -> &str {
        "best"
    }

    fn choose_dice(&mut self, view: &GameStateView) -> Result<u8> {
        Ok(self.decide(view))
    }
}
