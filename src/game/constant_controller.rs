//! Constant controller: the same dice count every turn
//!
//! `ConstantController::zero()` never rolls and lives entirely off the
//! opponent's score digits. Useful for automated testing and as a yardstick
//! for single-count strategies.

use crate::core::DiceCount;
use crate::game::controller::{GameStateView, Strategy};
use crate::Result;

/// A controller that always rolls the same number of dice
#[derive(Debug, Clone)]
pub struct ConstantController {
    dice: DiceCount,
    name: String,
}

impl ConstantController {
    pub fn new(dice: DiceCount) -> Self {
        ConstantController {
            dice,
            name: format!("always-{}", dice),
        }
    }

    /// Never roll; always take the zero-dice gain
    pub fn zero() -> Self {
        Self::new(DiceCount::ZERO)
    }
}

impl Strategy for ConstantController {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_dice(&mut self, _view: &GameStateView) -> Result<u8> {
        Ok(self.dice.get())
    }
}
