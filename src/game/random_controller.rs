//! Random controller for baseline comparisons
//!
//! Picks a dice count uniformly from 0-10 each turn. Any sensible strategy
//! should beat it.

use crate::core::DiceCount;
use crate::game::controller::{GameStateView, Strategy};
use crate::Result;
use rand::Rng;

/// A controller that makes random choices
pub struct RandomController {
    rng: Box<dyn rand::RngCore + Send>,
}

impl RandomController {
    /// Create a new random controller with an entropy-seeded RNG
    pub fn new() -> Self {
        use rand::SeedableRng;
        RandomController {
            rng: Box::new(rand::rngs::StdRng::from_entropy()),
        }
    }

    /// Create a random controller with a seeded RNG (for deterministic testing)
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        RandomController {
            rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomController {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomController {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_dice(&mut self, _view: &GameStateView) -> Result<u8> {
        Ok(self.rng.gen_range(0..=DiceCount::MAX.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;

    #[test]
    fn test_choices_in_range() {
        let view = GameStateView::new(Player::One, 0, 0, 100, 20);
        let mut controller = RandomController::with_seed(42);
        for _ in 0..200 {
            let choice = controller.choose_dice(&view).unwrap();
            assert!(DiceCount::new(choice).is_ok());
        }
    }

    #[test]
    fn test_seeded_determinism() {
        let view = GameStateView::new(Player::One, 0, 0, 100, 20);
        let mut controller1 = RandomController::with_seed(42);
        let mut controller2 = RandomController::with_seed(42);

        for _ in 0..20 {
            assert_eq!(
                controller1.choose_dice(&view).unwrap(),
                controller2.choose_dice(&view).unwrap()
            );
        }
    }
}
