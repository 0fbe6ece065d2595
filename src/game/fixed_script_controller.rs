//! Fixed script controller for deterministic testing
//!
//! This controller follows a predetermined sequence of dice counts, making
//! it ideal for replaying specific game scenarios. Once the script is
//! exhausted, it keeps choosing the fallback count.

use crate::game::controller::{GameStateView, Strategy};
use crate::{PigError, Result};

/// A controller that follows a fixed script of dice counts
///
/// The script is serializable along with its position, so a partly played
/// script can be saved and resumed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FixedScriptController {
    /// The predetermined sequence of dice counts
    script: Vec<u8>,
    /// Count used once the script runs out
    fallback: u8,
    /// Current position in the script
    pub current_index: usize,
}

impl FixedScriptController {
    /// Create a new scripted controller that falls back to zero dice
    ///
    /// # Example
    /// ```
    /// use pig_sim::game::FixedScriptController;
    ///
    /// // Rolls 6, 6, 0, then zero dice for the rest of the game
    /// let controller = FixedScriptController::new(vec![6, 6, 0]);
    /// assert_eq!(controller.remaining(), 3);
    /// ```
    pub fn new(script: Vec<u8>) -> Self {
        FixedScriptController {
            script,
            fallback: 0,
            current_index: 0,
        }
    }

    /// Set the count used after the script is exhausted
    pub fn with_fallback(mut self, fallback: u8) -> Self {
        self.fallback = fallback;
        self
    }

    /// Parse a script such as "1 1 2" or "1,1,2"
    pub fn parse(script: &str) -> Result<Self> {
        let choices = script
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u8>()
                    .map_err(|_| PigError::InvalidInput(format!("invalid dice count '{}' in script", s)))
            })
            .collect::<Result<Vec<u8>>>()?;
        Ok(Self::new(choices))
    }

    /// Scripted choices not yet used
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.current_index)
    }

    fn next_choice(&mut self) -> u8 {
        if let Some(&choice) = self.script.get(self.current_index) {
            self.current_index += 1;
            choice
        } else {
            self.fallback
        }
    }
}

impl Strategy for FixedScriptController {
    fn name(&self) -> &str {
        "fixed"
    }

    fn choose_dice(&mut self, _view: &GameStateView) -> Result<u8> {
        Ok(self.next_choice())
    }
}
