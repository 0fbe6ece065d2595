//! Interactive controller for human players
//!
//! Prints the current scores, reads the number of dice to roll and echoes
//! the choice back. Reads from any `BufRead` and writes to any `Write`;
//! [`InteractiveController::stdio`] wires it to the console.
//!
//! Input that is not an integer, or running out of input, is a fatal
//! error. An integer outside 0-10 is passed through so the game loop can
//! reject it.

use crate::game::controller::{GameStateView, Strategy};
use crate::game::game_loop::GameOutcome;
use crate::{PigError, Result};
use std::io::{self, BufRead, Write};

/// A controller that prompts a human player for decisions
pub struct InteractiveController<R, W> {
    input: R,
    output: W,
}

impl InteractiveController<io::StdinLock<'static>, io::Stdout> {
    /// Create a controller reading stdin and writing stdout
    pub fn stdio() -> Self {
        InteractiveController::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> InteractiveController<R, W> {
    pub fn new(input: R, output: W) -> Self {
        InteractiveController { input, output }
    }

    /// Recover the writer (for inspecting prompts in tests)
    pub fn into_output(self) -> W {
        self.output
    }

    fn read_choice(&mut self) -> Result<u8> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PigError::InvalidInput(
                "no input while waiting for a dice count".to_string(),
            ));
        }

        let trimmed = line.trim();
        trimmed
            .parse::<u8>()
            .map_err(|_| PigError::InvalidInput(format!("'{}' is not a dice count", trimmed)))
    }
}

impl<R: BufRead, W: Write> Strategy for InteractiveController<R, W> {
    fn name(&self) -> &str {
        "tui"
    }

    fn choose_dice(&mut self, view: &GameStateView) -> Result<u8> {
        writeln!(
            self.output,
            "Your score is {}, your opponent's score is {}, and the goal is {}.",
            view.own_score(),
            view.opponent_score(),
            view.goal_score()
        )?;
        write!(self.output, "Enter in the number of dice to roll (0-10): ")?;
        self.output.flush()?;

        let choice = self.read_choice()?;
        writeln!(self.output, "You chose {}.", choice)?;
        Ok(choice)
    }

    fn on_game_end(&mut self, view: &GameStateView, outcome: GameOutcome) {
        let won = outcome.winner() == Some(view.player());
        // Console output is best effort once the game is over
        let _ = writeln!(
            self.output,
            "Game over: you {} with {} points.",
            if won { "won" } else if outcome == GameOutcome::Tie { "tied" } else { "lost" },
            view.own_score()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;
    use std::io::Cursor;

    fn view() -> GameStateView {
        GameStateView::new(Player::Two, 12, 30, 100, 20)
    }

    #[test]
    fn test_reads_choice_and_echoes() {
        let mut controller = InteractiveController::new(Cursor::new("4\n"), Vec::new());
        assert_eq!(controller.choose_dice(&view()).unwrap(), 4);

        let output = String::from_utf8(controller.into_output()).unwrap();
        assert!(output.contains("Your score is 12, your opponent's score is 30, and the goal is 100."));
        assert!(output.contains("Enter in the number of dice to roll (0-10):"));
        assert!(output.contains("You chose 4."));
    }

    #[test]
    fn test_trims_whitespace() {
        let mut controller = InteractiveController::new(Cursor::new("  0  \r\n"), Vec::new());
        assert_eq!(controller.choose_dice(&view()).unwrap(), 0);
    }

    #[test]
    fn test_out_of_range_passes_through() {
        let mut controller = InteractiveController::new(Cursor::new("11\n"), Vec::new());
        assert_eq!(controller.choose_dice(&view()).unwrap(), 11);
    }

    #[test]
    fn test_non_integer_is_fatal() {
        let mut controller = InteractiveController::new(Cursor::new("three\n"), Vec::new());
        assert!(matches!(
            controller.choose_dice(&view()),
            Err(PigError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_end_of_input_is_fatal() {
        let mut controller = InteractiveController::new(Cursor::new(""), Vec::new());
        assert!(matches!(
            controller.choose_dice(&view()),
            Err(PigError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_successive_turns() {
        let mut controller = InteractiveController::new(Cursor::new("3\n7\n"), Vec::new());
        assert_eq!(controller.choose_dice(&view()).unwrap(), 3);
        assert_eq!(controller.choose_dice(&view()).unwrap(), 7);
    }
}
