//! Game state: scores, round counter and turn history

use crate::core::{DiceCount, Player, Score};
use crate::game::logger::GameLogger;
use crate::{PigError, Result};
use serde::{Deserialize, Serialize};

/// Record of one resolved turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Zero-based round index
    pub round: u32,
    pub player: Player,
    pub dice: DiceCount,
    /// Points gained this turn
    pub gain: Score,
    /// The player's score after the turn
    pub score_after: Score,
}

impl TurnRecord {
    /// The turn rolled dice and hit the bust face
    pub fn is_bust(&self) -> bool {
        !self.dice.is_zero() && self.gain == 1
    }
}

/// State of one game of Pig
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    goal_score: Score,
    max_rounds: u32,
    scores: [Score; 2],
    /// Rounds started so far
    pub rounds_played: u32,
    history: Vec<TurnRecord>,

    #[serde(skip)]
    pub logger: GameLogger,
}

impl GameState {
    /// Start a game with both scores at zero
    pub fn new(goal_score: Score, max_rounds: u32) -> Result<Self> {
        if goal_score == 0 {
            return Err(PigError::InvalidConfig(
                "goal score must be positive".to_string(),
            ));
        }
        if max_rounds == 0 {
            return Err(PigError::InvalidConfig(
                "round budget must be positive".to_string(),
            ));
        }
        Ok(GameState {
            goal_score,
            max_rounds,
            scores: [0, 0],
            rounds_played: 0,
            history: Vec::new(),
            logger: GameLogger::new(),
        })
    }

    /// Override starting scores (for replaying a position)
    pub fn with_scores(mut self, player1: Score, player2: Score) -> Self {
        self.scores = [player1, player2];
        self
    }

    pub fn goal_score(&self) -> Score {
        self.goal_score
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn score(&self, player: Player) -> Score {
        self.scores[player.index()]
    }

    pub fn has_reached_goal(&self, player: Player) -> bool {
        self.score(player) >= self.goal_score
    }

    /// Rounds left including the one about to be played
    pub fn remaining_rounds(&self) -> u32 {
        self.max_rounds.saturating_sub(self.rounds_played)
    }

    /// Every turn resolved so far, in order
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Add a turn's gain to `player` and record it
    pub fn apply_turn(&mut self, player: Player, dice: DiceCount, gain: Score) -> TurnRecord {
        let score = &mut self.scores[player.index()];
        *score += gain;
        let record = TurnRecord {
            round: self.rounds_played.saturating_sub(1),
            player,
            dice,
            gain,
            score_after: *score,
        };
        self.history.push(record);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = GameState::new(100, 20).unwrap();
        assert_eq!(game.score(Player::One), 0);
        assert_eq!(game.score(Player::Two), 0);
        assert_eq!(game.remaining_rounds(), 20);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_rejects_empty_config() {
        assert!(matches!(GameState::new(0, 20), Err(PigError::InvalidConfig(_))));
        assert!(matches!(GameState::new(100, 0), Err(PigError::InvalidConfig(_))));
    }

    #[test]
    fn test_apply_turn() {
        let mut game = GameState::new(10, 1).unwrap();
        game.rounds_played = 1;
        let record = game.apply_turn(Player::Two, DiceCount::new(2).unwrap(), 7);
        assert_eq!(record.score_after, 7);
        assert_eq!(record.round, 0);
        assert!(!record.is_bust());
        assert!(!game.has_reached_goal(Player::Two));

        game.apply_turn(Player::Two, DiceCount::ZERO, 3);
        assert!(game.has_reached_goal(Player::Two));
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_bust_detection() {
        let record = TurnRecord {
            round: 0,
            player: Player::One,
            dice: DiceCount::new(4).unwrap(),
            gain: 1,
            score_after: 1,
        };
        assert!(record.is_bust());

        // A zero-dice gain of 1 is not a bust
        let zero = TurnRecord {
            dice: DiceCount::ZERO,
            ..record
        };
        assert!(!zero.is_bust());
    }

    #[test]
    fn test_serde_snapshot() {
        let mut game = GameState::new(100, 20).unwrap().with_scores(12, 30);
        game.rounds_played = 3;
        game.apply_turn(Player::One, DiceCount::new(3).unwrap(), 11);

        let json = serde_json::to_string(&game).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.score(Player::One), 23);
        assert_eq!(restored.score(Player::Two), 30);
        assert_eq!(restored.history(), game.history());
    }
}
