//! End-to-end game tests
//!
//! These tests play complete games through the public API with scripted
//! dice and strategies and check scores, outcomes and the turn history.

use pig_sim::{
    core::{DiceCount, Player, MAX_TURN_GAIN},
    game::{
        play_pig, BestController, ConstantController, FixedScriptController, FnStrategy,
        GameDice, GameEndReason, GameLoop, GameOutcome, GameState, GameStateView, HeuristicController,
        InteractiveController, LoadedDice, RandomController, Strategy, VerbosityLevel,
    },
    PigError, Result,
};
use std::io::Cursor;

#[test]
fn test_zero_dice_race_to_goal() -> Result<()> {
    // Both always take the zero-dice gain; Player 1 reaches 10 first
    let mut game = GameState::new(10, 20)?;
    let mut dice = LoadedDice::always(6)?;
    let mut p1 = ConstantController::zero();
    let mut p2 = ConstantController::zero();

    let result = GameLoop::new(&mut game, &mut dice)
        .with_verbosity(VerbosityLevel::Silent)
        .run_game(&mut p1, &mut p2)?;

    assert_eq!(result.outcome, GameOutcome::Player1Wins);
    assert_eq!(result.end_reason, GameEndReason::GoalReached(Player::One));
    assert!(result.player1_score >= 10);
    // Zero dice never touches the die
    assert_eq!(dice.rolls(), 0);
    Ok(())
}

#[test]
fn test_scripted_game_history() -> Result<()> {
    // P1 rolls 2 dice of 6s (12), P2 rolls 1 die busting, then P1 rolls 0
    let mut game = GameState::new(100, 2)?;
    let mut dice = LoadedDice::sequence(vec![6, 6, 1])?;
    let mut p1 = FixedScriptController::new(vec![2, 0]);
    let mut p2 = FixedScriptController::new(vec![1, 0]);

    let result = GameLoop::new(&mut game, &mut dice)
        .with_verbosity(VerbosityLevel::Silent)
        .run_game(&mut p1, &mut p2)?;

    let history = game.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].gain, 12);
    assert!(history[1].is_bust());
    // Round 2: P1 zero dice against 1 -> 2; P2 zero dice against 14 -> 5
    assert_eq!(history[2].gain, 2);
    assert_eq!(history[3].gain, 5);
    assert_eq!(result.player1_score, 14);
    assert_eq!(result.player2_score, 6);
    assert_eq!(result.end_reason, GameEndReason::RoundLimit);
    assert_eq!(result.outcome, GameOutcome::Player1Wins);
    Ok(())
}

#[test]
fn test_invalid_dice_count_aborts_game() {
    let mut dice = GameDice::seeded(1);
    let mut bad = FnStrategy::new("eleven", |_: &GameStateView| 11);
    let mut heuristic = HeuristicController::new();
    let err = play_pig(100, 20, &mut bad, &mut heuristic, &mut dice).unwrap_err();
    assert!(matches!(err, PigError::DiceCountOutOfRange(11)));
}

#[test]
fn test_best_vs_heuristic_bounded_overshoot() -> Result<()> {
    for seed in 0..100 {
        let mut game = GameState::new(100, 20)?;
        let mut dice = GameDice::seeded(seed);
        let mut best = BestController::new();
        let mut heuristic = HeuristicController::new();

        let result = GameLoop::new(&mut game, &mut dice)
            .with_verbosity(VerbosityLevel::Silent)
            .run_game(&mut best, &mut heuristic)?;

        assert!(result.rounds_played <= 20);
        assert!(result.player1_score < 100 + MAX_TURN_GAIN);
        assert!(result.player2_score < 100 + MAX_TURN_GAIN);
        if let GameEndReason::GoalReached(winner) = result.end_reason {
            assert_eq!(result.outcome.winner(), Some(winner));
        }
    }
    Ok(())
}

#[test]
fn test_random_vs_random_always_terminates() -> Result<()> {
    for seed in 0..50 {
        let mut dice = GameDice::seeded(seed);
        let mut p1 = RandomController::with_seed(seed);
        let mut p2 = RandomController::with_seed(seed + 1);
        play_pig(100, 20, &mut p1, &mut p2, &mut dice)?;
    }
    Ok(())
}

#[test]
fn test_boxed_strategies() -> Result<()> {
    let mut dice = GameDice::seeded(4);
    let mut p1: Box<dyn Strategy> = Box::new(BestController::new());
    let mut p2: Box<dyn Strategy> = Box::new(ConstantController::new(DiceCount::new(5)?));
    let outcome = play_pig(50, 10, &mut p1, &mut p2, &mut dice)?;
    assert!(matches!(
        outcome,
        GameOutcome::Player1Wins | GameOutcome::Tie | GameOutcome::Player2Wins
    ));
    Ok(())
}

#[test]
fn test_human_player_through_reader() -> Result<()> {
    // The human always answers 0: gains 2 then 3 against a busting opponent
    let mut game = GameState::new(100, 2)?;
    let mut dice = LoadedDice::always(1)?;
    let mut heuristic = HeuristicController::new();
    let mut human = InteractiveController::new(Cursor::new("0\n0\n"), Vec::new());

    let result = GameLoop::new(&mut game, &mut dice)
        .with_verbosity(VerbosityLevel::Silent)
        .run_game(&mut heuristic, &mut human)?;

    assert_eq!(result.player1_score, 2);
    assert_eq!(result.player2_score, 5);
    assert_eq!(result.outcome, GameOutcome::Player2Wins);

    let transcript = String::from_utf8(human.into_output()).expect("utf-8 transcript");
    assert!(transcript.contains("Your score is 0, your opponent's score is 1, and the goal is 100."));
    assert!(transcript.contains("You chose 0."));
    Ok(())
}

#[test]
fn test_human_garbage_input_is_fatal() -> Result<()> {
    let mut dice = GameDice::seeded(2);
    let mut human = InteractiveController::new(Cursor::new("lots\n"), Vec::new());
    let mut heuristic = HeuristicController::new();
    let err = play_pig(100, 20, &mut human, &mut heuristic, &mut dice).unwrap_err();
    assert!(matches!(err, PigError::InvalidInput(_)));
    Ok(())
}
