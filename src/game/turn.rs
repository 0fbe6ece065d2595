//! Turn resolution: dice count plus opponent score to points gained

use crate::core::{DiceCount, Score};
use crate::game::dice::{roll_dice, DiceSource};

/// Points for rolling zero dice: one more than the larger digit of the
/// opponent's score
///
/// The score splits into `score / 10` and `score % 10`, so scores of 100 and
/// above give a "tens" digit greater than 9.
pub fn zero_dice_gain(opponent_score: Score) -> Score {
    let tens = opponent_score / 10;
    let ones = opponent_score % 10;
    tens.max(ones) + 1
}

/// Resolve one turn
///
/// Zero dice never touch the dice source.
pub fn take_turn<D: DiceSource + ?Sized>(
    dice: &mut D,
    opponent_score: Score,
    num_dice: DiceCount,
) -> Score {
    if num_dice.is_zero() {
        zero_dice_gain(opponent_score)
    } else {
        roll_dice(dice, num_dice)
    }
}
