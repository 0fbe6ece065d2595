//! Scores and dice counts

use crate::{PigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's accumulated score, or the points gained in one turn
pub type Score = u32;

/// Number of faces on each die
pub const DIE_FACES: u8 = 6;

/// The face that busts a turn
pub const BUST_FACE: u8 = 1;

/// Largest single-turn gain: ten dice, all showing six
pub const MAX_TURN_GAIN: Score = DiceCount::MAX.0 as Score * DIE_FACES as Score;

/// Number of dice a player chooses to roll on one turn, always in [0, 10]
///
/// Zero is special: no dice are rolled and the gain is derived from the
/// opponent's score digits instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DiceCount(u8);

impl DiceCount {
    pub const ZERO: DiceCount = DiceCount(0);
    pub const MAX: DiceCount = DiceCount(10);

    /// Validate a raw dice count
    pub fn new(count: u8) -> Result<Self> {
        if count <= Self::MAX.0 {
            Ok(DiceCount(count))
        } else {
            Err(PigError::DiceCountOutOfRange(count))
        }
    }

    /// Clamp a raw count into range
    pub const fn saturating(count: u8) -> Self {
        if count > Self::MAX.0 {
            Self::MAX
        } else {
            DiceCount(count)
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Every count that actually rolls dice, in increasing order (1..=10)
    pub fn rolling() -> impl Iterator<Item = DiceCount> {
        (1..=Self::MAX.0).map(DiceCount)
    }
}

impl TryFrom<u8> for DiceCount {
    type Error = PigError;

    fn try_from(count: u8) -> Result<Self> {
        DiceCount::new(count)
    }
}

impl From<DiceCount> for u8 {
    fn from(count: DiceCount) -> u8 {
        count.0
    }
}

impl fmt::Display for DiceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
