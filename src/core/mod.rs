//! Core game types

pub mod player;
pub mod types;

pub use player::Player;
pub use types::{DiceCount, Score, BUST_FACE, DIE_FACES, MAX_TURN_GAIN};
