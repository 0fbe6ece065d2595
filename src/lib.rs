//! Pig dice game simulator
//!
//! Simulates two-player games of Pig to compare strategies for how many
//! dice to roll each turn, and estimates expected turn scores and win
//! rates by Monte-Carlo sampling.

pub mod core;
pub mod error;
pub mod experiment;
pub mod game;

pub use error::{PigError, Result};
