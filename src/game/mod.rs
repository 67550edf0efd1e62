//! Game module - turn resolution and win/loss state

pub mod model;

pub use model::{GameError, GameStatus, Model, MoveOutcome, MoveReport};
