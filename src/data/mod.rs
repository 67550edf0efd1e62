//! External game data
//!
//! The level-description file parser and the gameplay configuration.

pub mod config;
pub mod loader;

pub use config::GameConfig;
pub use loader::{load_game, parse_game, LevelError};
