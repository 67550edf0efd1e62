//! Entities

pub mod player;

pub use player::{Player, PLAYER_GLYPH};
