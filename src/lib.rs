//! Mazebound - a turn-based terminal maze survival game
//!
//! Guide the player through grid mazes, manage health, hunger and thirst,
//! collect every coin to open the doors, and escape each level in turn.

pub mod data;
pub mod entities;
pub mod game;
pub mod items;
pub mod ui;
pub mod world;

// Re-export commonly used types
pub use game::{GameStatus, Model};
pub use world::{Direction, Level, Maze, Position, Tile};
