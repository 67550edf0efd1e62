//! World module
//!
//! Positions, tiles, the maze grid, and levels built over it.

pub mod level;
pub mod maze;
pub mod position;
pub mod tile;

pub use level::{Level, LevelRowError};
pub use maze::{Maze, MazeError};
pub use position::{Direction, Position};
pub use tile::Tile;
