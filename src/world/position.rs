//! Grid positions and move directions
//!
//! Levels are addressed by (row, column), row 0 at the top.

use serde::{Deserialize, Serialize};

/// A (row, column) coordinate in a maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position displaced by (drow, dcol)
    pub fn offset(&self, drow: i32, dcol: i32) -> Position {
        Position::new(self.row + drow, self.col + dcol)
    }

    /// The position one step in `direction`
    pub fn step(&self, direction: Direction) -> Position {
        let (drow, dcol) = direction.delta();
        self.offset(drow, dcol)
    }
}

/// The four moves a player can make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit delta in (row, col) space
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_matches_delta() {
        let origin = Position::new(3, 4);
        assert_eq!(origin.step(Direction::Up), Position::new(2, 4));
        assert_eq!(origin.step(Direction::Down), Position::new(4, 4));
        assert_eq!(origin.step(Direction::Left), Position::new(3, 3));
        assert_eq!(origin.step(Direction::Right), Position::new(3, 5));
    }

    #[test]
    fn test_step_can_leave_the_grid() {
        // Negative coordinates are representable; the maze lookup is what
        // rejects them.
        assert_eq!(Position::new(0, 0).step(Direction::Up), Position::new(-1, 0));
    }
}
