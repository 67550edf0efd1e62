//! Maze data structure
//!
//! The 2D tile grid for one level, stored as a flat vector.

use thiserror::Error;

use super::position::Position;
use super::tile::Tile;

/// Violations of the maze's declared dimensions during construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("maze already has its declared {declared} rows")]
    TooManyRows { declared: usize },
    #[error("row has {found} tiles, expected {expected}")]
    WrongRowWidth { expected: usize, found: usize },
}

/// The tile grid of a single level
#[derive(Debug, Clone)]
pub struct Maze {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Maze {
    /// Create an empty maze with declared dimensions. Rows are appended
    /// while the level file is parsed.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            tiles: Vec::with_capacity(rows * cols),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows appended so far
    pub fn appended_rows(&self) -> usize {
        self.tiles.len() / self.cols.max(1)
    }

    /// Whether every declared row has been appended
    pub fn is_complete(&self) -> bool {
        self.tiles.len() == self.rows * self.cols
    }

    /// Append the next row of tiles, enforcing the declared dimensions.
    pub fn push_row(&mut self, row: Vec<Tile>) -> Result<(), MazeError> {
        if self.appended_rows() >= self.rows {
            return Err(MazeError::TooManyRows { declared: self.rows });
        }
        if row.len() != self.cols {
            return Err(MazeError::WrongRowWidth {
                expected: self.cols,
                found: row.len(),
            });
        }
        self.tiles.extend(row);
        Ok(())
    }

    #[inline]
    fn idx(&self, position: Position) -> usize {
        position.row as usize * self.cols + position.col as usize
    }

    #[inline]
    pub fn in_bounds(&self, position: Position) -> bool {
        position.row >= 0
            && (position.row as usize) < self.rows
            && position.col >= 0
            && (position.col as usize) < self.cols
    }

    /// Tile at a position, `None` when out of bounds. Callers treat absent
    /// tiles as implicit walls.
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        if self.in_bounds(position) {
            self.tiles.get(self.idx(position))
        } else {
            None
        }
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        if self.in_bounds(position) {
            let idx = self.idx(position);
            self.tiles.get_mut(idx)
        } else {
            None
        }
    }

    /// Whether the position can be entered. Out-of-bounds counts as blocked.
    pub fn is_blocking(&self, position: Position) -> bool {
        self.tile(position).map_or(true, |t| t.is_blocking())
    }

    /// Open every door in the grid. Side effect only.
    pub fn unlock_doors(&mut self) {
        for tile in &mut self.tiles {
            tile.unlock();
        }
    }

    /// Whether any locked door remains
    pub fn has_locked_door(&self) -> bool {
        self.tiles
            .iter()
            .any(|t| matches!(t, Tile::Door { locked: true }))
    }

    /// Glyph rendering of the bare grid, rows newline-joined. Diagnostics
    /// only; the front-end renders cell by cell with items overlaid.
    pub fn render(&self) -> String {
        self.tiles
            .chunks(self.cols)
            .map(|row| row.iter().map(Tile::glyph).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze_3x3() -> Maze {
        let mut maze = Maze::new(3, 3);
        maze.push_row(vec![Tile::Wall, Tile::Wall, Tile::Wall]).unwrap();
        maze.push_row(vec![Tile::door(), Tile::Empty, Tile::Lava]).unwrap();
        maze.push_row(vec![Tile::Wall, Tile::Wall, Tile::Wall]).unwrap();
        maze
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut maze = Maze::new(2, 3);
        let err = maze.push_row(vec![Tile::Wall, Tile::Wall]).unwrap_err();
        assert_eq!(err, MazeError::WrongRowWidth { expected: 3, found: 2 });
    }

    #[test]
    fn test_push_row_rejects_excess_rows() {
        let mut maze = Maze::new(1, 1);
        maze.push_row(vec![Tile::Wall]).unwrap();
        assert!(maze.is_complete());
        let err = maze.push_row(vec![Tile::Wall]).unwrap_err();
        assert_eq!(err, MazeError::TooManyRows { declared: 1 });
    }

    #[test]
    fn test_tile_lookup_and_bounds() {
        let maze = maze_3x3();
        assert_eq!(maze.tile(Position::new(1, 2)), Some(&Tile::Lava));
        assert_eq!(maze.tile(Position::new(-1, 0)), None);
        assert_eq!(maze.tile(Position::new(0, 3)), None);
        assert_eq!(maze.tile(Position::new(3, 0)), None);
    }

    #[test]
    fn test_out_of_bounds_is_blocking() {
        let maze = maze_3x3();
        assert!(maze.is_blocking(Position::new(-1, -1)));
        assert!(maze.is_blocking(Position::new(0, 0)));
        assert!(!maze.is_blocking(Position::new(1, 1)));
    }

    #[test]
    fn test_unlock_doors_sweeps_the_grid() {
        let mut maze = maze_3x3();
        assert!(maze.has_locked_door());
        assert!(maze.is_blocking(Position::new(1, 0)));

        maze.unlock_doors();
        assert!(!maze.has_locked_door());
        assert!(!maze.is_blocking(Position::new(1, 0)));
        // Still a door, just open
        assert!(maze.tile(Position::new(1, 0)).unwrap().is_door());
    }

    #[test]
    fn test_render_joins_rows() {
        let maze = maze_3x3();
        assert_eq!(maze.render(), "###\nD L\n###");
    }
}
