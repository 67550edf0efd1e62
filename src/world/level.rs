//! Level data structure
//!
//! One maze plus the player start and the items still lying on its floor.

use std::collections::HashMap;

use thiserror::Error;

use crate::items::{Item, ItemKind};

use super::maze::{Maze, MazeError};
use super::position::Position;
use super::tile::Tile;

/// Player start marker in level files
pub const START_SYMBOL: char = 'P';

/// Rejected content within a single grid row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelRowError {
    #[error("unknown symbol {symbol:?}")]
    UnknownSymbol { symbol: char },
    #[error("more than one player start")]
    DuplicatePlayerStart,
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// A single playable level. The grid holds only tiles; items live in a
/// position-keyed map, so there is no second symbol grid to keep in sync.
#[derive(Debug, Clone)]
pub struct Level {
    maze: Maze,
    player_start: Option<Position>,
    items: HashMap<Position, Item>,
    total_coins: usize,
}

impl Level {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            maze: Maze::new(rows, cols),
            player_start: None,
            items: HashMap::new(),
            total_coins: 0,
        }
    }

    /// Parse one grid row. Item symbols become empty floor plus an entry in
    /// the item map; the start marker becomes empty floor plus the player
    /// start. Parse-time only.
    pub fn add_row(&mut self, line: &str) -> Result<(), LevelRowError> {
        let row = self.maze.appended_rows() as i32;
        let mut tiles = Vec::with_capacity(self.maze.cols());

        for (col, symbol) in line.chars().enumerate() {
            let position = Position::new(row, col as i32);
            if let Some(tile) = Tile::from_symbol(symbol) {
                tiles.push(tile);
            } else if let Some(kind) = ItemKind::from_symbol(symbol) {
                self.add_item(Item::new(kind, position));
                tiles.push(Tile::Empty);
            } else if symbol == START_SYMBOL {
                if self.player_start.is_some() {
                    return Err(LevelRowError::DuplicatePlayerStart);
                }
                self.player_start = Some(position);
                tiles.push(Tile::Empty);
            } else {
                return Err(LevelRowError::UnknownSymbol { symbol });
            }
        }

        self.maze.push_row(tiles)?;
        Ok(())
    }

    /// Record an uncollected item. Parse-time only.
    pub fn add_item(&mut self, item: Item) {
        if item.kind == ItemKind::Coin {
            self.total_coins += 1;
        }
        self.items.insert(item.position, item);
    }

    /// Unlock every door once no uncollected coin remains. Returns whether
    /// the doors are open after the check; a level without coins unlocks on
    /// the first call.
    pub fn attempt_unlock_doors(&mut self) -> bool {
        if self.remaining_coins() > 0 {
            return false;
        }
        self.maze.unlock_doors();
        true
    }

    /// Coins still lying on the floor
    pub fn remaining_coins(&self) -> usize {
        self.items
            .values()
            .filter(|item| item.kind == ItemKind::Coin)
            .count()
    }

    /// Coins the level started with
    pub fn total_coins(&self) -> usize {
        self.total_coins
    }

    pub fn item_at(&self, position: Position) -> Option<&Item> {
        self.items.get(&position)
    }

    /// Take the item at a position out of the level, `None` when absent.
    pub fn remove_item(&mut self, position: Position) -> Option<Item> {
        self.items.remove(&position)
    }

    /// Put an item back on the floor. Refused when another uncollected item
    /// already occupies the position.
    pub fn place_item(&mut self, item: Item) -> bool {
        if self.items.contains_key(&item.position) {
            return false;
        }
        self.items.insert(item.position, item);
        true
    }

    pub fn items(&self) -> &HashMap<Position, Item> {
        &self.items
    }

    pub fn player_start(&self) -> Option<Position> {
        self.player_start
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn maze_mut(&mut self) -> &mut Maze {
        &mut self.maze
    }

    /// Glyph rows of the maze with uncollected items overlaid
    pub fn render_rows(&self) -> Vec<String> {
        let mut rows: Vec<Vec<char>> = self
            .maze
            .render()
            .lines()
            .map(|line| line.chars().collect())
            .collect();
        for item in self.items.values() {
            let (row, col) = (item.position.row as usize, item.position.col as usize);
            if let Some(cell) = rows.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = item.kind.glyph();
            }
        }
        rows.into_iter().map(|r| r.into_iter().collect()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_from_rows(rows: usize, cols: usize, lines: &[&str]) -> Level {
        let mut level = Level::new(rows, cols);
        for line in lines {
            level.add_row(line).unwrap();
        }
        level
    }

    #[test]
    fn test_add_row_routes_symbols() {
        let level = level_from_rows(3, 5, &["#####", "#PC M", "#####"]);

        assert_eq!(level.player_start(), Some(Position::new(1, 1)));
        assert_eq!(
            level.item_at(Position::new(1, 2)).map(|i| i.kind),
            Some(ItemKind::Coin)
        );
        assert_eq!(
            level.item_at(Position::new(1, 4)).map(|i| i.kind),
            Some(ItemKind::Water)
        );
        // Item cells hold plain floor underneath
        assert_eq!(level.maze().tile(Position::new(1, 2)), Some(&Tile::Empty));
        assert_eq!(level.maze().tile(Position::new(1, 1)), Some(&Tile::Empty));
        assert!(level.maze().is_complete());
    }

    #[test]
    fn test_add_row_rejects_unknown_symbol() {
        let mut level = Level::new(1, 3);
        assert_eq!(
            level.add_row("#x#"),
            Err(LevelRowError::UnknownSymbol { symbol: 'x' })
        );
    }

    #[test]
    fn test_add_row_rejects_second_start() {
        let mut level = Level::new(1, 4);
        assert_eq!(
            level.add_row("#PP#"),
            Err(LevelRowError::DuplicatePlayerStart)
        );
    }

    #[test]
    fn test_add_row_propagates_dimension_errors() {
        let mut level = Level::new(1, 3);
        assert!(matches!(
            level.add_row("##"),
            Err(LevelRowError::Maze(MazeError::WrongRowWidth { .. }))
        ));
    }

    #[test]
    fn test_coin_gate_blocks_until_collected() {
        let mut level = level_from_rows(1, 4, &["DPC "]);
        assert_eq!(level.total_coins(), 1);

        assert!(!level.attempt_unlock_doors());
        assert!(level.maze().is_blocking(Position::new(0, 0)));

        level.remove_item(Position::new(0, 2)).unwrap();
        assert!(level.attempt_unlock_doors());
        assert!(!level.maze().is_blocking(Position::new(0, 0)));
    }

    #[test]
    fn test_zero_coin_level_unlocks_immediately() {
        let mut level = level_from_rows(1, 3, &["DP "]);
        assert!(level.attempt_unlock_doors());
        assert!(!level.maze().is_blocking(Position::new(0, 0)));
    }

    #[test]
    fn test_remove_item_absent_is_none() {
        let mut level = level_from_rows(1, 3, &[" P "]);
        assert_eq!(level.remove_item(Position::new(0, 0)), None);
    }

    #[test]
    fn test_place_item_refuses_occupied_position() {
        let mut level = level_from_rows(1, 4, &[" PC "]);
        let occupied = Position::new(0, 2);
        assert!(!level.place_item(Item::new(ItemKind::Apple, occupied)));

        let free = Position::new(0, 3);
        assert!(level.place_item(Item::new(ItemKind::Apple, free)));
        assert_eq!(level.item_at(free).map(|i| i.kind), Some(ItemKind::Apple));
    }

    #[test]
    fn test_render_rows_overlays_items() {
        let level = level_from_rows(1, 4, &["#PC "]);
        assert_eq!(level.render_rows(), vec!["# C ".to_string()]);
    }
}
