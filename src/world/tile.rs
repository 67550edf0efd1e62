//! Tile definitions
//!
//! The floor kinds a maze cell can hold and their properties.

use serde::{Deserialize, Serialize};

/// Damage taken when standing on lava
pub const LAVA_DAMAGE: i32 = 5;

/// A single cell of maze floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Empty,
    Lava,
    /// Doors start locked and flip open exactly once
    Door { locked: bool },
}

impl Tile {
    /// A freshly parsed, locked door
    pub fn door() -> Self {
        Tile::Door { locked: true }
    }

    /// Whether the tile rejects player entry
    pub fn is_blocking(&self) -> bool {
        match self {
            Tile::Wall => true,
            Tile::Door { locked } => *locked,
            Tile::Empty | Tile::Lava => false,
        }
    }

    /// Health lost on entering the tile, on top of the move cost
    pub fn damage(&self) -> i32 {
        match self {
            Tile::Lava => LAVA_DAMAGE,
            _ => 0,
        }
    }

    /// Open a locked door. One-way, idempotent, no-op for other tiles.
    pub fn unlock(&mut self) {
        if let Tile::Door { locked } = self {
            *locked = false;
        }
    }

    pub fn is_door(&self) -> bool {
        matches!(self, Tile::Door { .. })
    }

    /// Parse a tile symbol from a level file. Item and player symbols are
    /// handled a layer up; anything outside the tile alphabet is `None`.
    pub fn from_symbol(symbol: char) -> Option<Tile> {
        match symbol {
            '#' => Some(Tile::Wall),
            ' ' => Some(Tile::Empty),
            'L' => Some(Tile::Lava),
            'D' => Some(Tile::door()),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Empty => ' ',
            Tile::Lava => 'L',
            Tile::Door { locked: true } => 'D',
            Tile::Door { locked: false } => ' ',
        }
    }

    /// Display color RGB for the front-end
    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            Tile::Wall => (130, 110, 90),
            Tile::Empty => (80, 80, 80),
            Tile::Lava => (255, 100, 0),
            Tile::Door { locked: true } => (139, 90, 43),
            Tile::Door { locked: false } => (80, 80, 80),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_table() {
        assert!(Tile::Wall.is_blocking());
        assert!(!Tile::Empty.is_blocking());
        assert!(!Tile::Lava.is_blocking());
        assert!(Tile::door().is_blocking());

        assert_eq!(Tile::Wall.damage(), 0);
        assert_eq!(Tile::Empty.damage(), 0);
        assert_eq!(Tile::Lava.damage(), LAVA_DAMAGE);
        assert_eq!(Tile::door().damage(), 0);

        assert_eq!(Tile::Wall.glyph(), '#');
        assert_eq!(Tile::Empty.glyph(), ' ');
        assert_eq!(Tile::Lava.glyph(), 'L');
        assert_eq!(Tile::door().glyph(), 'D');
    }

    #[test]
    fn test_unlock_is_one_way_and_idempotent() {
        let mut door = Tile::door();
        door.unlock();
        assert!(!door.is_blocking());
        assert_eq!(door.glyph(), ' ');
        assert!(door.is_door());

        // A second unlock changes nothing
        door.unlock();
        assert!(!door.is_blocking());
        assert_eq!(door.glyph(), ' ');
    }

    #[test]
    fn test_unlock_ignores_other_tiles() {
        let mut wall = Tile::Wall;
        wall.unlock();
        assert!(wall.is_blocking());
    }

    #[test]
    fn test_symbol_mapping() {
        assert_eq!(Tile::from_symbol('#'), Some(Tile::Wall));
        assert_eq!(Tile::from_symbol(' '), Some(Tile::Empty));
        assert_eq!(Tile::from_symbol('L'), Some(Tile::Lava));
        assert_eq!(Tile::from_symbol('D'), Some(Tile::door()));
        assert_eq!(Tile::from_symbol('?'), None);
        // Item symbols are not tiles
        assert_eq!(Tile::from_symbol('C'), None);
    }
}
