//! Item definitions
//!
//! The pickups that can sit on maze floor, and their effects on the player.

use serde::{Deserialize, Serialize};

use crate::data::GameConfig;
use crate::entities::Player;
use crate::world::Position;

/// The closed set of item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores health
    Potion,
    /// Quenches thirst
    Water,
    /// Small hunger restore
    Apple,
    /// Large hunger restore
    Honey,
    /// No effect on use; all of a level's coins must be collected before
    /// its doors open
    Coin,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Potion,
        ItemKind::Water,
        ItemKind::Apple,
        ItemKind::Honey,
        ItemKind::Coin,
    ];

    /// Parse an item symbol from a level file
    pub fn from_symbol(symbol: char) -> Option<ItemKind> {
        match symbol {
            'U' => Some(ItemKind::Potion),
            'M' => Some(ItemKind::Water),
            'A' => Some(ItemKind::Apple),
            'H' => Some(ItemKind::Honey),
            'C' => Some(ItemKind::Coin),
            _ => None,
        }
    }

    pub fn glyph(&self) -> char {
        match self {
            ItemKind::Potion => 'U',
            ItemKind::Water => 'M',
            ItemKind::Apple => 'A',
            ItemKind::Honey => 'H',
            ItemKind::Coin => 'C',
        }
    }

    /// Display name, also the inventory grouping key
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Potion => "Potion",
            ItemKind::Water => "Water",
            ItemKind::Apple => "Apple",
            ItemKind::Honey => "Honey",
            ItemKind::Coin => "Coin",
        }
    }

    /// Display color RGB for the front-end
    pub fn fg_color(&self) -> (u8, u8, u8) {
        match self {
            ItemKind::Potion => (200, 100, 255),
            ItemKind::Water => (100, 150, 255),
            ItemKind::Apple => (100, 255, 100),
            ItemKind::Honey => (255, 180, 50),
            ItemKind::Coin => (255, 215, 0),
        }
    }

    /// Apply the item's effect to the player. Coins have none.
    pub fn apply(&self, player: &mut Player, config: &GameConfig) {
        match self {
            ItemKind::Potion => player.change_health(config.potion_heal),
            ItemKind::Water => player.change_thirst(-config.water_restore),
            ItemKind::Apple => player.change_hunger(-config.apple_restore),
            ItemKind::Honey => player.change_hunger(-config.honey_restore),
            ItemKind::Coin => {}
        }
    }
}

/// An item instance placed in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub position: Position,
}

impl Item {
    pub fn new(kind: ItemKind, position: Position) -> Self {
        Self { kind, position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip() {
        for kind in ItemKind::ALL {
            assert_eq!(ItemKind::from_symbol(kind.glyph()), Some(kind));
        }
        assert_eq!(ItemKind::from_symbol('#'), None);
        assert_eq!(ItemKind::from_symbol('P'), None);
    }

    #[test]
    fn test_apply_effects() {
        let config = GameConfig::default();
        let mut player = Player::new(Position::new(0, 0), &config);
        player.change_health(-50);
        player.change_hunger(8);
        player.change_thirst(8);

        ItemKind::Potion.apply(&mut player, &config);
        assert_eq!(player.health(), 50 + config.potion_heal);

        ItemKind::Water.apply(&mut player, &config);
        assert_eq!(player.thirst(), 8 - config.water_restore);

        ItemKind::Apple.apply(&mut player, &config);
        assert_eq!(player.hunger(), 8 - config.apple_restore);

        ItemKind::Honey.apply(&mut player, &config);
        assert_eq!(player.hunger(), 8 - config.apple_restore - config.honey_restore);
    }

    #[test]
    fn test_coin_has_no_stat_effect() {
        let config = GameConfig::default();
        let mut player = Player::new(Position::new(0, 0), &config);
        let before = (player.health(), player.hunger(), player.thirst());
        ItemKind::Coin.apply(&mut player, &config);
        assert_eq!(before, (player.health(), player.hunger(), player.thirst()));
    }
}
