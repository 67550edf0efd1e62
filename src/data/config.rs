//! Game configuration
//!
//! Tunable gameplay numbers, loadable from an external RON file with
//! hardcoded defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default location of the config override file
pub const CONFIG_PATH: &str = "assets/config.ron";

/// Every tunable gameplay number in one place
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Health ceiling; the player starts full and dies at 0
    pub max_health: i32,
    /// Hunger ceiling; reaching it loses the game
    pub max_hunger: i32,
    /// Thirst ceiling; reaching it loses the game
    pub max_thirst: i32,
    /// Health paid for every committed move
    pub move_health_cost: i32,
    /// Hunger and thirst tick up by one every this many moves
    pub need_interval: u32,
    /// Health restored by a potion
    pub potion_heal: i32,
    /// Thirst removed by water
    pub water_restore: i32,
    /// Hunger removed by an apple
    pub apple_restore: i32,
    /// Hunger removed by honey
    pub honey_restore: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_health: 100,
            max_hunger: 10,
            max_thirst: 10,
            move_health_cost: 1,
            need_interval: 5,
            potion_heal: 20,
            water_restore: 5,
            apple_restore: 1,
            honey_restore: 5,
        }
    }
}

impl GameConfig {
    /// Load the config from `assets/config.ron`, falling back to defaults.
    /// A missing file is normal; a malformed one logs a warning.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match ron::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("failed to parse {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("failed to read {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.max_health, 100);
        assert_eq!(config.max_hunger, 10);
        assert_eq!(config.max_thirst, 10);
        assert_eq!(config.need_interval, 5);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_from(Path::new("no/such/config.ron"));
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_ron_overrides_only_named_fields() {
        let config: GameConfig = ron::from_str("(max_health: 50)").unwrap();
        assert_eq!(config.max_health, 50);
        assert_eq!(config.max_hunger, GameConfig::default().max_hunger);
    }
}
