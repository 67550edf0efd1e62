//! Game model
//!
//! Owns the level sequence and the player, and resolves the game one
//! discrete move at a time.

use thiserror::Error;

use crate::data::GameConfig;
use crate::entities::{Player, PLAYER_GLYPH};
use crate::items::ItemKind;
use crate::world::{Direction, Level};

/// Overall game state. Terminal states accept no further moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Failures of player-initiated item operations. These are ordinary
/// results, not fatal conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game has no levels to play")]
    NoLevels,
    #[error("no {kind:?} in inventory")]
    ItemNotFound { kind: ItemKind },
    #[error("an item already lies at the player's position")]
    TileOccupied,
    #[error("the game is over")]
    GameOver,
}

/// What a committed move did, for the front-end to narrate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveReport {
    /// Extra health lost to the tile stepped on (lava)
    pub tile_damage: i32,
    /// Item picked up at the new position
    pub collected: Option<ItemKind>,
    /// Whether this move's pickup opened the level's doors
    pub doors_unlocked: bool,
    /// Whether this move finished the current level
    pub level_completed: bool,
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move committed; the report says what happened
    Moved(MoveReport),
    /// Blocking tile or maze edge; nothing changed
    Blocked,
    /// The game is already won or lost; nothing changed
    GameOver,
}

/// The single mutator of player and level state
#[derive(Debug)]
pub struct Model {
    levels: Vec<Level>,
    current: usize,
    player: Player,
    moves_made: u32,
    levels_completed: usize,
    status: GameStatus,
    config: GameConfig,
}

impl Model {
    /// Build a model over loader-produced levels. The first level's
    /// zero-coin gate is evaluated immediately, so its doors may already be
    /// open before the first move.
    pub fn new(mut levels: Vec<Level>, config: GameConfig) -> Result<Self, GameError> {
        let start = levels
            .first()
            .and_then(|level| level.player_start())
            .ok_or(GameError::NoLevels)?;
        let player = Player::new(start, &config);
        levels[0].attempt_unlock_doors();
        Ok(Self {
            levels,
            current: 0,
            player,
            moves_made: 0,
            levels_completed: 0,
            status: GameStatus::Playing,
            config,
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn has_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn has_lost(&self) -> bool {
        self.status == GameStatus::Lost
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.current]
    }

    /// 1-based number of the level being played
    pub fn level_number(&self) -> usize {
        self.current + 1
    }

    pub fn total_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn levels_completed(&self) -> usize {
        self.levels_completed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Resolve one move request. A blocked move (including into the maze
    /// edge) mutates nothing at all; a committed move applies every effect
    /// atomically before win/loss is evaluated.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        if self.status != GameStatus::Playing {
            return MoveOutcome::GameOver;
        }

        let candidate = self.player.position().step(direction);
        let tile = match self.current_level().maze().tile(candidate) {
            Some(tile) if !tile.is_blocking() => *tile,
            // Out of bounds behaves as an implicit wall
            _ => return MoveOutcome::Blocked,
        };

        self.player.set_position(candidate);
        let tile_damage = tile.damage();
        if tile_damage > 0 {
            self.player.change_health(-tile_damage);
        }
        self.player.change_health(-self.config.move_health_cost);
        self.moves_made += 1;
        // A zero interval disables need accumulation entirely
        if self.config.need_interval > 0 && self.moves_made % self.config.need_interval == 0 {
            self.player.change_hunger(1);
            self.player.change_thirst(1);
        }

        let mut report = MoveReport {
            tile_damage,
            ..MoveReport::default()
        };

        let level = &mut self.levels[self.current];
        if let Some(item) = level.remove_item(candidate) {
            log::debug!("picked up {} at {:?}", item.kind.name(), candidate);
            report.collected = Some(item.kind);
            self.player.inventory_mut().add(item);
            let had_locked = level.maze().has_locked_door();
            let open = level.attempt_unlock_doors();
            report.doors_unlocked = had_locked && open;
        }

        // Standing on an open door finishes the level. A door can never be
        // entered while locked, so the tile lookup needs no refresh.
        if tile.is_door() {
            report.level_completed = true;
            self.levels_completed += 1;
            if self.current + 1 < self.levels.len() {
                self.current += 1;
                let next = &mut self.levels[self.current];
                next.attempt_unlock_doors();
                if let Some(start) = next.player_start() {
                    self.player.set_position(start);
                }
                log::info!("entered level {}/{}", self.current + 1, self.levels.len());
            }
        }

        self.evaluate_end();
        MoveOutcome::Moved(report)
    }

    /// Loss is checked before win: a move that exhausts a stat while
    /// finishing the last level still loses.
    fn evaluate_end(&mut self) {
        if self.player.is_dead() || self.player.is_starving() || self.player.is_parched() {
            self.status = GameStatus::Lost;
            log::info!("game lost after {} moves", self.moves_made);
        } else if self.levels_completed == self.levels.len() {
            self.status = GameStatus::Won;
            log::info!("game won after {} moves", self.moves_made);
        }
    }

    /// Consume one held item of `kind` and apply its effect.
    pub fn use_item(&mut self, kind: ItemKind) -> Result<(), GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameOver);
        }
        let item = self
            .player
            .inventory_mut()
            .remove(kind)
            .ok_or(GameError::ItemNotFound { kind })?;
        item.kind.apply(&mut self.player, &self.config);
        Ok(())
    }

    /// Return one held item of `kind` to the floor at the player's position.
    pub fn drop_item(&mut self, kind: ItemKind) -> Result<(), GameError> {
        if self.status != GameStatus::Playing {
            return Err(GameError::GameOver);
        }
        let position = self.player.position();
        if self.current_level().item_at(position).is_some() {
            return Err(GameError::TileOccupied);
        }
        let mut item = self
            .player
            .inventory_mut()
            .remove(kind)
            .ok_or(GameError::ItemNotFound { kind })?;
        item.position = position;
        self.levels[self.current].place_item(item);
        Ok(())
    }

    /// Glyph rows of the current level with items and the player overlaid
    pub fn render(&self) -> Vec<String> {
        let mut rows = self.current_level().render_rows();
        let position = self.player.position();
        let (row, col) = (position.row as usize, position.col as usize);
        if let Some(line) = rows.get_mut(row) {
            let mut cells: Vec<char> = line.chars().collect();
            if let Some(cell) = cells.get_mut(col) {
                *cell = PLAYER_GLYPH;
            }
            *line = cells.into_iter().collect();
        }
        rows
    }
}
