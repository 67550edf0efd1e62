//! Main UI application
//!
//! Renders the game with ratatui and turns key presses into model calls.
//! All mutation of game state goes through the Model's API.

use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

use crate::data::load_game;
use crate::entities::PLAYER_GLYPH;
use crate::game::{GameStatus, Model, MoveOutcome};
use crate::items::ItemKind;
use crate::world::Direction;

/// How many log entries are kept
const MESSAGE_CAP: usize = 100;

/// Categories for message coloring
#[derive(Debug, Clone, Copy, PartialEq)]
enum MessageCategory {
    Info,
    Item,
    Warning,
}

/// One line of the message log
#[derive(Debug, Clone)]
struct GameMessage {
    text: String,
    category: MessageCategory,
}

/// Main UI application
pub struct App {
    /// Game file the current run was loaded from, for restarts
    game_file: PathBuf,
    /// Cursor into the grouped inventory view
    inventory_cursor: usize,
    /// Message log, newest last
    messages: Vec<GameMessage>,
}

impl App {
    pub fn new(game_file: PathBuf) -> Self {
        let mut app = Self {
            game_file,
            inventory_cursor: 0,
            messages: Vec::new(),
        };
        app.push_message("You wake in a maze. Find the door out.", MessageCategory::Info);
        app
    }

    fn push_message(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            category,
        });
        if self.messages.len() > MESSAGE_CAP {
            self.messages.remove(0);
        }
    }

    /// Handle one key press. Returns `Ok(true)` when the game should quit.
    pub fn handle_input(&mut self, key: KeyEvent, model: &mut Model) -> Result<bool> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('r') => {
                self.restart(model)?;
                return Ok(false);
            }
            _ => {}
        }

        if model.status() != GameStatus::Playing {
            return Ok(false);
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') => self.try_move(model, Direction::Up),
            KeyCode::Down | KeyCode::Char('s') => self.try_move(model, Direction::Down),
            KeyCode::Left | KeyCode::Char('a') => self.try_move(model, Direction::Left),
            KeyCode::Right | KeyCode::Char('d') => self.try_move(model, Direction::Right),
            KeyCode::Tab => self.advance_inventory_cursor(model),
            KeyCode::Char('u') => self.use_selected(model),
            KeyCode::Char('x') => self.drop_selected(model),
            _ => {}
        }
        Ok(false)
    }

    fn restart(&mut self, model: &mut Model) -> Result<()> {
        let config = model.config().clone();
        let levels = load_game(&self.game_file)?;
        *model = Model::new(levels, config)?;
        self.inventory_cursor = 0;
        self.messages.clear();
        self.push_message("You steel yourself and start over.", MessageCategory::Info);
        log::info!("run restarted from {}", self.game_file.display());
        Ok(())
    }

    fn try_move(&mut self, model: &mut Model, direction: Direction) {
        match model.move_player(direction) {
            MoveOutcome::Blocked => {
                self.push_message("Something blocks the way.", MessageCategory::Warning);
            }
            MoveOutcome::GameOver => {}
            MoveOutcome::Moved(report) => {
                if report.tile_damage > 0 {
                    self.push_message(
                        format!("Lava sears you for {} damage!", report.tile_damage),
                        MessageCategory::Warning,
                    );
                }
                if let Some(kind) = report.collected {
                    self.push_message(
                        format!("You pick up a {}.", kind.name()),
                        MessageCategory::Item,
                    );
                }
                if report.doors_unlocked {
                    self.push_message(
                        "The last coin! Every door clicks open.",
                        MessageCategory::Info,
                    );
                }
                if report.level_completed && model.status() == GameStatus::Playing {
                    self.push_message(
                        format!("You slip through the door into maze {}.", model.level_number()),
                        MessageCategory::Info,
                    );
                }
            }
        }
        self.clamp_inventory_cursor(model);
    }

    fn advance_inventory_cursor(&mut self, model: &Model) {
        let len = model.player().inventory().grouped().len();
        if len > 0 {
            self.inventory_cursor = (self.inventory_cursor + 1) % len;
        }
    }

    fn selected_kind(&self, model: &Model) -> Option<ItemKind> {
        model
            .player()
            .inventory()
            .grouped()
            .get(self.inventory_cursor)
            .map(|(kind, _)| *kind)
    }

    fn use_selected(&mut self, model: &mut Model) {
        let Some(kind) = self.selected_kind(model) else {
            self.push_message("Nothing to use.", MessageCategory::Warning);
            return;
        };
        match model.use_item(kind) {
            Ok(()) => {
                let text = match kind {
                    ItemKind::Potion => "You drink the potion. Warmth returns.".to_string(),
                    ItemKind::Water => "You gulp down the water.".to_string(),
                    ItemKind::Apple => "You eat the apple.".to_string(),
                    ItemKind::Honey => "You devour the honey.".to_string(),
                    ItemKind::Coin => "You turn the coin over. Nothing happens.".to_string(),
                };
                self.push_message(text, MessageCategory::Item);
            }
            Err(e) => self.push_message(e.to_string(), MessageCategory::Warning),
        }
        self.clamp_inventory_cursor(model);
    }

    fn drop_selected(&mut self, model: &mut Model) {
        let Some(kind) = self.selected_kind(model) else {
            self.push_message("Nothing to drop.", MessageCategory::Warning);
            return;
        };
        match model.drop_item(kind) {
            Ok(()) => {
                self.push_message(
                    format!("You set the {} down.", kind.name()),
                    MessageCategory::Item,
                );
            }
            Err(e) => self.push_message(e.to_string(), MessageCategory::Warning),
        }
        self.clamp_inventory_cursor(model);
    }

    fn clamp_inventory_cursor(&mut self, model: &Model) {
        let len = model.player().inventory().grouped().len();
        self.inventory_cursor = self.inventory_cursor.min(len.saturating_sub(1));
    }

    pub fn render(&self, frame: &mut Frame, model: &Model) {
        frame.render_widget(Clear, frame.area());
        match model.status() {
            GameStatus::Playing => self.render_playing(frame, model),
            GameStatus::Won => self.render_end(frame, model, true),
            GameStatus::Lost => self.render_end(frame, model, false),
        }
    }

    fn render_playing(&self, frame: &mut Frame, model: &Model) {
        let columns = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(34)])
            .split(frame.area());

        self.render_maze(frame, model, columns[0]);

        let sidebar = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(11),
                Constraint::Min(5),
                Constraint::Length(8),
                Constraint::Length(3),
            ])
            .split(columns[1]);

        self.render_stats(frame, model, sidebar[0]);
        self.render_inventory(frame, model, sidebar[1]);
        self.render_messages(frame, sidebar[2]);
        self.render_help(frame, sidebar[3]);
    }

    fn render_maze(&self, frame: &mut Frame, model: &Model, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(
                " Maze {}/{} ",
                model.level_number(),
                model.total_levels()
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let maze = model.current_level().maze();
        let player_pos = model.player().position();

        for row in 0..maze.rows().min(inner.height as usize) {
            for col in 0..maze.cols().min(inner.width as usize) {
                let position = crate::world::Position::new(row as i32, col as i32);
                let cell_x = inner.x + col as u16;
                let cell_y = inner.y + row as u16;

                let (glyph, fg) = if position == player_pos {
                    (PLAYER_GLYPH, (255, 255, 200))
                } else if let Some(item) = model.current_level().item_at(position) {
                    (item.kind.glyph(), item.kind.fg_color())
                } else if let Some(tile) = maze.tile(position) {
                    (tile.glyph(), tile.fg_color())
                } else {
                    continue;
                };

                let buf = frame.buffer_mut();
                buf[(cell_x, cell_y)].set_char(glyph);
                buf[(cell_x, cell_y)].set_fg(Color::Rgb(fg.0, fg.1, fg.2));
            }
        }
    }

    fn render_stats(&self, frame: &mut Frame, model: &Model, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Player ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let player = model.player();
        frame.render_widget(
            stat_gauge("HP", player.health(), player.max_health(), Color::Green, false),
            rows[0],
        );
        frame.render_widget(
            stat_gauge("Hunger", player.hunger(), player.max_hunger(), Color::Yellow, true),
            rows[1],
        );
        frame.render_widget(
            stat_gauge("Thirst", player.thirst(), player.max_thirst(), Color::Cyan, true),
            rows[2],
        );

        let level = model.current_level();
        // Dropped coins from earlier levels can leave more on the floor
        // than this level started with
        let collected = level.total_coins().saturating_sub(level.remaining_coins());
        let lines = [
            format!("Moves: {}", model.moves_made()),
            format!("Coins: {}/{}", collected, level.total_coins()),
            format!("Levels done: {}", model.levels_completed()),
        ];
        for (i, text) in lines.iter().enumerate() {
            frame.render_widget(Paragraph::new(text.as_str()), rows[3 + i]);
        }
    }

    fn render_inventory(&self, frame: &mut Frame, model: &Model, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Inventory ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let grouped = model.player().inventory().grouped();
        if grouped.is_empty() {
            frame.render_widget(
                Paragraph::new("(empty)").style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let lines: Vec<Line> = grouped
            .iter()
            .enumerate()
            .map(|(i, (kind, count))| {
                let fg = kind.fg_color();
                let mut style = Style::default().fg(Color::Rgb(fg.0, fg.1, fg.2));
                let marker = if i == self.inventory_cursor {
                    style = style.add_modifier(Modifier::BOLD);
                    "> "
                } else {
                    "  "
                };
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(format!("{}: {}", kind.name(), count), style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Log ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = inner.height as usize;
        let lines: Vec<Line> = self
            .messages
            .iter()
            .rev()
            .take(visible)
            .rev()
            .map(|message| {
                let color = match message.category {
                    MessageCategory::Info => Color::Gray,
                    MessageCategory::Item => Color::Green,
                    MessageCategory::Warning => Color::Red,
                };
                Line::from(Span::styled(
                    message.text.clone(),
                    Style::default().fg(color),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let help = Paragraph::new("move: arrows  u: use  x: drop  q: quit")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, area);
    }

    fn render_end(&self, frame: &mut Frame, model: &Model, won: bool) {
        let area = centered_rect(46, 9, frame.area());
        let (title, headline, color) = if won {
            (" Victory ", "You escape the final maze!", Color::Green)
        } else {
            (" Defeat ", "The maze claims you.", Color::Red)
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Levels completed: {}/{}",
                model.levels_completed(),
                model.total_levels()
            )),
            Line::from(format!("Moves made: {}", model.moves_made())),
            Line::from(""),
            Line::from(Span::styled(
                "r: restart   q: quit",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let popup = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

/// A one-line labeled gauge. Need counters fill up as they worsen, so their
/// bar runs red as it grows; health runs red as it empties.
fn stat_gauge(label: &str, value: i32, max: i32, color: Color, need: bool) -> Gauge<'_> {
    let ratio = if max > 0 {
        f64::from(value.clamp(0, max)) / f64::from(max)
    } else {
        0.0
    };
    let danger = if need { ratio > 0.7 } else { ratio < 0.3 };
    let style = if danger {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(color)
    };
    Gauge::default()
        .gauge_style(style)
        .ratio(ratio)
        .label(format!("{} {}/{}", label, value, max))
}

/// Center a fixed-size popup in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
