//! Mazebound - Entry Point
//!
//! Initializes the terminal, loads the game file, and runs the input loop.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use mazebound::data::{load_game, GameConfig};
use mazebound::game::Model;
use mazebound::ui::App;

/// Played when no game file is given on the command line
const DEFAULT_GAME_FILE: &str = "assets/games/default.txt";

fn main() -> Result<()> {
    // Log to a file so the TUI stays clean
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("mazebound.log")
        .unwrap_or_else(|_| OpenOptions::new().write(true).open("/dev/null").unwrap());

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Mazebound v{}", env!("CARGO_PKG_VERSION"));

    let game_file = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GAME_FILE));

    let config = GameConfig::load();
    let levels = load_game(&game_file)
        .with_context(|| format!("loading game file {}", game_file.display()))?;
    let mut model = Model::new(levels, config)?;
    let mut app = App::new(game_file);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the game loop
    let result = run_game_loop(&mut terminal, &mut app, &mut model);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Mazebound shut down cleanly");
    result
}

/// Draw, wait for a key, resolve it. The game is turn-based, so there is
/// nothing to animate between key presses.
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    model: &mut Model,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            app.render(frame, model);
        })?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events, not releases
            if key.kind == KeyEventKind::Press {
                match app.handle_input(key, model) {
                    Ok(true) => break,
                    Ok(false) => {}
                    Err(e) => log::warn!("Input handling error: {}", e),
                }
            }
        }
    }

    Ok(())
}
