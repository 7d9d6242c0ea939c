//! Delvekeep - Entry Point
//!
//! Initializes the terminal, loads the hero and runs the input loop.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};

use delvekeep::config::{Args, Config};
use delvekeep::dice::{Dice, StdDice};
use delvekeep::game::{Game, GameState};
use delvekeep::save::{self, JsonFileStore, MemoryStore, PlayerStore};
use delvekeep::ui::{self, App, InputAction};

/// Encounter banner flash
const BANNER_FRAMES: usize = 4;
const BANNER_FRAME_TIME: Duration = Duration::from_millis(150);

fn main() -> Result<()> {
    let config = Config::from_args(Args::parse());

    // Initialize logging to file (to avoid interfering with TUI)
    let log_target: Box<dyn Write + Send> = match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.log_path)
    {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .target(env_logger::Target::Pipe(log_target))
    .init();

    log::info!("Starting Delvekeep v{}", env!("CARGO_PKG_VERSION"));

    let mut game = build_game(&config);

    // Setup terminal
    enable_raw_mode()?;
    let mut terminal = setup_or_restore(setup_terminal, || {
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
    })?;

    let app = App::new();

    // Run the game loop
    let result = run_game_loop(&mut terminal, &app, &mut game);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Report any errors
    if let Err(ref e) = result {
        log::error!("Game exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Delvekeep shut down cleanly");
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Run `setup`, calling `restore` first if it fails
fn setup_or_restore<T>(
    setup: impl FnOnce() -> Result<T>,
    restore: impl FnOnce(),
) -> Result<T> {
    match setup() {
        Ok(value) => Ok(value),
        Err(e) => {
            log::error!("Terminal setup failed: {}", e);
            restore();
            Err(e)
        }
    }
}

fn build_game(config: &Config) -> Game {
    let store: Box<dyn PlayerStore> = match &config.save_path {
        Some(path) => {
            log::info!("Save file: {}", path.display());
            Box::new(JsonFileStore::new(path.clone()))
        }
        None => Box::new(MemoryStore::new()),
    };

    let player = save::load_or_default(store.as_ref());

    let dice: Box<dyn Dice> = match config.seed {
        Some(seed) => {
            log::info!("Using seed {}", seed);
            Box::new(StdDice::seeded(seed))
        }
        None => Box::new(StdDice::from_entropy()),
    };

    Game::new(player, dice, store)
}

/// Blocking input loop: draw, wait for a key, apply it
fn run_game_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &App,
    game: &mut Game,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame, game))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };

        let quit = match ui::translate(key) {
            Some(InputAction::ForceQuit) => true,
            Some(InputAction::Game(key)) => game.handle_key(key),
            None => false,
        };

        if quit || matches!(game.state(), GameState::Quit) {
            break;
        }

        if let Some(banner) = game.take_encounter_banner() {
            for i in 0..BANNER_FRAMES {
                terminal.draw(|frame| {
                    app.render(frame, game);
                    app.render_banner(frame, &banner, i % 2 == 0);
                })?;
                std::thread::sleep(BANNER_FRAME_TIME);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_setup_restores_terminal() {
        let restored = Cell::new(false);
        let result: Result<()> = setup_or_restore(
            || Err(anyhow::anyhow!("no tty")),
            || restored.set(true),
        );
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_successful_setup_skips_restore() {
        let restored = Cell::new(false);
        let value = setup_or_restore(|| Ok(7), || restored.set(true)).unwrap();
        assert_eq!(value, 7);
        assert!(!restored.get());
    }
}
