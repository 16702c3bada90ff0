//! Quadsight - Entry Point
//!
//! Loads a text map, sets up the terminal and lets the player walk around
//! while the field of view is drawn at sub-cell resolution.

use std::fs::OpenOptions;
use std::io;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};

use quadsight::data::{load_map_with_start, Args, Settings};
use quadsight::fov::FovEngine;
use quadsight::ui::App;

/// Log to a file. Returns true when `RUST_LOG` chose the filter.
///
/// Without `RUST_LOG` the global max level does the filtering: info until the
/// settings are loaded, then their `log_level`.
fn init_logging() -> bool {
    let from_env = std::env::var_os("RUST_LOG").is_some();

    // Log to a file so output never lands on the alternate screen
    let log_target: Box<dyn io::Write + Send> = match OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("quadsight.log")
    {
        Ok(file) => Box::new(file),
        Err(_) => Box::new(io::sink()),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .target(env_logger::Target::Pipe(log_target))
        .init();

    if !from_env {
        log::set_max_level(LevelFilter::Info);
    }
    from_env
}

fn main() -> Result<()> {
    let args = Args::parse(std::env::args().skip(1));
    let filter_from_env = init_logging();
    log::info!("Starting Quadsight v{}", env!("CARGO_PKG_VERSION"));

    let mut settings = Settings::load(args.config.as_deref());
    args.apply(&mut settings);
    if !filter_from_env {
        match settings.level_filter() {
            Some(level) => log::set_max_level(level),
            None => log::warn!("Unknown log level {:?}, keeping info", settings.log_level),
        }
    }
    log::info!("Settings: {:?}", settings);

    // A missing or empty map aborts before the terminal is touched
    let (map, start) = load_map_with_start(&settings.map_path)
        .with_context(|| format!("cannot start with map {}", settings.map_path.display()))?;

    let mut fov = FovEngine::from_map(map);
    fov.set_visual_range(settings.visual_range);
    let mut app = App::new(&mut fov);
    fov.set_player(start.x, start.y);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &mut fov);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        log::error!("Exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    log::info!("Quadsight shut down cleanly after {} moves", app.moves());
    result
}

/// Draw, then block for the next key press
fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fov: &mut FovEngine,
) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame, fov))?;

        if let Event::Key(key) = event::read()? {
            // Only handle key press events, not releases
            if key.kind == KeyEventKind::Press && app.handle_input(key, fov)? {
                break;
            }
        }
    }

    Ok(())
}
