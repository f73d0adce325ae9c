mod actions;
mod app;
mod event;
mod input_handler;
mod theme;
mod ui;
pub mod widgets;

use crate::config::Config;
use crate::error::{Result, TicklistError};
use crate::logging;
use crate::ticklist::{StorageMode, Ticklist};
pub use app::App;

use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

const TICK_RATE_MS: u64 = 250;

fn tui_err(e: impl std::fmt::Display) -> TicklistError {
    TicklistError::Tui(e.to_string())
}

/// Run the TUI application
pub fn run(ticklist_dir: Option<&Path>, ephemeral: bool) -> Result<()> {
    let mode = if ephemeral {
        StorageMode::Ephemeral
    } else {
        StorageMode::Local
    };

    // Open the store before touching the terminal so errors print normally
    let mut app = open_app(ticklist_dir, mode, Config::load())?;
    tracing::info!(todos = app.ticklist.store().todos().len(), "starting tui");

    enable_raw_mode().map_err(tui_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(tui_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(tui_err)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().map_err(tui_err)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(tui_err)?;
    terminal.show_cursor().map_err(tui_err)?;

    res
}

/// Start file logging in the data directory, then load the store, so
/// warnings raised while loading end up in the log.
fn open_app(
    ticklist_dir: Option<&Path>,
    mode: StorageMode,
    loaded: Result<Config>,
) -> Result<App> {
    let data_dir = match &loaded {
        Ok(config) => Ticklist::data_dir_for(ticklist_dir, mode, config)?,
        Err(_) => Ticklist::data_dir_for(ticklist_dir, mode, &Config::default())?,
    };
    if let Some(dir) = &data_dir {
        logging::init_file(dir)?;
    }

    let config = Config::or_default(loaded);
    Ok(App::with_ticklist(Ticklist::open(config, data_dir)?))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let events = event::EventHandler::new(TICK_RATE_MS);

    while app.running {
        terminal.draw(|f| ui::render(f, app)).map_err(tui_err)?;
        app.reconcile();

        match events.next()? {
            event::Event::Key(key) => actions::handle_key_event(app, key),
            event::Event::Tick => app.tick(),
            event::Event::Resize => {}
        }
    }

    Ok(())
}
