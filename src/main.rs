use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::prelude::*;
use std::{error::Error, io, time::Duration};

use kanban_board::app::{storage::Storage, ui};
use kanban_board::cli::Cli;
use kanban_board::logging::init_logging;

// Start the app.
// Storage and logging are set up before the terminal switches to raw mode so
// that their errors still print normally.
pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let _logger = init_logging(&cli.log_level, &cli.log_dir)?;

    let storage = Storage::open(&cli.db)?;
    if cli.reset {
        storage.clear()?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create an app with 250 ms tick
    let tick_rate = Duration::from_millis(250);
    let app = ui::App::new(&storage);
    let res = ui::run_app(&mut terminal, app, tick_rate);

    // Restore previous terminal state after exit
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    match res {
        Ok(()) => info!("event=app_exit module=main status=ok"),
        Err(err) => {
            error!("event=app_exit module=main status=error error={}", err);
            println!("{err:?}");
        }
    }

    Ok(())
}
