//! Command line options.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::default_log_level;

/// Single-user kanban board in the terminal.
///
/// The board is kept in one SQLite key/value slot and saved after every
/// change. Logs are written to rotating files, never to the terminal.
#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(version)]
#[command(about = "Single-user kanban board in the terminal")]
pub struct Cli {
    /// SQLite file holding the board
    #[arg(long, value_name = "PATH", default_value = "kanban.db")]
    pub db: PathBuf,

    /// Directory for log files
    #[arg(long, value_name = "DIR", default_value = "logs")]
    pub log_dir: PathBuf,

    /// trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL", default_value = default_log_level())]
    pub log_level: String,

    /// Forget the saved board and start from the demo board
    #[arg(long)]
    pub reset: bool,
}
