//! Single-user kanban board kept in one SQLite key/value slot.
//!
//! `app::board_store` holds the pure board mutations, `app::storage` the
//! persistence slot and `app::board_state` the state the terminal UI drives.

pub mod app;
pub mod cli;
pub mod logging;

pub use app::board_state::{filter_board, BoardState};
pub use app::models::{
    Board, BoardValidationError, Column, NewTask, Priority, Task, TaskPatch, COLUMNS,
    DONE_COLUMN_ID, IN_PROGRESS_COLUMN_ID, TODO_COLUMN_ID,
};
pub use app::storage::{Storage, StorageError};
