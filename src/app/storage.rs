// Communication with SQLite
// The whole board lives as one JSON document under a single key of a
// key/value table; every save overwrites it.
use log::{debug, error, info, warn};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

use crate::app::models::{Board, BoardValidationError};
use crate::app::seed::default_board;

pub const BOARD_SLOT_KEY: &str = "kanbanBoard";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("stored board is not valid JSON for the board shape: {0}")]
    Json(#[from] serde_json::Error),

    #[error("stored board failed validation: {0}")]
    Invalid(#[from] BoardValidationError),
}

pub struct Storage {
    db_con: Connection,
}

impl Storage {
    // Open (or create) the database file and make sure the slot table exists
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Storage> {
        let path = path.as_ref();
        let db_con = Connection::open(path).map_err(|err| {
            error!(
                "event=storage_open module=storage status=error path={} error={}",
                path.display(),
                err
            );
            err
        })?;
        let storage = Storage { db_con };
        storage.create_table_if_not_exists()?;
        info!(
            "event=storage_open module=storage status=ok path={}",
            path.display()
        );
        Ok(storage)
    }

    pub fn open_in_memory() -> StorageResult<Storage> {
        let storage = Storage {
            db_con: Connection::open_in_memory()?,
        };
        storage.create_table_if_not_exists()?;
        debug!("event=storage_open module=storage status=ok mode=memory");
        Ok(storage)
    }

    fn create_table_if_not_exists(&self) -> StorageResult<()> {
        self.db_con.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
            (),
        )?;
        Ok(())
    }

    // READ (raw slot content)
    pub fn read_slot(&self) -> StorageResult<Option<String>> {
        let value = self
            .db_con
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [BOARD_SLOT_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    // WRITE (raw slot content)
    pub fn write_slot(&self, value: &str) -> StorageResult<()> {
        self.db_con.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            (BOARD_SLOT_KEY, value),
        )?;
        Ok(())
    }

    /// Reads the saved board without any fallback.
    ///
    /// `Ok(None)` means the slot is empty. Content that does not parse into a
    /// board, or parses into one that fails [`Board::validate`], is an error.
    pub fn load_saved(&self) -> StorageResult<Option<Board>> {
        let Some(raw) = self.read_slot()? else {
            return Ok(None);
        };
        let board: Board = serde_json::from_str(&raw)?;
        board.validate()?;
        Ok(Some(board))
    }

    /// Returns the saved board, or the demo board when there is none.
    ///
    /// Unreadable or invalid content also falls back to the demo board; it
    /// is left in place until the next save overwrites it.
    pub fn load(&self) -> Board {
        match self.load_saved() {
            Ok(Some(board)) => {
                info!(
                    "event=board_load module=storage status=ok source=slot tasks={}",
                    board.task_count()
                );
                board
            }
            Ok(None) => {
                info!("event=board_load module=storage status=ok source=seed reason=empty_slot");
                default_board()
            }
            Err(err) => {
                warn!(
                    "event=board_load module=storage status=fallback source=seed error={}",
                    err
                );
                default_board()
            }
        }
    }

    // Full overwrite of the slot with the given snapshot
    pub fn save(&self, board: &Board) -> StorageResult<()> {
        let json = serde_json::to_string(board)?;
        self.write_slot(&json)?;
        debug!(
            "event=board_save module=storage status=ok tasks={} bytes={}",
            board.task_count(),
            json.len()
        );
        Ok(())
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.db_con
            .execute("DELETE FROM kv_store WHERE key = ?1;", [BOARD_SLOT_KEY])?;
        info!("event=board_clear module=storage status=ok");
        Ok(())
    }
}
