// Board state held for the UI.
// Owns the current snapshot and the search term, wires the pure board-store
// functions to the storage slot and derives the filtered board to render.
use log::{debug, error};

use crate::app::board_store;
use crate::app::models::{Board, Column, NewTask, TaskPatch};
use crate::app::storage::Storage;

pub struct BoardState<'a> {
    storage: &'a Storage,
    board: Board,
    search_term: String,
    last_save_error: Option<String>,
}

impl<'a> BoardState<'a> {
    // Load the board once and write it straight back, so a seeded or
    // repaired board keeps its ids across launches
    pub fn new(storage: &'a Storage) -> BoardState<'a> {
        let board = storage.load();
        let mut state = BoardState {
            storage,
            board,
            search_term: String::new(),
            last_save_error: None,
        };
        state.persist("init");
        state
    }

    pub fn create_task(&mut self, column_id: &str, new_task: NewTask) {
        let next = board_store::create_task(&self.board, column_id, new_task);
        self.replace("create", next);
    }

    pub fn edit_task(&mut self, column_id: &str, task_id: &str, patch: &TaskPatch) {
        let next = board_store::update_task(&self.board, column_id, task_id, patch);
        self.replace("edit", next);
    }

    pub fn remove_task(&mut self, column_id: &str, task_id: &str) {
        let next = board_store::delete_task(&self.board, column_id, task_id);
        self.replace("remove", next);
    }

    pub fn move_task_between_columns(
        &mut self,
        source_column_id: &str,
        destination_column_id: &str,
        task_id: &str,
    ) {
        let next = board_store::move_task(
            &self.board,
            source_column_id,
            destination_column_id,
            task_id,
        );
        self.replace("move", next);
    }

    // Swap in the new snapshot and persist it if anything changed
    fn replace(&mut self, action: &str, next: Board) {
        if next == self.board {
            debug!(
                "event=board_mutation module=board_state status=noop action={}",
                action
            );
            return;
        }

        self.board = next;
        debug!(
            "event=board_mutation module=board_state status=ok action={} tasks={}",
            action,
            self.board.task_count()
        );
        self.persist(action);
    }

    fn persist(&mut self, action: &str) {
        match self.storage.save(&self.board) {
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                error!(
                    "event=board_save module=board_state status=error action={} error={}",
                    action, err
                );
                self.last_save_error = Some(err.to_string());
            }
        }
    }

    /// The board to render: the held board narrowed by the search term.
    pub fn board(&self) -> Board {
        filter_board(&self.board, &self.search_term)
    }

    /// The held board, ignoring the search term.
    pub fn full_board(&self) -> &Board {
        &self.board
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }
}

/// Keeps tasks whose title or description contains `term`, ignoring case.
///
/// A blank term returns the board as is. Columns are never dropped and the
/// order of columns and tasks is kept.
pub fn filter_board(board: &Board, term: &str) -> Board {
    if term.trim().is_empty() {
        return board.clone();
    }

    let needle = term.to_lowercase();
    Board {
        columns: board
            .columns
            .iter()
            .map(|column| Column {
                id: column.id.clone(),
                title: column.title.clone(),
                tasks: column
                    .tasks
                    .iter()
                    .filter(|task| {
                        task.title.to_lowercase().contains(&needle)
                            || task.description.to_lowercase().contains(&needle)
                    })
                    .cloned()
                    .collect(),
            })
            .collect(),
    }
}
