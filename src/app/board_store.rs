// Pure board mutations.
// Every function reads the given snapshot and returns a new one; the input is
// never touched. Unknown column or task ids give back an unchanged copy, and
// so does a blank title, which a stored board may never hold.
use chrono::Utc;

use crate::app::id::generate_unique_id;
use crate::app::models::{Board, NewTask, Task, TaskPatch};

/// Appends a new task to the end of `column_id`.
pub fn create_task(board: &Board, column_id: &str, new_task: NewTask) -> Board {
    let mut next = board.clone();
    if new_task.title.trim().is_empty() {
        return next;
    }
    let Some(index) = next.column_index(column_id) else {
        return next;
    };

    let task = Task {
        id: generate_unique_id(board),
        title: new_task.title,
        description: new_task.description,
        priority: new_task.priority,
        due_date: new_task.due_date,
        created_at: Utc::now(),
    };
    next.columns[index].tasks.push(task);
    next
}

/// Applies `patch` to the task. Id and creation time are never touched.
///
/// A patch that would blank the title is rejected as a whole.
pub fn update_task(board: &Board, column_id: &str, task_id: &str, patch: &TaskPatch) -> Board {
    let mut next = board.clone();
    if patch
        .title
        .as_deref()
        .is_some_and(|title| title.trim().is_empty())
    {
        return next;
    }
    let task = next
        .columns
        .iter_mut()
        .find(|column| column.id == column_id)
        .and_then(|column| column.tasks.iter_mut().find(|task| task.id == task_id));

    if let Some(task) = task {
        patch.apply_to(task);
    }
    next
}

/// Removes the task from `column_id`.
pub fn delete_task(board: &Board, column_id: &str, task_id: &str) -> Board {
    let mut next = board.clone();
    if let Some(index) = next.column_index(column_id) {
        next.columns[index].tasks.retain(|task| task.id != task_id);
    }
    next
}

/// Moves a task out of `source_column_id` to the end of `destination_column_id`.
///
/// Both columns must exist and the task must be in the source column,
/// otherwise the board comes back unchanged. Moving within the same column is
/// also a no-op. Removal and append happen on the same copy, so the task is
/// never in two columns and never lost.
pub fn move_task(
    board: &Board,
    source_column_id: &str,
    destination_column_id: &str,
    task_id: &str,
) -> Board {
    let mut next = board.clone();
    if source_column_id == destination_column_id {
        return next;
    }

    let (Some(source), Some(destination)) = (
        next.column_index(source_column_id),
        next.column_index(destination_column_id),
    ) else {
        return next;
    };

    let Some(position) = next.columns[source]
        .tasks
        .iter()
        .position(|task| task.id == task_id)
    else {
        return next;
    };

    let task = next.columns[source].tasks.remove(position);
    next.columns[destination].tasks.push(task);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Priority, DONE_COLUMN_ID, IN_PROGRESS_COLUMN_ID, TODO_COLUMN_ID};
    use chrono::TimeZone;

    fn sample_board() -> Board {
        let mut board = Board::empty();
        board = create_task(&board, TODO_COLUMN_ID, NewTask::new("Alpha", Priority::Low));
        board = create_task(&board, TODO_COLUMN_ID, NewTask::new("Beta", Priority::High));
        board = create_task(
            &board,
            IN_PROGRESS_COLUMN_ID,
            NewTask::new("Gamma", Priority::Medium).with_description("in flight"),
        );
        board
    }

    fn id_of(board: &Board, column_id: &str, index: usize) -> String {
        board.column(column_id).unwrap().tasks[index].id.clone()
    }

    #[test]
    fn create_appends_to_the_named_column_only() {
        let board = sample_board();
        let due = Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap();
        let next = create_task(
            &board,
            TODO_COLUMN_ID,
            NewTask::new("Delta", Priority::High).with_due_date(due),
        );

        let todo = next.column(TODO_COLUMN_ID).unwrap();
        assert_eq!(todo.tasks.len(), 3);
        let created = todo.tasks.last().unwrap();
        assert_eq!(created.title, "Delta");
        assert_eq!(created.due_date, Some(due));
        assert!(!board.contains_task(&created.id));
        assert_eq!(next.columns[1], board.columns[1]);
        assert_eq!(next.columns[2], board.columns[2]);
    }

    #[test]
    fn create_in_unknown_column_is_a_no_op() {
        let board = sample_board();
        let next = create_task(&board, "backlog", NewTask::new("Lost", Priority::Low));
        assert_eq!(next, board);
    }

    #[test]
    fn create_leaves_input_untouched() {
        let board = sample_board();
        let before = board.clone();
        let _ = create_task(&board, DONE_COLUMN_ID, NewTask::new("Finished", Priority::Low));
        assert_eq!(board, before);
    }

    #[test]
    fn create_with_blank_title_is_a_no_op() {
        let board = sample_board();
        assert_eq!(create_task(&board, TODO_COLUMN_ID, NewTask::new("", Priority::Low)), board);
        assert_eq!(
            create_task(&board, DONE_COLUMN_ID, NewTask::new(" \t ", Priority::High)),
            board
        );
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let board = sample_board();
        let id = id_of(&board, IN_PROGRESS_COLUMN_ID, 0);
        let patch = TaskPatch {
            priority: Some(Priority::High),
            ..TaskPatch::default()
        };
        let next = update_task(&board, IN_PROGRESS_COLUMN_ID, &id, &patch);

        let before = board.column(IN_PROGRESS_COLUMN_ID).unwrap().task(&id).unwrap();
        let after = next.column(IN_PROGRESS_COLUMN_ID).unwrap().task(&id).unwrap();
        assert_eq!(after.priority, Priority::High);
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.id, before.id);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn update_with_wrong_column_is_a_no_op() {
        let board = sample_board();
        let id = id_of(&board, TODO_COLUMN_ID, 0);
        let patch = TaskPatch {
            title: Some("Renamed".to_string()),
            ..TaskPatch::default()
        };
        assert_eq!(update_task(&board, DONE_COLUMN_ID, &id, &patch), board);
        assert_eq!(update_task(&board, TODO_COLUMN_ID, "missing", &patch), board);
    }

    #[test]
    fn update_that_blanks_the_title_is_a_no_op() {
        let board = sample_board();
        let id = id_of(&board, IN_PROGRESS_COLUMN_ID, 0);
        let patch = TaskPatch {
            title: Some("   ".to_string()),
            priority: Some(Priority::Low),
            ..TaskPatch::default()
        };
        let next = update_task(&board, IN_PROGRESS_COLUMN_ID, &id, &patch);
        assert_eq!(next, board);
        assert_eq!(next.validate(), Ok(()));
    }

    #[test]
    fn delete_removes_exactly_one_task() {
        let board = sample_board();
        let id = id_of(&board, TODO_COLUMN_ID, 0);
        let next = delete_task(&board, TODO_COLUMN_ID, &id);
        assert_eq!(next.task_count(), board.task_count() - 1);
        assert!(!next.contains_task(&id));
        assert_eq!(next.column(TODO_COLUMN_ID).unwrap().tasks[0].title, "Beta");
    }

    #[test]
    fn delete_unknown_is_a_no_op() {
        let board = sample_board();
        assert_eq!(delete_task(&board, TODO_COLUMN_ID, "missing"), board);
        let id = id_of(&board, TODO_COLUMN_ID, 0);
        assert_eq!(delete_task(&board, DONE_COLUMN_ID, &id), board);
    }

    #[test]
    fn move_relocates_to_end_of_destination() {
        let board = sample_board();
        let id = id_of(&board, TODO_COLUMN_ID, 0);
        let next = move_task(&board, TODO_COLUMN_ID, IN_PROGRESS_COLUMN_ID, &id);

        assert!(next.column(TODO_COLUMN_ID).unwrap().task(&id).is_none());
        let destination = next.column(IN_PROGRESS_COLUMN_ID).unwrap();
        assert_eq!(destination.tasks.last().unwrap().id, id);
        assert_eq!(next.task_count(), board.task_count());
        assert_eq!(
            destination.tasks.last().unwrap(),
            board.column(TODO_COLUMN_ID).unwrap().task(&id).unwrap()
        );
    }

    #[test]
    fn move_with_missing_pieces_is_a_no_op() {
        let board = sample_board();
        let id = id_of(&board, TODO_COLUMN_ID, 0);
        assert_eq!(move_task(&board, "nowhere", DONE_COLUMN_ID, &id), board);
        assert_eq!(move_task(&board, TODO_COLUMN_ID, "nowhere", &id), board);
        assert_eq!(move_task(&board, IN_PROGRESS_COLUMN_ID, DONE_COLUMN_ID, &id), board);
        assert_eq!(move_task(&board, TODO_COLUMN_ID, TODO_COLUMN_ID, &id), board);
    }
}
