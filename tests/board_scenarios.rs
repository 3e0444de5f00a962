use kanban_board::{
    filter_board, BoardState, NewTask, Priority, Storage, TaskPatch, DONE_COLUMN_ID,
    IN_PROGRESS_COLUMN_ID, TODO_COLUMN_ID,
};
use std::collections::HashSet;

fn column_len(state: &BoardState, column_id: &str) -> usize {
    state.full_board().column(column_id).unwrap().tasks.len()
}

fn all_ids(state: &BoardState) -> HashSet<String> {
    state
        .full_board()
        .columns
        .iter()
        .flat_map(|column| column.tasks.iter().map(|task| task.id.clone()))
        .collect()
}

#[test]
fn seed_then_create_ship_release() {
    let storage = Storage::open_in_memory().unwrap();
    let mut state = BoardState::new(&storage);
    assert_eq!(column_len(&state, TODO_COLUMN_ID), 4);
    assert_eq!(column_len(&state, IN_PROGRESS_COLUMN_ID), 4);
    assert_eq!(column_len(&state, DONE_COLUMN_ID), 4);
    let before = all_ids(&state);

    state.create_task(TODO_COLUMN_ID, NewTask::new("Ship release", Priority::High));

    let todo = state.full_board().column(TODO_COLUMN_ID).unwrap();
    assert_eq!(todo.tasks.len(), 5);
    let created = todo.tasks.last().unwrap();
    assert_eq!(created.title, "Ship release");
    assert_eq!(created.priority, Priority::High);
    assert!(!before.contains(&created.id));
    assert_eq!(all_ids(&state).len(), 13);
}

#[test]
fn move_project_setup_keeps_fields_identical() {
    let storage = Storage::open_in_memory().unwrap();
    let mut state = BoardState::new(&storage);
    state.create_task(TODO_COLUMN_ID, NewTask::new("Ship release", Priority::High));
    let todo_before = column_len(&state, TODO_COLUMN_ID);

    let original = state
        .full_board()
        .column(DONE_COLUMN_ID)
        .unwrap()
        .tasks
        .iter()
        .find(|task| task.title == "Project Setup")
        .cloned()
        .unwrap();

    state.move_task_between_columns(DONE_COLUMN_ID, TODO_COLUMN_ID, &original.id);

    assert_eq!(column_len(&state, DONE_COLUMN_ID), 3);
    assert_eq!(column_len(&state, TODO_COLUMN_ID), todo_before + 1);
    let moved = state
        .full_board()
        .column(TODO_COLUMN_ID)
        .unwrap()
        .tasks
        .last()
        .unwrap();
    assert_eq!(moved, &original);
    assert_eq!(
        serde_json::to_string(moved).unwrap(),
        serde_json::to_string(&original).unwrap()
    );
    assert_eq!(state.full_board().task_count(), 13);
}

#[test]
fn state_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kanban.db");

    let expected = {
        let storage = Storage::open(&path).unwrap();
        let mut state = BoardState::new(&storage);
        state.create_task(
            IN_PROGRESS_COLUMN_ID,
            NewTask::new("Carry over", Priority::Low).with_description("after restart"),
        );
        let id = state.full_board().columns[0].tasks[2].id.clone();
        state.edit_task(
            TODO_COLUMN_ID,
            &id,
            &TaskPatch {
                priority: Some(Priority::High),
                due_date: Some(None),
                ..TaskPatch::default()
            },
        );
        state.full_board().clone()
    };

    let storage = Storage::open(&path).unwrap();
    let state = BoardState::new(&storage);
    assert_eq!(state.full_board(), &expected);
}

#[test]
fn untouched_seed_keeps_its_ids_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kanban.db");

    let first = {
        let storage = Storage::open(&path).unwrap();
        let state = BoardState::new(&storage);
        all_ids(&state)
    };

    let storage = Storage::open(&path).unwrap();
    let state = BoardState::new(&storage);
    assert_eq!(first.len(), 12);
    assert_eq!(all_ids(&state), first);
}

#[test]
fn blank_title_edit_does_not_cost_the_board_on_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kanban.db");

    let expected = {
        let storage = Storage::open(&path).unwrap();
        let mut state = BoardState::new(&storage);
        state.create_task(TODO_COLUMN_ID, NewTask::new("Keep me", Priority::High));
        let id = state.full_board().columns[0].tasks.last().unwrap().id.clone();
        state.edit_task(
            TODO_COLUMN_ID,
            &id,
            &TaskPatch {
                title: Some(String::new()),
                ..TaskPatch::default()
            },
        );
        state.full_board().clone()
    };

    let storage = Storage::open(&path).unwrap();
    let state = BoardState::new(&storage);
    assert_eq!(state.full_board(), &expected);
    assert_eq!(state.full_board().task_count(), 13);
    assert!(state
        .full_board()
        .columns
        .iter()
        .flat_map(|column| column.tasks.iter())
        .any(|task| task.title == "Keep me"));
}

#[test]
fn deleting_every_task_leaves_three_empty_columns() {
    let storage = Storage::open_in_memory().unwrap();
    let mut state = BoardState::new(&storage);
    let targets: Vec<(String, String)> = state
        .full_board()
        .columns
        .iter()
        .flat_map(|column| {
            column
                .tasks
                .iter()
                .map(move |task| (column.id.clone(), task.id.clone()))
        })
        .collect();

    for (column_id, task_id) in &targets {
        state.remove_task(column_id, task_id);
    }

    let saved = storage.load_saved().unwrap().unwrap();
    assert_eq!(saved.columns.len(), 3);
    assert_eq!(saved.task_count(), 0);
    // an emptied board is still a saved board, not a reason to reseed
    assert_eq!(storage.load().task_count(), 0);
}

#[test]
fn filtered_view_does_not_change_what_is_saved() {
    let storage = Storage::open_in_memory().unwrap();
    let mut state = BoardState::new(&storage);
    state.set_search_term("schema");
    assert_eq!(state.board().task_count(), 1);

    state.create_task(DONE_COLUMN_ID, NewTask::new("Unrelated", Priority::Low));
    let saved = storage.load_saved().unwrap().unwrap();
    assert_eq!(saved.task_count(), 13);
    assert_eq!(filter_board(&saved, "schema").task_count(), 1);
}
