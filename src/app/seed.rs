// Demonstration board used when the slot is empty or holds something unusable
use chrono::{Duration, Utc};

use crate::app::board_store::create_task;
use crate::app::models::{
    Board, NewTask, Priority, DONE_COLUMN_ID, IN_PROGRESS_COLUMN_ID, TODO_COLUMN_ID,
};

// (column, title, description, priority, due date offset in days from now)
const DEMO_TASKS: [(&str, &str, &str, Priority, i64); 12] = [
    (
        TODO_COLUMN_ID,
        "Design User Interface",
        "Create wireframes and mockups for the new dashboard layout",
        Priority::High,
        7,
    ),
    (
        TODO_COLUMN_ID,
        "Write Documentation",
        "Document the API endpoints and usage examples",
        Priority::Medium,
        5,
    ),
    (
        TODO_COLUMN_ID,
        "Review Pull Requests",
        "Review and merge pending pull requests from the team",
        Priority::Low,
        2,
    ),
    (
        TODO_COLUMN_ID,
        "Update Dependencies",
        "Update project dependencies to their latest stable versions",
        Priority::Medium,
        3,
    ),
    (
        IN_PROGRESS_COLUMN_ID,
        "Implement Authentication",
        "Add user authentication and authorization features",
        Priority::High,
        4,
    ),
    (
        IN_PROGRESS_COLUMN_ID,
        "Optimize Performance",
        "Improve application loading times and overall performance",
        Priority::Medium,
        6,
    ),
    (
        IN_PROGRESS_COLUMN_ID,
        "Write Unit Tests",
        "Add comprehensive unit tests for core functionality",
        Priority::Medium,
        5,
    ),
    (
        IN_PROGRESS_COLUMN_ID,
        "Setup CI/CD Pipeline",
        "Configure automated testing and deployment workflow",
        Priority::High,
        3,
    ),
    (
        DONE_COLUMN_ID,
        "Project Setup",
        "Initialize project repository and development environment",
        Priority::High,
        -2,
    ),
    (
        DONE_COLUMN_ID,
        "Database Schema",
        "Design and implement initial database schema",
        Priority::High,
        -1,
    ),
    (
        DONE_COLUMN_ID,
        "API Design",
        "Design RESTful API endpoints and documentation",
        Priority::Medium,
        -3,
    ),
    (
        DONE_COLUMN_ID,
        "Requirements Gathering",
        "Collect and document project requirements",
        Priority::Medium,
        -4,
    ),
];

/// Three fixed columns with four demo tasks each, due dates relative to now.
pub fn default_board() -> Board {
    let now = Utc::now();
    DEMO_TASKS.iter().fold(
        Board::empty(),
        |board, (column_id, title, description, priority, offset_days)| {
            let task = NewTask::new(*title, *priority)
                .with_description(*description)
                .with_due_date(now + Duration::days(*offset_days));
            create_task(&board, column_id, task)
        },
    )
}
