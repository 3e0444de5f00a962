// Board, column and task records.
// The serde shape is the persisted layout of the board slot, so field names
// follow the stored JSON (camelCase, dueDate omitted when absent).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

pub const TODO_COLUMN_ID: &str = "todo";
pub const IN_PROGRESS_COLUMN_ID: &str = "in-progress";
pub const DONE_COLUMN_ID: &str = "done";

/// The fixed column set, in display order: (id, title).
pub const COLUMNS: [(&str, &str); 3] = [
    (TODO_COLUMN_ID, "To Do"),
    (IN_PROGRESS_COLUMN_ID, "In Progress"),
    (DONE_COLUMN_ID, "Done"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    // Cycles low -> medium -> high -> low, used by the edit dialog
    pub fn next(&self) -> Priority {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Low,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(id: &str, title: &str) -> Column {
        Column {
            id: id.to_string(),
            title: title.to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// A board with the three fixed columns and no tasks.
    pub fn empty() -> Board {
        Board {
            columns: COLUMNS
                .iter()
                .map(|(id, title)| Column::new(id, title))
                .collect(),
        }
    }

    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == column_id)
    }

    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.id == column_id)
    }

    // Returns the task together with the id of the column owning it
    pub fn find_task(&self, task_id: &str) -> Option<(&str, &Task)> {
        self.columns.iter().find_map(|column| {
            column
                .task(task_id)
                .map(|task| (column.id.as_str(), task))
        })
    }

    pub fn contains_task(&self, task_id: &str) -> bool {
        self.find_task(task_id).is_some()
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    /// Checks the shape a loaded board must have before it is trusted.
    ///
    /// The column set must be exactly the fixed one, in order. Task ids must be
    /// non-empty and unique across the board, titles must not be blank.
    pub fn validate(&self) -> Result<(), BoardValidationError> {
        let ids: Vec<&str> = self.columns.iter().map(|c| c.id.as_str()).collect();
        let expected: Vec<&str> = COLUMNS.iter().map(|(id, _)| *id).collect();
        if ids != expected {
            return Err(BoardValidationError::UnexpectedColumns {
                found: ids.join(","),
            });
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            for task in &column.tasks {
                if task.id.is_empty() {
                    return Err(BoardValidationError::EmptyTaskId {
                        column: column.id.clone(),
                    });
                }
                if !seen.insert(task.id.as_str()) {
                    return Err(BoardValidationError::DuplicateTaskId {
                        id: task.id.clone(),
                    });
                }
                if task.title.trim().is_empty() {
                    return Err(BoardValidationError::BlankTitle {
                        id: task.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardValidationError {
    #[error("unexpected column set: [{found}]")]
    UnexpectedColumns { found: String },

    #[error("task with empty id in column {column}")]
    EmptyTaskId { column: String },

    #[error("duplicate task id: {id}")]
    DuplicateTaskId { id: String },

    #[error("task {id} has a blank title")]
    BlankTitle { id: String },
}

/// Caller-supplied fields of a task about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, priority: Priority) -> NewTask {
        NewTask {
            title: title.into(),
            description: String::new(),
            priority,
            due_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> NewTask {
        self.description = description.into();
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> NewTask {
        self.due_date = Some(due_date);
        self
    }
}

/// Partial update of a task. `None` leaves a field as it is.
///
/// `due_date` is tri-state: `None` keeps the date, `Some(None)` clears it and
/// `Some(Some(date))` replaces it. There is no way to express a change of the
/// id or the creation timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(id: &str, title: &str) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            priority: Priority::Low,
            due_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn task_serializes_with_camel_case_and_omits_missing_due_date() {
        let json = serde_json::to_value(task("abc", "Write")).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T09:00:00Z");
        assert_eq!(json["priority"], "low");
        assert!(json.get("dueDate").is_none());
    }

    #[test]
    fn task_reads_iso_due_date() {
        let raw = r#"{"id":"x1","title":"T","description":"","priority":"high",
            "dueDate":"2024-03-05T10:00:00.000Z","createdAt":"2024-03-01T10:00:00.000Z"}"#;
        let parsed: Task = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.priority, Priority::High);
        assert_eq!(
            parsed.due_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn unknown_priority_is_rejected() {
        let raw = r#"{"id":"x1","title":"T","description":"","priority":"urgent",
            "createdAt":"2024-03-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<Task>(raw).is_err());
    }

    #[test]
    fn validate_accepts_empty_board() {
        assert_eq!(Board::empty().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_wrong_columns() {
        let mut board = Board::empty();
        board.columns.pop();
        assert!(matches!(
            board.validate(),
            Err(BoardValidationError::UnexpectedColumns { .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_ids_across_columns() {
        let mut board = Board::empty();
        board.columns[0].tasks.push(task("same", "One"));
        board.columns[2].tasks.push(task("same", "Two"));
        assert_eq!(
            board.validate(),
            Err(BoardValidationError::DuplicateTaskId {
                id: "same".to_string()
            })
        );
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut board = Board::empty();
        board.columns[1].tasks.push(task("t1", "   "));
        assert!(matches!(
            board.validate(),
            Err(BoardValidationError::BlankTitle { .. })
        ));
    }

    #[test]
    fn patch_keeps_unset_fields() {
        let mut target = task("t1", "Old");
        target.description = "keep me".to_string();
        let patch = TaskPatch {
            title: Some("New".to_string()),
            due_date: Some(Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap())),
            ..TaskPatch::default()
        };
        patch.apply_to(&mut target);
        assert_eq!(target.title, "New");
        assert_eq!(target.description, "keep me");
        assert!(target.due_date.is_some());

        TaskPatch {
            due_date: Some(None),
            ..TaskPatch::default()
        }
        .apply_to(&mut target);
        assert_eq!(target.due_date, None);
    }

    #[test]
    fn find_task_reports_owning_column() {
        let mut board = Board::empty();
        board.columns[1].tasks.push(task("t9", "Nine"));
        let (column_id, found) = board.find_task("t9").unwrap();
        assert_eq!(column_id, IN_PROGRESS_COLUMN_ID);
        assert_eq!(found.title, "Nine");
        assert_eq!(board.task_count(), 1);
        assert!(!board.contains_task("nope"));
    }
}
