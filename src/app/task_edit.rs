use chrono::{DateTime, NaiveDate, Utc};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::app::board_state::BoardState;
use crate::app::models::{NewTask, Priority, Task, TaskPatch};
use derivative::Derivative;

const DATE_INPUT_FORMAT: &str = "%d.%m.%Y";
const TITLE_LINE: usize = 0;
const DESCRIPTION_LINE: usize = 1;
const DUE_DATE_LINE: usize = 2;
const PRIORITY_LINE: usize = 3;

// State object for the task edit dialog
// Keeps track of the state of the dialog and the content of the task being edited
#[derive(Derivative)]
#[derivative(Default)]
pub struct TaskEditDialogState {
    pub dialog_active: bool,
    column_id: String,
    task_id: Option<String>,
    content: TaskEditDialogContent,
    // Due date text the dialog opened with; unchanged text keeps the stored time of day
    initial_due_date: String,
    error_message: Option<String>,
    // (char index within the line, line index)
    cursor_position: (usize, usize),
}

// Current content of the task being edited/created
#[derive(Derivative, Clone)]
#[derivative(Default)]
struct TaskEditDialogContent {
    title: String,
    description: String,
    due_date: String,
    priority: Priority,
}

impl TaskEditDialogState {
    // Opens the dialog and prepares to accept an input for a new task in the column
    pub fn create_a_new_task(&mut self, column_id: &str) {
        self.dialog_active = true;
        self.column_id = column_id.to_string();
        self.task_id = None;
        self.error_message = None;
        self.cursor_position = (0, TITLE_LINE);
        self.content = TaskEditDialogContent::default();
        self.initial_due_date = String::new();
    }

    // Opens the dialog and prepares to accept an input for the existing task
    pub fn edit_task(&mut self, column_id: &str, task: &Task) {
        self.dialog_active = true;
        self.column_id = column_id.to_string();
        self.task_id = Some(task.id.clone());
        self.error_message = None;
        self.content = TaskEditDialogContent {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task
                .due_date
                .map(|date| date.format(DATE_INPUT_FORMAT).to_string())
                .unwrap_or_default(),
            priority: task.priority,
        };
        self.initial_due_date = self.content.due_date.clone();
        self.cursor_position = (self.content.title.chars().count(), TITLE_LINE);
    }

    pub fn cancel(&mut self) {
        self.dialog_active = false;
        self.error_message = None;
    }

    pub fn is_editing(&self) -> bool {
        self.task_id.is_some()
    }

    // Move the cursor one line BELOW the current one.
    // The horizontal cursor position is clamped to the length of the new line
    pub fn move_cursor_down(&mut self) {
        let (x, y) = self.cursor_position;
        let y = (y + 1).min(PRIORITY_LINE);
        self.cursor_position = (x.min(self.line_len(y)), y);
    }

    // Move the cursor one line ABOVE the current one.
    pub fn move_cursor_up(&mut self) {
        let (x, y) = self.cursor_position;
        let y = y.saturating_sub(1);
        self.cursor_position = (x.min(self.line_len(y)), y);
    }

    pub fn move_cursor_left(&mut self) {
        let (x, y) = self.cursor_position;
        if y == PRIORITY_LINE {
            self.content.priority = previous_priority(self.content.priority);
            return;
        }
        self.cursor_position = (x.saturating_sub(1), y);
    }

    pub fn move_cursor_right(&mut self) {
        let (x, y) = self.cursor_position;
        if y == PRIORITY_LINE {
            self.content.priority = self.content.priority.next();
            return;
        }
        self.cursor_position = ((x + 1).min(self.line_len(y)), y);
    }

    // Delete the char before the cursor
    pub fn delete_char(&mut self) {
        let (x, y) = self.cursor_position;
        if x == 0 {
            return;
        }
        if let Some(field) = self.field_mut(y) {
            remove_char_at(field, x - 1);
            self.cursor_position = (x - 1, y);
        }
    }

    // Handles the input of a char by inserting it into the currently active field
    // On the priority line l/m/h pick a priority and space cycles through them
    pub fn input(&mut self, to_insert: char) {
        let (x, y) = self.cursor_position;
        if y == PRIORITY_LINE {
            self.content.priority = match to_insert {
                'l' | 'L' => Priority::Low,
                'm' | 'M' => Priority::Medium,
                'h' | 'H' => Priority::High,
                ' ' => self.content.priority.next(),
                _ => self.content.priority,
            };
            return;
        }
        if let Some(field) = self.field_mut(y) {
            insert_char_at(field, x, to_insert);
            self.cursor_position = (x + 1, y);
        }
    }

    fn field_mut(&mut self, y_position: usize) -> Option<&mut String> {
        match y_position {
            TITLE_LINE => Some(&mut self.content.title),
            DESCRIPTION_LINE => Some(&mut self.content.description),
            DUE_DATE_LINE => Some(&mut self.content.due_date),
            _ => None,
        }
    }

    fn line_len(&self, y_position: usize) -> usize {
        match y_position {
            TITLE_LINE => self.content.title.chars().count(),
            DESCRIPTION_LINE => self.content.description.chars().count(),
            DUE_DATE_LINE => self.content.due_date.chars().count(),
            _ => 0,
        }
    }

    // Validates the input and hands it to the board state as a create or an edit.
    // On a validation error the dialog stays open with the message shown
    pub fn save_task(&mut self, state: &mut BoardState) {
        let content = self.content.clone();
        let due_date = match parse_due_date(&content.due_date) {
            Ok(due_date) => due_date,
            Err(message) => {
                self.error_message = Some(message);
                return;
            }
        };
        let title = content.title.trim().to_string();
        if title.is_empty() {
            self.error_message = Some("Title cannot be empty".to_string());
            return;
        }

        match &self.task_id {
            Some(task_id) => {
                let due_date_changed = content.due_date.trim() != self.initial_due_date;
                let patch = TaskPatch {
                    title: Some(title),
                    description: Some(content.description),
                    priority: Some(content.priority),
                    due_date: due_date_changed.then_some(due_date),
                };
                state.edit_task(&self.column_id, task_id, &patch);
            }
            None => {
                let new_task = NewTask {
                    title,
                    description: content.description,
                    priority: content.priority,
                    due_date,
                };
                state.create_task(&self.column_id, new_task);
            }
        }

        self.error_message = None;
        self.dialog_active = false;
    }
}

fn previous_priority(priority: Priority) -> Priority {
    priority.next().next()
}

// Empty input means no due date
fn parse_due_date(input: &str) -> Result<Option<DateTime<Utc>>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| Some(date.and_utc()))
        .ok_or_else(|| "Date should be in format dd.mm.yyyy".to_string())
}

fn byte_index(value: &str, char_index: usize) -> usize {
    value
        .char_indices()
        .nth(char_index)
        .map(|(index, _)| index)
        .unwrap_or(value.len())
}

fn insert_char_at(value: &mut String, char_index: usize, to_insert: char) {
    let index = byte_index(value, char_index);
    value.insert(index, to_insert);
}

fn remove_char_at(value: &mut String, char_index: usize) {
    let index = byte_index(value, char_index);
    if index < value.len() {
        value.remove(index);
    }
}

// Returns the UI content for the task edit dialog
pub fn get_task_edit_ui(dialog: &TaskEditDialogState) -> Vec<Line<'_>> {
    const GRAY_TEXT: Style = Style::new().fg(Color::Rgb(110, 110, 110));
    const WHITE_TEXT: Style = Style::new().fg(Color::White);
    const BLACK_ON_WHITE: Style = Style::new().fg(Color::Black).bg(Color::White);
    let mut text = Vec::new();

    struct TextDialogInputLine {
        prefix: &'static str,
        placeholder: &'static str,
        value: String,
    }

    let lines = [
        TextDialogInputLine {
            prefix: "Title:       ",
            placeholder: "My task name",
            value: dialog.content.title.clone(),
        },
        TextDialogInputLine {
            prefix: "Description: ",
            placeholder: "My description",
            value: dialog.content.description.clone(),
        },
        TextDialogInputLine {
            prefix: "Due date:    ",
            placeholder: "23.11.2023",
            value: dialog.content.due_date.clone(),
        },
    ];

    let (cursor_x, cursor_y) = dialog.cursor_position;

    for (i, line) in lines.iter().enumerate() {
        let mut spans = vec![Span::styled(line.prefix, WHITE_TEXT)];

        if line.value.is_empty() {
            // An empty line shows its placeholder; the selected one highlights the first char
            if cursor_y == i {
                spans.push(Span::styled(
                    line.placeholder.chars().take(1).collect::<String>(),
                    BLACK_ON_WHITE,
                ));
                spans.push(Span::styled(
                    line.placeholder.chars().skip(1).collect::<String>(),
                    GRAY_TEXT,
                ));
            } else {
                spans.push(Span::styled(line.placeholder, GRAY_TEXT));
            }
        } else if cursor_y == i {
            // The char under the cursor is highlighted
            spans.push(Span::styled(
                line.value.chars().take(cursor_x).collect::<String>(),
                WHITE_TEXT,
            ));
            spans.push(Span::styled(
                line.value.chars().skip(cursor_x).take(1).collect::<String>(),
                BLACK_ON_WHITE,
            ));
            spans.push(Span::styled(
                line.value.chars().skip(cursor_x + 1).collect::<String>(),
                WHITE_TEXT,
            ));
            if cursor_x == line.value.chars().count() {
                spans.push(Span::styled(" ", BLACK_ON_WHITE));
            }
        } else {
            spans.push(Span::styled(line.value.clone(), WHITE_TEXT));
        }

        text.push(Line::from(spans));
    }

    let priority_style = if cursor_y == PRIORITY_LINE {
        BLACK_ON_WHITE
    } else {
        WHITE_TEXT
    };
    text.push(Line::from(vec![
        Span::styled("Priority:    ", WHITE_TEXT),
        Span::styled(format!("< {} >", dialog.content.priority), priority_style),
    ]));

    text.push(Line::raw(""));

    if let Some(ref error_message) = dialog.error_message {
        text.push(Line::from(vec![Span::styled(
            error_message.clone(),
            Style::new().fg(Color::Red),
        )]));
        text.push(Line::raw(""));
    }

    text.push(Line::from(vec![Span::styled(
        "Enter - save, Esc - cancel",
        WHITE_TEXT,
    )]));
    text.push(Line::from(vec![Span::styled(
        "Priority: l/m/h or arrows",
        GRAY_TEXT,
    )]));

    text
}
