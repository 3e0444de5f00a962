use chrono::{DateTime, Duration, Utc};
use now::DateTimeNow;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::*;

use crate::app::models::{Board, Priority, Task, DONE_COLUMN_ID};

// Selection on the visible board: one list state per column plus the focused column
pub struct BoardCursor {
    pub column: usize,
    pub states: Vec<ListState>,
}

impl BoardCursor {
    pub fn new(column_count: usize) -> BoardCursor {
        BoardCursor {
            column: 0,
            states: (0..column_count).map(|_| ListState::default()).collect(),
        }
    }

    // Move the selection to the next task of the focused column, wrapping around
    pub fn next(&mut self, board: &Board) {
        let len = self.focused_len(board);
        let state = &mut self.states[self.column];
        let i = match state.selected() {
            Some(i) if len > 0 && i < len - 1 => i + 1,
            _ => 0,
        };
        state.select(if len == 0 { None } else { Some(i) });
    }

    // Move the selection to the previous task of the focused column, wrapping around
    pub fn previous(&mut self, board: &Board) {
        let len = self.focused_len(board);
        let state = &mut self.states[self.column];
        let i = match state.selected() {
            Some(0) | None => len.saturating_sub(1),
            Some(i) => i - 1,
        };
        state.select(if len == 0 { None } else { Some(i) });
    }

    pub fn left(&mut self, board: &Board) {
        if self.column > 0 {
            self.column -= 1;
        }
        self.ensure_selection(board);
    }

    pub fn right(&mut self, board: &Board) {
        if self.column + 1 < self.states.len() {
            self.column += 1;
        }
        self.ensure_selection(board);
    }

    // Focus a column and select its last task, used to follow a moved task
    pub fn focus_last(&mut self, board: &Board, column: usize) {
        self.column = column.min(self.states.len().saturating_sub(1));
        let len = self.focused_len(board);
        self.states[self.column].select(len.checked_sub(1));
    }

    // Keep every selection inside its column after the board changed
    pub fn clamp(&mut self, board: &Board) {
        for (state, column) in self.states.iter_mut().zip(&board.columns) {
            let len = column.tasks.len();
            match state.selected() {
                Some(_) if len == 0 => state.select(None),
                Some(i) if i >= len => state.select(Some(len - 1)),
                _ => {}
            }
        }
    }

    fn ensure_selection(&mut self, board: &Board) {
        let len = self.focused_len(board);
        let state = &mut self.states[self.column];
        if state.selected().is_none() && len > 0 {
            state.select(Some(0));
        }
    }

    fn focused_len(&self, board: &Board) -> usize {
        board
            .columns
            .get(self.column)
            .map(|column| column.tasks.len())
            .unwrap_or(0)
    }

    pub fn focused_column_id<'b>(&self, board: &'b Board) -> Option<&'b str> {
        board.columns.get(self.column).map(|column| column.id.as_str())
    }

    // Get the selected task with the id of its column
    pub fn selected<'b>(&self, board: &'b Board) -> Option<(&'b str, &'b Task)> {
        let column = board.columns.get(self.column)?;
        let index = self.states[self.column].selected()?;
        column.tasks.get(index).map(|task| (column.id.as_str(), task))
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Green,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::Red,
    }
}

// Due date as shown on a card, e.g. "Mar 5, 2024"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

// Overdue means due before the start of today and not done yet
pub fn is_overdue(task: &Task, column_id: &str, now: DateTime<Utc>) -> bool {
    column_id != DONE_COLUMN_ID
        && task
            .due_date
            .is_some_and(|due| due < now.beginning_of_day())
}

// Build the UI (list) for the tasks of one column
pub fn get_list_items_ui<'a>(tasks: &'a [Task], column_id: &str) -> Vec<ListItem<'a>> {
    let now = Utc::now();
    tasks
        .iter()
        .map(|task| {
            let mut lines = vec![Line::from(vec![
                Span::from("● ").fg(priority_color(task.priority)),
                Span::from(task.title.as_str()).bold(),
            ])];

            let mut meta = vec![Span::from(format!("  {}", task.priority))
                .fg(priority_color(task.priority))];
            if let Some(due) = &task.due_date {
                let date = Span::from(format!("  due {}", format_date(due)));
                meta.push(if is_overdue(task, column_id, now) {
                    date.fg(Color::Red)
                } else {
                    date.fg(Color::Gray)
                });
            }
            lines.push(Line::from(meta));

            if !task.description.is_empty() {
                lines.push(Line::from(
                    Span::from(format!("  {}", task.description)).fg(Color::DarkGray),
                ));
            }
            ListItem::new(lines).style(Style::default().fg(Color::White))
        })
        .collect()
}

// Build the UI (lines) for statistics infobox
pub fn get_statistics_ui<'a>(board: &Board) -> Vec<Line<'a>> {
    let now = Utc::now();
    let next_week = now + Duration::weeks(1);
    let open_tasks = || {
        board
            .columns
            .iter()
            .filter(|column| column.id != DONE_COLUMN_ID)
            .flat_map(|column| column.tasks.iter().map(move |task| (column.id.as_str(), task)))
    };

    let mut lines = vec![Line::from(format!("Total tasks: {}", board.task_count()))];
    for column in &board.columns {
        lines.push(Line::from(format!(
            "  {}: {}",
            column.title,
            column.tasks.len()
        )));
    }
    lines.push(Line::from(format!(
        "Due next week: {}",
        open_tasks()
            .filter(|(_, task)| task.due_date.is_some_and(|due| due >= now && due < next_week))
            .count()
    )));
    lines.push(Line::from(format!(
        "Overdue: {}",
        open_tasks()
            .filter(|(column_id, task)| is_overdue(task, column_id, now))
            .count()
    )));
    lines
}

// Build the UI (lines) for instructions infobox
pub fn get_instructions_ui<'a>() -> Vec<Line<'a>> {
    vec![
        "arrows - select".into(),
        "a - add a task here".into(),
        "A - add a task to To Do".into(),
        "e - edit a task".into(),
        "x - delete a task".into(),
        "H / L - move task left/right".into(),
        "/ - search".into(),
        "q - quit".into(),
    ]
}
