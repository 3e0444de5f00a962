use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::{prelude::*, widgets::*};
use std::{
    io,
    time::{Duration, Instant},
};

use crate::app::board_state::BoardState;
use crate::app::models::{Board, TODO_COLUMN_ID};
use crate::app::storage::Storage;
use crate::app::{task_edit::*, task_list::*};

// What the keyboard currently drives when no dialog is open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Board,
    Search,
    ConfirmDelete {
        column_id: String,
        task_id: String,
        title: String,
    },
}

pub struct App<'a> {
    pub state: BoardState<'a>,
    pub cursor: BoardCursor,
    pub task_edit_dialog_state: TaskEditDialogState,
    pub mode: Mode,
}

impl<'a> App<'a> {
    pub fn new(storage: &'a Storage) -> App<'a> {
        let state = BoardState::new(storage);
        let cursor = BoardCursor::new(state.full_board().columns.len());
        App {
            state,
            cursor,
            task_edit_dialog_state: TaskEditDialogState::default(),
            mode: Mode::Board,
        }
    }

    // Returns false when the app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.task_edit_dialog_state.dialog_active {
            self.handle_dialog_key(key);
        } else {
            match self.mode.clone() {
                Mode::Board => return self.handle_board_key(key),
                Mode::Search => self.handle_search_key(key),
                Mode::ConfirmDelete {
                    column_id, task_id, ..
                } => self.handle_confirm_key(key, &column_id, &task_id),
            }
        }
        true
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        let dialog = &mut self.task_edit_dialog_state;
        match key.code {
            KeyCode::Down | KeyCode::Tab => dialog.move_cursor_down(),
            KeyCode::Up | KeyCode::BackTab => dialog.move_cursor_up(),
            KeyCode::Esc => dialog.cancel(),
            KeyCode::Enter => {
                dialog.save_task(&mut self.state);
                self.cursor.clamp(&self.state.board());
            }
            KeyCode::Left => dialog.move_cursor_left(),
            KeyCode::Right => dialog.move_cursor_right(),
            KeyCode::Backspace => dialog.delete_char(),
            KeyCode::Char(to_insert) => dialog.input(to_insert),
            _ => {}
        }
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        let board = self.state.board();
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Left if shift => self.move_selected(&board, -1),
            KeyCode::Right if shift => self.move_selected(&board, 1),
            KeyCode::Char('H') => self.move_selected(&board, -1),
            KeyCode::Char('L') => self.move_selected(&board, 1),
            KeyCode::Left => self.cursor.left(&board),
            KeyCode::Right => self.cursor.right(&board),
            KeyCode::Down => self.cursor.next(&board),
            KeyCode::Up => self.cursor.previous(&board),
            KeyCode::Char('a') => {
                if let Some(column_id) = self.cursor.focused_column_id(&board) {
                    self.task_edit_dialog_state.create_a_new_task(column_id);
                }
            }
            KeyCode::Char('A') => self.task_edit_dialog_state.create_a_new_task(TODO_COLUMN_ID),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some((column_id, task)) = self.cursor.selected(&board) {
                    self.task_edit_dialog_state.edit_task(column_id, task);
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some((column_id, task)) = self.cursor.selected(&board) {
                    self.mode = Mode::ConfirmDelete {
                        column_id: column_id.to_string(),
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                    };
                }
            }
            KeyCode::Char('/') => self.mode = Mode::Search,
            _ => {}
        }
        true
    }

    // Keyboard stand-in for dragging a card onto the neighbouring column
    fn move_selected(&mut self, board: &Board, offset: isize) {
        let Some((source_column_id, task)) = self.cursor.selected(board) else {
            return;
        };
        let destination = self.cursor.column as isize + offset;
        if destination < 0 || destination as usize >= board.columns.len() {
            return;
        }
        let destination = destination as usize;
        let destination_column_id = board.columns[destination].id.clone();
        let task_id = task.id.clone();

        self.state
            .move_task_between_columns(source_column_id, &destination_column_id, &task_id);

        let board = self.state.board();
        self.cursor.clamp(&board);
        self.cursor.focus_last(&board, destination);
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let mut term = self.state.search_term().to_string();
        match key.code {
            KeyCode::Esc => {
                term.clear();
                self.mode = Mode::Board;
            }
            KeyCode::Enter => self.mode = Mode::Board,
            KeyCode::Backspace => {
                term.pop();
            }
            KeyCode::Char(c) => term.push(c),
            _ => return,
        }
        self.state.set_search_term(term);
        self.cursor.clamp(&self.state.board());
    }

    // Deleting only happens after an explicit 'y'
    fn handle_confirm_key(&mut self, key: KeyEvent, column_id: &str, task_id: &str) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.state.remove_task(column_id, task_id);
                self.cursor.clamp(&self.state.board());
                self.mode = Mode::Board;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.mode = Mode::Board,
            _ => {}
        }
    }
}

pub fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| draw_ui(f, &mut app))?;
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && !app.handle_key(key) {
                    info!("event=app_quit module=ui status=ok");
                    return Ok(());
                }
            }
        }
        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

// Draws the whole user interface
fn draw_ui(f: &mut Frame, app: &mut App) {
    let board = app.state.board();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(f.size());

    // SEARCH BAR
    let search_style = if app.mode == Mode::Search {
        Style::new().fg(Color::Yellow)
    } else {
        Style::new().white()
    };
    let search = Paragraph::new(Line::from(vec![
        Span::raw(" / "),
        Span::styled(app.state.search_term().to_string(), search_style),
    ]))
    .block(Block::new().title("Search").borders(Borders::ALL));
    f.render_widget(search, rows[0]);

    // Columns on the left, side panel on the right in 75-25 ratio
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(rows[1]);

    // COLUMNS
    let column_count = board.columns.len().max(1) as u32;
    let column_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, column_count); board.columns.len()])
        .split(chunks[0]);

    for (index, column) in board.columns.iter().enumerate() {
        let focused = index == app.cursor.column;
        let border_style = if focused {
            Style::new().fg(Color::LightGreen)
        } else {
            Style::new().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!("{} ({})", column.title, column.tasks.len()));

        if column.tasks.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(Span::styled("No tasks yet", Style::new().italic())),
                Line::from(Span::styled(
                    "Move a task here or add a new one",
                    Style::new().italic(),
                )),
            ])
            .style(Style::new().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
            f.render_widget(empty, column_areas[index]);
            continue;
        }

        let highlight = if focused {
            Style::default().bg(Color::Rgb(40, 60, 40)).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let list = List::new(get_list_items_ui(&column.tasks, &column.id))
            .block(block)
            .highlight_style(highlight)
            .highlight_symbol(if focused { ">> " } else { "   " });
        f.render_stateful_widget(list, column_areas[index], &mut app.cursor.states[index]);
    }

    // SIDE PANEL
    if app.task_edit_dialog_state.dialog_active {
        let title = if app.task_edit_dialog_state.is_editing() {
            "Edit Task"
        } else {
            "Add Task"
        };
        let dialog = Paragraph::new(get_task_edit_ui(&app.task_edit_dialog_state))
            .block(Block::new().title(title).borders(Borders::ALL))
            .wrap(Wrap { trim: false })
            .style(Style::new().white());
        f.render_widget(dialog, chunks[1]);
        return;
    }

    if let Mode::ConfirmDelete { title, .. } = &app.mode {
        let confirm = Paragraph::new(vec![
            Line::from("Are you sure you want to delete this task?"),
            Line::raw(""),
            Line::from(Span::styled(title.as_str(), Style::new().bold())),
            Line::raw(""),
            Line::from("y - delete, n - keep"),
        ])
        .wrap(Wrap { trim: true })
        .block(
            Block::new()
                .title("Delete Task")
                .borders(Borders::ALL)
                .border_style(Style::new().fg(Color::Red)),
        );
        f.render_widget(confirm, chunks[1]);
        return;
    }

    let right_side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(40),
            Constraint::Percentage(15),
        ])
        .split(chunks[1]);

    let instructions = Paragraph::new(get_instructions_ui())
        .block(Block::new().title("Commands").borders(Borders::ALL))
        .style(Style::new().white());

    let statistics = Paragraph::new(get_statistics_ui(app.state.full_board()))
        .block(Block::new().title("Statistics").borders(Borders::ALL))
        .style(Style::new().white());

    let status = match app.state.last_save_error() {
        Some(message) => {
            Paragraph::new(format!("Save failed: {message}")).style(Style::new().red())
        }
        None => Paragraph::new("Saved").style(Style::new().green()),
    }
    .wrap(Wrap { trim: true })
    .block(Block::new().title("Status").borders(Borders::ALL));

    f.render_widget(instructions, right_side[0]);
    f.render_widget(statistics, right_side[1]);
    f.render_widget(status, right_side[2]);
}
