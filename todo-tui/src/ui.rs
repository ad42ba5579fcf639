use anyhow::Result;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use std::io;

use todo_core::{CreateTodoInput, Todo};

use crate::api::ApiClient;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    EditingTitle,
    EditingDescription,
    Help,
}

/// Client-side mirror of the server's task list. The list is fetched once on
/// startup; afterwards it is updated in place from RPC responses. Network
/// failures are logged and swallowed, leaving the list as it was.
pub struct App {
    pub todos: Vec<Todo>,
    pub list_state: ListState,
    pub api: ApiClient,
    pub input_mode: InputMode,
    pub title_buffer: String,
    pub description_buffer: String,
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        Self {
            todos: vec![],
            list_state: ListState::default(),
            api,
            input_mode: InputMode::Normal,
            title_buffer: String::new(),
            description_buffer: String::new(),
        }
    }

    pub async fn load_todos(&mut self) {
        match self.api.get_todos().await {
            Ok(todos) => {
                self.todos = todos;
                self.list_state
                    .select(if self.todos.is_empty() { None } else { Some(0) });
            }
            Err(err) => tracing::warn!("failed to load todos: {err}"),
        }
    }

    pub fn next_todo(&mut self) {
        if self.todos.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.todos.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous_todo(&mut self) {
        if self.todos.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.todos.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn start_creating(&mut self) {
        self.title_buffer.clear();
        self.description_buffer.clear();
        self.input_mode = InputMode::EditingTitle;
    }

    pub fn confirm_title(&mut self) {
        if self.title_buffer.trim().is_empty() {
            self.cancel_creating();
            return;
        }
        self.input_mode = InputMode::EditingDescription;
    }

    pub async fn finish_creating(&mut self) {
        let input = CreateTodoInput {
            title: self.title_buffer.trim().to_string(),
            description: Some(self.description_buffer.clone()).filter(|d| !d.is_empty()),
        };

        match self.api.create_todo(&input).await {
            // Like the original web client, the new record goes at the end of
            // the local list rather than triggering a refetch.
            Ok(todo) => {
                self.todos.push(todo);
                if self.list_state.selected().is_none() {
                    self.list_state.select(Some(0));
                }
            }
            Err(err) => tracing::warn!("failed to create todo: {err}"),
        }
        self.cancel_creating();
    }

    pub fn cancel_creating(&mut self) {
        self.input_mode = InputMode::Normal;
        self.title_buffer.clear();
        self.description_buffer.clear();
    }

    pub async fn complete_selected(&mut self) {
        let Some(selected) = self.list_state.selected() else {
            return;
        };
        let Some(todo) = self.todos.get(selected) else {
            return;
        };
        if todo.completed {
            // There is no un-complete transition.
            return;
        }

        match self.api.mark_todo_completed(todo.id).await {
            Ok(updated) => self.replace_todo(updated),
            Err(err) => tracing::warn!("failed to mark todo completed: {err}"),
        }
    }

    pub fn replace_todo(&mut self, updated: Todo) {
        if let Some(existing) = self.todos.iter_mut().find(|t| t.id == updated.id) {
            *existing = updated;
        }
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn hide_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

pub async fn run_app(api: ApiClient) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(api);
    app.load_todos().await;

    let res = run_app_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

async fn run_app_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next_todo(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous_todo(),
                    KeyCode::Char('a') => app.start_creating(),
                    KeyCode::Char('c') => app.complete_selected().await,
                    KeyCode::Char('r') => app.load_todos().await,
                    KeyCode::Char('?') => app.show_help(),
                    _ => {}
                },
                InputMode::EditingTitle => match key.code {
                    KeyCode::Enter => app.confirm_title(),
                    KeyCode::Esc => app.cancel_creating(),
                    KeyCode::Backspace => {
                        app.title_buffer.pop();
                    }
                    KeyCode::Char(c) => app.title_buffer.push(c),
                    _ => {}
                },
                InputMode::EditingDescription => match key.code {
                    KeyCode::Enter => app.finish_creating().await,
                    KeyCode::Esc => app.cancel_creating(),
                    KeyCode::Backspace => {
                        app.description_buffer.pop();
                    }
                    KeyCode::Char(c) => app.description_buffer.push(c),
                    _ => {}
                },
                InputMode::Help => match key.code {
                    KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.hide_help(),
                    _ => {}
                },
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let todo_items: Vec<ListItem> = app
        .todos
        .iter()
        .map(|t| {
            let status = if t.completed { "✓" } else { " " };
            let mut spans = vec![Span::raw(format!("[{}] {}", status, t.title))];
            if let Some(description) = &t.description {
                spans.push(Span::styled(
                    format!("  {description}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let line = Line::from(spans);
            if t.completed {
                ListItem::new(line).style(Style::default().fg(Color::DarkGray))
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let todos = List::new(todo_items)
        .block(Block::default().title("tasks").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    f.render_stateful_widget(todos, f.area(), &mut app.list_state);

    match app.input_mode {
        InputMode::EditingTitle => {
            let popup_area = centered_rect(60, 20, f.area());
            f.render_widget(Clear, popup_area);

            let input = Paragraph::new(app.title_buffer.as_str())
                .block(Block::default().title("new task: title").borders(Borders::ALL))
                .style(Style::default().fg(Color::Green));
            f.render_widget(input, popup_area);
        }
        InputMode::EditingDescription => {
            let popup_area = centered_rect(60, 20, f.area());
            f.render_widget(Clear, popup_area);

            let input = Paragraph::new(app.description_buffer.as_str())
                .block(
                    Block::default()
                        .title("new task: description (optional)")
                        .borders(Borders::ALL),
                )
                .style(Style::default().fg(Color::Green));
            f.render_widget(input, popup_area);
        }
        InputMode::Help => {
            let popup_area = centered_rect(80, 60, f.area());
            f.render_widget(Clear, popup_area);

            let help_text = "HELP\n\nNavigation:\n  j/k: navigate up/down\n\nActions:\n  a: add new task\n  c: mark selected task completed\n  r: reload from server\n  ?: show/hide this help\n  q: quit\n\nPress ? or ESC to close";
            let help = Paragraph::new(help_text)
                .block(Block::default().title("help").borders(Borders::ALL))
                .style(Style::default().fg(Color::White));
            f.render_widget(help, popup_area);
        }
        InputMode::Normal => {}
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            description: None,
            completed,
            created_at: Utc::now(),
        }
    }

    fn test_app() -> App {
        App::new(ApiClient::new("http://localhost:2022"))
    }

    #[test]
    fn replace_todo_swaps_record_in_place() {
        let mut app = test_app();
        app.todos = vec![todo(1, "first", false), todo(2, "second", false)];

        app.replace_todo(todo(1, "first", true));

        assert!(app.todos[0].completed);
        assert_eq!(app.todos[0].title, "first");
        assert!(!app.todos[1].completed);
    }

    #[test]
    fn replace_todo_ignores_unknown_id() {
        let mut app = test_app();
        app.todos = vec![todo(1, "first", false)];

        app.replace_todo(todo(9, "ghost", true));

        assert_eq!(app.todos.len(), 1);
        assert!(!app.todos[0].completed);
    }

    #[test]
    fn confirm_title_requires_non_blank_title() {
        let mut app = test_app();
        app.start_creating();
        app.title_buffer = "   ".to_string();

        app.confirm_title();

        assert!(app.input_mode == InputMode::Normal);
        assert!(app.title_buffer.is_empty());
    }

    #[test]
    fn navigation_wraps_around() {
        let mut app = test_app();
        app.todos = vec![todo(1, "first", false), todo(2, "second", false)];
        app.list_state.select(Some(1));

        app.next_todo();
        assert_eq!(app.list_state.selected(), Some(0));

        app.previous_todo();
        assert_eq!(app.list_state.selected(), Some(1));
    }
}
