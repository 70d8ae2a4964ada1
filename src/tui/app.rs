//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation
//! - Input event handling
//! - Calculator session and history persistence

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{MemoryStore, SqliteStore};
use crate::application::{Calculator, HistoryService};
use crate::config::Config;

use super::ui::{
    calculator::{render_calculator, CalculatorFormState},
    history::{render_history, HistoryViewState},
    render_disclaimer, Status,
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Calculator,
    History,
}

/// Main application state
pub struct App {
    screen: Screen,

    should_quit: bool,

    /// Session: current result and saved history
    calculator: Calculator<MemoryStore, SqliteStore>,

    form_state: CalculatorFormState,

    history_state: HistoryViewState,

    /// Feedback for the last action
    status: Option<Status>,
}

impl App {
    /// Create a new application instance using default adapters.
    ///
    /// History lives in a session store for the lifetime of the process;
    /// the SQLite file at `config.db_path` is read once for legacy history.
    ///
    /// # Errors
    /// Returns error if the local store cannot be opened.
    pub fn new(config: &Config) -> Result<Self> {
        let local = Arc::new(SqliteStore::new(&config.db_path)?);
        let session = Arc::new(MemoryStore::new());

        let history = HistoryService::new(session, Some(local), config.history_max);
        Ok(Self::with_dependencies(Calculator::new(history)))
    }

    /// Create application with an injected calculator session.
    #[must_use]
    pub fn with_dependencies(calculator: Calculator<MemoryStore, SqliteStore>) -> Self {
        Self {
            screen: Screen::Calculator,
            should_quit: false,
            calculator,
            form_state: CalculatorFormState::default(),
            history_state: HistoryViewState::default(),
            status: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        let loaded = self.calculator.load_history().len();
        tracing::info!("Loaded {} history records", loaded);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(f.area());

                match self.screen {
                    Screen::Calculator => render_calculator(
                        f,
                        chunks[0],
                        &self.form_state,
                        self.calculator.result(),
                        self.calculator.history().len(),
                        self.status.as_ref(),
                    ),
                    Screen::History => render_history(
                        f,
                        chunks[0],
                        self.calculator.history(),
                        self.history_state,
                        self.calculator.history_max_len(),
                        self.status.as_ref(),
                    ),
                }

                render_disclaimer(f, chunks[1]);
            })?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        self.status = None;

        match self.screen {
            Screen::Calculator => self.handle_calculator_key(key),
            Screen::History => self.handle_history_key(key),
        }
    }

    fn handle_calculator_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.form_state.prev_field(),
            KeyCode::Down | KeyCode::Tab | KeyCode::BackTab => self.form_state.next_field(),
            KeyCode::Enter | KeyCode::Char('r' | 'R') => self.calculate(),
            KeyCode::Char('s' | 'S') => self.save_result(),
            KeyCode::Char('h' | 'H') => {
                self.history_state.clamp(self.calculator.history().len());
                self.screen = Screen::History;
            }
            KeyCode::Char('q' | 'Q') => self.should_quit = true,
            KeyCode::Char(c) => self.form_state.input_char(c),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Delete => self.form_state.clear_field(),
            KeyCode::Esc => {
                self.form_state = CalculatorFormState::default();
                self.calculator.clear_result();
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Up => self.history_state.prev(),
            KeyCode::Down => self.history_state.next(self.calculator.history().len()),
            KeyCode::Char('d' | 'D') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('c' | 'C') => self.clear_history(),
            KeyCode::Esc | KeyCode::Char('h' | 'H') => self.screen = Screen::Calculator,
            KeyCode::Char('q' | 'Q') => self.should_quit = true,
            _ => {}
        }
    }

    fn calculate(&mut self) {
        let height = self.form_state.height().to_string();
        let weight = self.form_state.weight().to_string();

        if self.calculator.calculate(&height, &weight).is_none() {
            self.status = Some(Status::error("Enter a non-zero height and weight"));
        }
    }

    fn save_result(&mut self) {
        match self.calculator.save_result() {
            Ok(Some(record)) => {
                self.status = Some(Status::info(format!("Saved BMI {}", record.result.bmi)));
            }
            Ok(None) => {
                self.status = Some(Status::error("Nothing to save yet"));
            }
            Err(e) => {
                tracing::error!("Failed to save history record: {}", e);
                self.status = Some(Status::error(format!("Could not save: {e}")));
            }
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self
            .calculator
            .history()
            .get(self.history_state.selected)
            .map(|r| r.id.clone())
        else {
            return;
        };

        if let Err(e) = self.calculator.delete_record(&id) {
            tracing::error!("Failed to delete history record: {}", e);
            self.status = Some(Status::error(format!("Could not delete: {e}")));
        }

        self.history_state.clamp(self.calculator.history().len());
    }

    fn clear_history(&mut self) {
        match self.calculator.clear_history() {
            Ok(()) => self.status = Some(Status::info("History cleared")),
            Err(e) => {
                tracing::error!("Failed to clear history: {}", e);
                self.status = Some(Status::error(format!("Could not clear: {e}")));
            }
        }
        self.history_state = HistoryViewState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let session = Arc::new(MemoryStore::new());
        let local = Arc::new(SqliteStore::in_memory().expect("Should create db"));
        let history = HistoryService::new(session, Some(local), 15);
        let mut calculator = Calculator::new(history);
        calculator.load_history();
        App::with_dependencies(calculator)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_calculate_save_delete_flow() {
        let mut app = app();

        type_text(&mut app, "170");
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        type_text(&mut app, "65");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(
            app.calculator.result().map(|r| r.bmi.as_str()),
            Some("22.49")
        );

        app.handle_key(KeyCode::Char('s'), KeyModifiers::NONE);
        assert_eq!(app.calculator.history().len(), 1);

        app.handle_key(KeyCode::Char('h'), KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::History);

        app.handle_key(KeyCode::Char('d'), KeyModifiers::NONE);
        assert!(app.calculator.history().is_empty());

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.screen, Screen::Calculator);
    }

    #[test]
    fn test_invalid_input_shows_error_and_clears_result() {
        let mut app = app();
        type_text(&mut app, "170");
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        type_text(&mut app, "65");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.calculator.result().is_some());

        app.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert!(app.calculator.result().is_none());
        assert!(app.status.as_ref().is_some_and(|s| s.error));
    }

    #[test]
    fn test_ctrl_q_quits_anywhere() {
        let mut app = app();
        app.handle_key(KeyCode::Char('h'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }
}
