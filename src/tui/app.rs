use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config::read_config;
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::store::TaskStore;
use crate::model::config::Config;
use crate::model::task::{Priority, TaskId};
use crate::view::{self, Row};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Text input for a new task
    Add,
    /// Modal edit of one task; commit or dismiss returns to Navigate
    Edit,
    /// Delete confirmation
    Confirm,
}

/// State of the single-line text input used by Add and Edit
#[derive(Debug, Clone)]
pub struct InputState {
    pub text: String,
    /// Byte offset of the cursor within `text`
    pub cursor: usize,
    pub priority: Priority,
    /// Task being edited (None while adding)
    pub target: Option<TaskId>,
}

impl InputState {
    pub fn new(priority: Priority) -> Self {
        InputState {
            text: String::new(),
            cursor: 0,
            priority,
            target: None,
        }
    }
}

/// Severity of a status-row message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warn,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub config: Config,
    pub theme: Theme,
    pub favorites_only: bool,
    /// Cursor row in the displayed list
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    pub mode: Mode,
    pub input: Option<InputState>,
    /// Pending delete, set while in Confirm mode
    pub confirm_delete: Option<TaskId>,
    pub status: Option<(MessageKind, String)>,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(store: TaskStore, config: Config) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            store,
            config,
            theme,
            favorites_only: false,
            cursor: 0,
            scroll_offset: 0,
            mode: Mode::Navigate,
            input: None,
            confirm_delete: None,
            status: None,
            show_help: false,
            should_quit: false,
        }
    }

    /// The displayed rows for the current filter setting
    pub fn rows(&self) -> Vec<Row> {
        view::visible_rows(self.store.tasks(), self.favorites_only)
    }

    /// The row under the cursor, if any
    pub fn selected_row(&self) -> Option<Row> {
        self.rows().into_iter().nth(self.cursor)
    }

    pub fn selected_id(&self) -> Option<TaskId> {
        self.selected_row().map(|r| r.id)
    }

    /// Keep the cursor inside the displayed list after a mutation
    pub fn clamp_cursor(&mut self) {
        let count = self.rows().len();
        if count == 0 {
            self.cursor = 0;
        } else if self.cursor >= count {
            self.cursor = count - 1;
        }
    }

    /// Re-locate a task after the list re-sorted and move the cursor to it.
    /// If the task is no longer displayed the selection is not restored.
    pub fn reselect(&mut self, id: TaskId) {
        if let Some(pos) = view::position_of(&self.rows(), id) {
            self.cursor = pos;
        }
        self.clamp_cursor();
    }

    /// Default priority for the add prompt, from config
    pub fn default_priority(&self) -> Priority {
        Priority::parse(&self.config.default_priority).unwrap_or_default()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some((MessageKind::Info, text.into()));
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.status = Some((MessageKind::Warn, text.into()));
    }
}

/// Directory holding the task file, state file, and config
fn data_dir(task_file: &Path) -> PathBuf {
    task_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Restore persisted UI state (favorites filter, cursor)
pub fn restore_ui_state(app: &mut App) {
    let dir = data_dir(app.store.path());
    if let Some(state) = read_ui_state(&dir) {
        app.favorites_only = state.favorites_only;
        app.cursor = state.cursor;
        app.clamp_cursor();
    }
}

/// Save UI state beside the task file
pub fn save_ui_state(app: &App) {
    let dir = data_dir(app.store.path());
    let state = UiState {
        favorites_only: app.favorites_only,
        cursor: app.cursor,
    };
    let _ = write_ui_state(&dir, &state);
}

/// Run the TUI application against the given task file
pub fn run(task_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = TaskStore::load(task_file);
    let config = read_config(&data_dir(task_file));

    let mut app = App::new(store, config);
    restore_ui_state(&mut app);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
