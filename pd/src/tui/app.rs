//! TUI application - key handling and UI-only state
//!
//! The App never touches the backend. Keys become [`PendingAction`]s that the
//! runner hands to the controller. Rendering lives in the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::domain::TemplateId;
use crate::session::Session;

/// Label of the blank picker row
pub const BLANK_OPTION: &str = "Select a Template";

/// Which control has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Picker,
    Input,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Picker => Self::Input,
            Self::Input => Self::Picker,
        }
    }
}

/// Action for the runner to execute against the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Picker choice; `None` is the blank row
    Select(Option<TemplateId>),
    /// Free-text input changed
    SetFreeText(String),
    Ask,
    Copy,
    Delete,
    Refresh,
}

/// TUI application
#[derive(Debug, Default)]
pub struct App {
    /// Focused control
    pub focus: Focus,
    /// Highlighted picker row (0 is the blank row)
    pub cursor: usize,
    /// Input box contents
    pub input: String,
    /// Should the app quit
    pub should_quit: bool,
    /// Actions queued since the last dispatch
    actions: Vec<PendingAction>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take queued actions in the order they were made
    pub fn take_actions(&mut self) -> Vec<PendingAction> {
        std::mem::take(&mut self.actions)
    }

    /// Keep the cursor inside the picker after the list changes
    pub fn clamp_cursor(&mut self, template_count: usize) {
        // Rows: blank + one per template
        if self.cursor > template_count {
            self.cursor = template_count;
        }
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent, session: &Session) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true; // Force quit
        }

        match self.focus {
            Focus::Picker => self.handle_picker_key(key, session),
            Focus::Input => self.handle_input_key(key),
        }
        self.should_quit
    }

    fn handle_picker_key(&mut self, key: KeyEvent, session: &Session) {
        let rows = session.templates().len() + 1;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('i') => self.focus = self.focus.toggle(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < rows {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('g') => self.cursor = 0,
            KeyCode::Char('G') => self.cursor = rows - 1,
            KeyCode::Enter => {
                let choice = match self.cursor {
                    0 => None,
                    n => session.templates().get(n - 1).map(|t| t.id.clone()),
                };
                debug!(?choice, "handle_picker_key: select");
                self.actions.push(PendingAction::Select(choice));
            }
            KeyCode::Char('c') => self.actions.push(PendingAction::Copy),
            KeyCode::Char('d') => self.actions.push(PendingAction::Delete),
            KeyCode::Char('r') => self.actions.push(PendingAction::Refresh),
            KeyCode::Char('a') => self.actions.push(PendingAction::Ask),
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Esc => self.focus = self.focus.toggle(),
            KeyCode::Enter => self.actions.push(PendingAction::Ask),
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    self.actions.push(PendingAction::SetFreeText(self.input.clone()));
                }
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.actions.push(PendingAction::SetFreeText(self.input.clone()));
            }
            _ => {}
        }
    }
}
