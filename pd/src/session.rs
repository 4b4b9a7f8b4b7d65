//! Session state
//!
//! The single owner of everything the client knows: the template collection,
//! the current selection, the free-text input, and the latest answer.
//! Pure data, no I/O. Request results are folded in through [`Session::apply`].

use tracing::debug;

use crate::controller::{Outcome, SessionEvent};
use crate::domain::{Answer, Template, TemplateId};

/// Ask lifecycle as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AskState {
    #[default]
    Idle,
    AwaitingAnswer,
}

/// Client session state
#[derive(Debug, Default, Clone)]
pub struct Session {
    /// Templates in backend order
    templates: Vec<Template>,
    /// Selected template id, if any
    selected: Option<TemplateId>,
    /// Raw text typed by the user
    free_text: String,
    /// Most recent successful answer
    answer: Option<Answer>,
    /// Asks sent but not yet finished
    asks_in_flight: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn selected_id(&self) -> Option<&TemplateId> {
        self.selected.as_ref()
    }

    pub fn free_text(&self) -> &str {
        &self.free_text
    }

    pub fn answer(&self) -> Option<&Answer> {
        self.answer.as_ref()
    }

    pub fn asks_in_flight(&self) -> usize {
        self.asks_in_flight
    }

    pub fn ask_state(&self) -> AskState {
        if self.asks_in_flight > 0 {
            AskState::AwaitingAnswer
        } else {
            AskState::Idle
        }
    }

    /// Look up a template in the current collection
    pub fn find(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| &t.id == id)
    }

    /// Replace the whole collection with the backend's latest list
    pub fn replace_templates(&mut self, templates: Vec<Template>) {
        debug!(count = templates.len(), "replace_templates: called");
        self.templates = templates;
    }

    /// Select a template by id
    ///
    /// Unknown ids leave nothing selected. Returns whether the id was found.
    pub fn select_template(&mut self, id: &TemplateId) -> bool {
        debug!(%id, "select_template: called");
        if self.find(id).is_some() {
            self.selected = Some(id.clone());
            true
        } else {
            debug!(%id, "select_template: id not in collection, clearing selection");
            self.selected = None;
            false
        }
    }

    /// Back to the blank "Select a Template" entry
    pub fn clear_selection(&mut self) {
        debug!("clear_selection: called");
        self.selected = None;
    }

    /// Update the free-text input
    ///
    /// Does not touch the selection: a selected template keeps precedence.
    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.free_text = text.into();
    }

    /// The selected template, resolved against the current collection
    pub fn selected_template(&self) -> Option<&Template> {
        self.selected.as_ref().and_then(|id| self.find(id))
    }

    /// True when the selected id no longer exists in the collection
    pub fn is_selection_stale(&self) -> bool {
        self.selected.is_some() && self.selected_template().is_none()
    }

    /// Text the next ask would send
    ///
    /// Selected template prompt, else free text verbatim. A stale selection
    /// resolves to `None`.
    pub fn effective_prompt(&self) -> Option<&str> {
        match &self.selected {
            Some(id) => self.find(id).map(|t| t.prompt.as_str()),
            None => Some(self.free_text.as_str()),
        }
    }

    /// Idle -> AwaitingAnswer
    ///
    /// Resolves the prompt at this instant. Returns `None` (and changes
    /// nothing) when there is no prompt to send.
    pub fn begin_ask(&mut self) -> Option<String> {
        let prompt = self.effective_prompt()?.to_string();
        self.asks_in_flight += 1;
        debug!(in_flight = self.asks_in_flight, "begin_ask: ask started");
        Some(prompt)
    }

    /// Fold a finished request into the session
    ///
    /// Returns the events observers should see.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<SessionEvent> {
        debug!(?outcome, "apply: called");
        let mut events = Vec::new();
        match outcome {
            Outcome::Refreshed(templates) | Outcome::Duplicated(templates) => {
                if let Some(templates) = templates {
                    self.replace_templates(templates);
                    events.push(SessionEvent::TemplatesRefreshed {
                        count: self.templates.len(),
                    });
                }
            }
            Outcome::Removed { id, templates } => {
                debug!(%id, "apply: template removed");
                if let Some(templates) = templates {
                    self.replace_templates(templates);
                    events.push(SessionEvent::TemplatesRefreshed {
                        count: self.templates.len(),
                    });
                }
                if self.selected.is_some() {
                    self.clear_selection();
                    events.push(SessionEvent::SelectionChanged { selected: None });
                }
            }
            Outcome::Answered(answer) => {
                self.asks_in_flight = self.asks_in_flight.saturating_sub(1);
                if let Some(answer) = answer {
                    self.answer = Some(answer);
                    events.push(SessionEvent::AnswerReceived);
                }
            }
        }
        events
    }
}
