//! Request controller
//!
//! Owns the [`Session`] and drives every backend interaction:
//! - `init` is the one-time fetch on start
//! - each user action spawns a tokio task that reports back an [`Outcome`]
//! - outcomes are applied to the session in arrival order (last writer wins)
//!
//! Concurrent actions are not serialized. Two quick asks race, and whichever
//! answer arrives last is the one kept.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

mod messages;
mod orchestrator;

pub use messages::{Outcome, SessionEvent};
pub use orchestrator::Orchestrator;

use crate::backend::TemplateBackend;
use crate::domain::TemplateId;
use crate::session::Session;

/// Capacity of the observer broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Session owner and request dispatcher
pub struct Controller {
    session: Session,
    orchestrator: Orchestrator,
    outcome_tx: mpsc::UnboundedSender<Outcome>,
    outcome_rx: mpsc::UnboundedReceiver<Outcome>,
    event_tx: broadcast::Sender<SessionEvent>,
    /// Spawned tasks whose outcome has not been applied yet
    pending: usize,
    initialized: bool,
}

impl Controller {
    pub fn new(backend: Arc<dyn TemplateBackend>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session: Session::new(),
            orchestrator: Orchestrator::new(backend),
            outcome_tx,
            outcome_rx,
            event_tx,
            pending: 0,
            initialized: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Number of requests still in flight
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Subscribe to session change events
    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Start hook: fetch the template list once per controller
    pub fn init(&mut self) {
        if self.initialized {
            debug!("init: already initialized, skipping");
            return;
        }
        info!("Controller initializing, fetching templates");
        self.initialized = true;
        self.refresh();
    }

    /// Re-fetch the template list
    pub fn refresh(&mut self) {
        debug!("refresh: called");
        let orchestrator = self.orchestrator.clone();
        self.spawn(async move { Outcome::Refreshed(orchestrator.refresh().await) });
    }

    /// Send the effective prompt to the backend
    ///
    /// Returns false when nothing was sent (stale selection).
    pub fn submit(&mut self) -> bool {
        let Some(prompt) = self.session.begin_ask() else {
            warn!(
                selected = ?self.session.selected_id(),
                "submit: selected template no longer exists, nothing sent"
            );
            return false;
        };
        debug!(prompt_len = prompt.len(), "submit: sending ask");
        let orchestrator = self.orchestrator.clone();
        self.spawn(async move { Outcome::Answered(orchestrator.ask(&prompt).await) });
        true
    }

    /// Delete a template, then refresh and clear the selection
    pub fn remove(&mut self, id: TemplateId) {
        debug!(%id, "remove: called");
        let orchestrator = self.orchestrator.clone();
        self.spawn(async move { orchestrator.remove(id).await });
    }

    /// Create a copy of a prompt, then refresh
    pub fn duplicate(&mut self, prompt: impl Into<String>) {
        let prompt = prompt.into();
        debug!(prompt_len = prompt.len(), "duplicate: called");
        let orchestrator = self.orchestrator.clone();
        self.spawn(async move { orchestrator.duplicate(&prompt).await });
    }

    /// Delete button: removes the selected template
    ///
    /// Uses the selected id even if it went stale. No-op without a selection.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.session.selected_id().cloned() else {
            debug!("delete_selected: nothing selected");
            return false;
        };
        self.remove(id);
        true
    }

    /// Copy button: duplicates the selected template's prompt
    ///
    /// No-op without a resolvable selection.
    pub fn copy_selected(&mut self) -> bool {
        let Some(prompt) = self.session.selected_template().map(|t| t.prompt.clone()) else {
            debug!("copy_selected: no resolvable selection");
            return false;
        };
        self.duplicate(prompt);
        true
    }

    /// Select a template by id; unknown ids clear the selection
    pub fn select_template(&mut self, id: &TemplateId) -> bool {
        let before = self.session.selected_id().cloned();
        let found = self.session.select_template(id);
        self.notify_selection(before);
        found
    }

    /// Select the blank entry
    pub fn clear_selection(&mut self) {
        let before = self.session.selected_id().cloned();
        self.session.clear_selection();
        self.notify_selection(before);
    }

    /// Update the free-text input (does not deselect)
    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.session.set_free_text(text);
    }

    /// Apply every outcome that has already arrived, without waiting
    ///
    /// Returns how many were applied.
    pub fn apply_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Wait until every spawned request has finished and been applied
    pub async fn settle(&mut self) {
        debug!(pending = self.pending, "settle: called");
        while self.pending > 0 {
            match self.outcome_rx.recv().await {
                Some(outcome) => self.apply(outcome),
                None => break,
            }
        }
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Outcome> + Send + 'static,
    {
        self.pending += 1;
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = task.await;
            if tx.send(outcome).is_err() {
                debug!("spawn: controller dropped before outcome arrived");
            }
        });
    }

    fn apply(&mut self, outcome: Outcome) {
        self.pending = self.pending.saturating_sub(1);
        for event in self.session.apply(outcome) {
            // No subscribers is fine
            let _ = self.event_tx.send(event);
        }
    }

    fn notify_selection(&self, before: Option<TemplateId>) {
        let after = self.session.selected_id().cloned();
        if before != after {
            let _ = self.event_tx.send(SessionEvent::SelectionChanged { selected: after });
        }
    }
}
