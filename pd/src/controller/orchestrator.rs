//! Request orchestration
//!
//! Issues the four backend calls and chains the refresh after each mutation.
//! Every failure is logged here and turned into an empty payload; nothing
//! propagates past this point.

use std::sync::Arc;

use tracing::{debug, warn};

use super::Outcome;
use crate::backend::TemplateBackend;
use crate::domain::{Answer, Template, TemplateId};

/// Stateless request runner around a backend
#[derive(Clone)]
pub struct Orchestrator {
    backend: Arc<dyn TemplateBackend>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn TemplateBackend>) -> Self {
        Self { backend }
    }

    /// Fetch the full template list
    pub async fn refresh(&self) -> Option<Vec<Template>> {
        debug!("refresh: called");
        match self.backend.list_templates().await {
            Ok(templates) => {
                debug!(count = templates.len(), "refresh: fetched templates");
                Some(templates)
            }
            Err(e) => {
                warn!(error = %e, "Error fetching templates");
                None
            }
        }
    }

    /// Send one question
    pub async fn ask(&self, prompt: &str) -> Option<Answer> {
        debug!(prompt_len = prompt.len(), "ask: called");
        match self.backend.ask(prompt).await {
            Ok(answer) => Some(answer),
            Err(e) => {
                warn!(error = %e, "Error asking question");
                None
            }
        }
    }

    /// Delete, then refresh
    ///
    /// The refresh is issued only after the delete response resolves, and is
    /// issued whether or not the delete succeeded.
    pub async fn remove(&self, id: TemplateId) -> Outcome {
        debug!(%id, "remove: called");
        if let Err(e) = self.backend.delete_template(&id).await {
            warn!(error = %e, %id, "Error deleting template");
        }
        let templates = self.refresh().await;
        Outcome::Removed { id, templates }
    }

    /// Create a copy, then refresh
    pub async fn duplicate(&self, prompt: &str) -> Outcome {
        debug!(prompt_len = prompt.len(), "duplicate: called");
        if let Err(e) = self.backend.create_template(prompt).await {
            warn!(error = %e, "Error copying template");
        }
        Outcome::Duplicated(self.refresh().await)
    }
}
