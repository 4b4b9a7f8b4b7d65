//! Controller messages
//!
//! Outcomes flow from spawned request tasks back to the session owner;
//! events flow from the session owner out to observers.

use crate::domain::{Answer, Template, TemplateId};

/// Result of one finished request task
///
/// `None` payloads mean the request failed; the failure has already been
/// logged by the task that produced the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A plain list refresh finished
    Refreshed(Option<Vec<Template>>),
    /// Delete then refresh finished
    Removed {
        id: TemplateId,
        templates: Option<Vec<Template>>,
    },
    /// Create then refresh finished
    Duplicated(Option<Vec<Template>>),
    /// An ask finished
    Answered(Option<Answer>),
}

/// Event broadcast when session state changes
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The template collection was replaced
    TemplatesRefreshed { count: usize },
    /// The selected template changed
    SelectionChanged { selected: Option<TemplateId> },
    /// A new answer replaced the previous one
    AnswerReceived,
}
