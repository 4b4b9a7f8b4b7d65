//! Prompt template record

use serde::{Deserialize, Serialize};

use super::TemplateId;

/// A saved, reusable prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Server-assigned identifier
    pub id: TemplateId,
    /// Question or instruction text
    pub prompt: String,
}

impl Template {
    pub fn new(id: impl Into<TemplateId>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
        }
    }
}
