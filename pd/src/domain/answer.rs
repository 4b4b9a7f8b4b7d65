//! Answer payload from the ask endpoint

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque answer value, rendered as text
///
/// The backend may answer with a plain JSON string or any structured value.
/// Strings render verbatim; everything else renders as compact JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answer(Value);

impl Answer {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Raw JSON value as received
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Text suitable for display
    pub fn render(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl From<&str> for Answer {
    fn from(s: &str) -> Self {
        Self(Value::String(s.to_string()))
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
