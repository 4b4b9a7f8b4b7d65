//! Template ID handling
//!
//! The backend assigns IDs. They arrive as JSON numbers today, but the client
//! treats them as opaque and keeps whichever form the server sent.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned template identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateId {
    Int(i64),
    Str(String),
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for TemplateId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for TemplateId {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
