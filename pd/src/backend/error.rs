//! Backend error types

use thiserror::Error;

/// Errors that can occur talking to the template backend
///
/// The controller does not distinguish between these; every variant is a
/// transport failure that gets logged and swallowed.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl BackendError {
    /// HTTP status if the backend answered with a non-2xx code
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
