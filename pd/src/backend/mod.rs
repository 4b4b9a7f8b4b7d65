//! Template backend client
//!
//! The backend stores templates and answers questions over a small JSON HTTP
//! API. Everything above this module talks to it through [`TemplateBackend`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

mod error;
mod http;
#[cfg(test)]
pub mod mock;

pub use error::BackendError;
pub use http::HttpBackend;

use crate::config::BackendConfig;
use crate::domain::{Answer, Template, TemplateId};

/// The four backend operations
///
/// Implementations are stateless; every call is an independent request.
#[async_trait]
pub trait TemplateBackend: Send + Sync {
    /// GET /templates
    async fn list_templates(&self) -> Result<Vec<Template>, BackendError>;

    /// POST /ask
    async fn ask(&self, prompt: &str) -> Result<Answer, BackendError>;

    /// DELETE /templates/{id}
    async fn delete_template(&self, id: &TemplateId) -> Result<(), BackendError>;

    /// POST /templates
    async fn create_template(&self, prompt: &str) -> Result<(), BackendError>;
}

/// Create the HTTP backend described by config
pub fn create_backend(config: &BackendConfig) -> Result<Arc<dyn TemplateBackend>, BackendError> {
    debug!(base_url = %config.base_url, "create_backend: called");
    Ok(Arc::new(HttpBackend::from_config(config)?))
}
