//! HTTP implementation of the template backend
//!
//! Plain JSON over reqwest. No auth, no retries, no request timeout.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::json;
use tracing::{debug, warn};

use super::{BackendError, TemplateBackend};
use crate::config::BackendConfig;
use crate::domain::{Answer, Template, TemplateId};

/// reqwest-backed client for the template backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    /// Create a new client from backend configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, BackendError> {
        debug!(?config, "from_config: called");
        Self::new(&config.base_url)
    }

    /// Create a new client for the given base URL
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let base_url = normalize_base_url(base_url)?;
        let http = Client::builder().build().map_err(BackendError::Network)?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a single template, with the id percent-encoded as one path segment
    fn template_url(&self, id: &TemplateId) -> Result<Url, BackendError> {
        let base = self.url("/templates");
        let mut url = Url::parse(&base).map_err(|e| BackendError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl {
                url: base.clone(),
                reason: "cannot be a base".to_string(),
            })?
            .push(&id.to_string());
        Ok(url)
    }
}

/// Trim trailing slashes and check the scheme
fn normalize_base_url(base_url: &str) -> Result<String, BackendError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(BackendError::InvalidUrl {
            url: base_url.to_string(),
            reason: "expected http:// or https://".to_string(),
        });
    }
    Url::parse(trimmed).map_err(|e| BackendError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}

/// Turn a non-2xx response into an error
async fn check_status(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), %body, "check_status: non-success response");
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl TemplateBackend for HttpBackend {
    async fn list_templates(&self) -> Result<Vec<Template>, BackendError> {
        let url = self.url("/templates");
        debug!(%url, "list_templates: called");

        let response = check_status(self.http.get(&url).send().await?).await?;
        let text = response.text().await?;

        // An empty table comes back as `null`
        let templates: Option<Vec<Template>> =
            serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))?;
        let templates = templates.unwrap_or_default();

        debug!(count = templates.len(), "list_templates: success");
        Ok(templates)
    }

    async fn ask(&self, prompt: &str) -> Result<Answer, BackendError> {
        let url = self.url("/ask");
        debug!(%url, prompt_len = prompt.len(), "ask: called");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;
        let response = check_status(response).await?;
        let text = response.text().await?;

        let answer: Answer = serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))?;
        debug!("ask: success");
        Ok(answer)
    }

    async fn delete_template(&self, id: &TemplateId) -> Result<(), BackendError> {
        let url = self.template_url(id)?;
        debug!(%url, "delete_template: called");

        let response = self.http.delete(url).send().await?;
        if !response.status().is_success() {
            // Body is ignored either way; the caller refreshes regardless
            warn!(status = response.status().as_u16(), %id, "delete_template: non-success status");
        }
        Ok(())
    }

    async fn create_template(&self, prompt: &str) -> Result<(), BackendError> {
        let url = self.url("/templates");
        debug!(%url, prompt_len = prompt.len(), "create_template: called");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(&json!({ "prompt": prompt }))
            .send()
            .await?;
        if !response.status().is_success() {
            warn!(status = response.status().as_u16(), "create_template: non-success status");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8080/").unwrap(),
            "http://localhost:8080"
        );
        assert_eq!(
            normalize_base_url(" https://example.com ").unwrap(),
            "https://example.com"
        );
        assert!(matches!(
            normalize_base_url("localhost:8080"),
            Err(BackendError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_url_join() {
        let backend = HttpBackend::new("http://localhost:8080/").unwrap();
        assert_eq!(backend.url("/templates"), "http://localhost:8080/templates");
        assert_eq!(backend.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_template_url_encodes_id() {
        let backend = HttpBackend::new("http://localhost:8080/api/").unwrap();
        let url = |id: TemplateId| backend.template_url(&id).unwrap().to_string();

        assert_eq!(url(TemplateId::Int(7)), "http://localhost:8080/api/templates/7");
        assert_eq!(url(TemplateId::from("a/b")), "http://localhost:8080/api/templates/a%2Fb");
        assert_eq!(url(TemplateId::from("x#y")), "http://localhost:8080/api/templates/x%23y");
        assert_eq!(url(TemplateId::from("q?z=1")), "http://localhost:8080/api/templates/q%3Fz=1");
    }

    #[test]
    fn test_from_default_config() {
        let backend = HttpBackend::from_config(&BackendConfig::default()).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:8080");
    }
}
