//! In-memory backend for unit tests
//!
//! Behaves like the real server (ids assigned on create, list in insertion
//! order) and records every call so tests can assert on sequencing.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{BackendError, TemplateBackend};
use crate::domain::{Answer, Template, TemplateId};

/// A backend call as seen by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Ask(String),
    Delete(TemplateId),
    Create(String),
}

/// Scripted ask reply
struct ScriptedAnswer {
    delay: Duration,
    answer: Answer,
}

/// Mock backend for unit tests
pub struct MockBackend {
    templates: Mutex<Vec<Template>>,
    next_id: AtomicI64,
    calls: Mutex<Vec<Call>>,
    answers: Mutex<VecDeque<ScriptedAnswer>>,
    fail_list: AtomicBool,
    fail_ask: AtomicBool,
    fail_delete: AtomicBool,
    fail_create: AtomicBool,
}

impl MockBackend {
    pub fn new(templates: Vec<Template>) -> Self {
        debug!(template_count = %templates.len(), "MockBackend::new: called");
        let next_id = templates
            .iter()
            .filter_map(|t| match t.id {
                TemplateId::Int(n) => Some(n),
                TemplateId::Str(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            templates: Mutex::new(templates),
            next_id: AtomicI64::new(next_id),
            calls: Mutex::new(Vec::new()),
            answers: Mutex::new(VecDeque::new()),
            fail_list: AtomicBool::new(false),
            fail_ask: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            fail_create: AtomicBool::new(false),
        }
    }

    /// Queue an answer returned by the next ask after `delay`
    pub fn push_answer(&self, answer: impl Into<Answer>, delay: Duration) {
        self.answers.lock().unwrap().push_back(ScriptedAnswer {
            delay,
            answer: answer.into(),
        });
    }

    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_ask(&self, fail: bool) {
        self.fail_ask.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Replace the server-side list (simulates another session)
    pub fn set_templates(&self, templates: Vec<Template>) {
        *self.templates.lock().unwrap() = templates;
    }

    pub fn templates(&self) -> Vec<Template> {
        self.templates.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn unavailable() -> BackendError {
        BackendError::Status {
            status: 503,
            body: "mock failure".to_string(),
        }
    }
}

#[async_trait]
impl TemplateBackend for MockBackend {
    async fn list_templates(&self) -> Result<Vec<Template>, BackendError> {
        debug!("MockBackend::list_templates: called");
        self.record(Call::List);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.templates())
    }

    async fn ask(&self, prompt: &str) -> Result<Answer, BackendError> {
        debug!(%prompt, "MockBackend::ask: called");
        self.record(Call::Ask(prompt.to_string()));
        let scripted = self.answers.lock().unwrap().pop_front();
        let answer = match scripted {
            Some(s) => {
                tokio::time::sleep(s.delay).await;
                s.answer
            }
            None => Answer::from(format!("answer: {}", prompt).as_str()),
        };
        if self.fail_ask.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(answer)
    }

    async fn delete_template(&self, id: &TemplateId) -> Result<(), BackendError> {
        debug!(%id, "MockBackend::delete_template: called");
        self.record(Call::Delete(id.clone()));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.templates.lock().unwrap().retain(|t| &t.id != id);
        Ok(())
    }

    async fn create_template(&self, prompt: &str) -> Result<(), BackendError> {
        debug!(%prompt, "MockBackend::create_template: called");
        self.record(Call::Create(prompt.to_string()));
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.templates.lock().unwrap().push(Template::new(id, prompt));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_assigns_fresh_ids() {
        let backend = MockBackend::new(vec![Template::new(1, "Hello"), Template::new(2, "World")]);
        backend.create_template("World").await.unwrap();

        let list = backend.list_templates().await.unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[2], Template::new(3, "World"));
        assert_eq!(
            backend.calls(),
            vec![Call::Create("World".to_string()), Call::List]
        );
    }

    #[tokio::test]
    async fn test_mock_failures() {
        let backend = MockBackend::new(vec![]);
        backend.set_fail_list(true);
        assert!(backend.list_templates().await.is_err());

        backend.set_fail_ask(true);
        assert!(backend.ask("q").await.is_err());
    }
}
