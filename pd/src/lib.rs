//! promptdesk - ask questions from saved prompt templates
//!
//! A terminal client for a small question-answering backend. The user either
//! types a question or picks one of the templates stored on the backend, and
//! can duplicate or delete templates.
//!
//! # Core Concepts
//!
//! - **One owner**: [`Session`] holds the template list, selection, free text
//!   and latest answer; nothing else mutates them
//! - **Template wins**: while a template is selected its prompt is sent, no
//!   matter what has been typed
//! - **Refresh, never patch**: every mutation is followed by a full re-fetch
//! - **Unordered requests**: concurrent requests race; the last response applied wins
//!
//! # Modules
//!
//! - [`backend`] - backend trait and HTTP client
//! - [`controller`] - request orchestration and outcome application
//! - [`session`] - client state container
//! - [`domain`] - template, id and answer types
//! - [`tui`] - terminal user interface
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface
//!
//! # Example
//!
//! ```ignore
//! use promptdesk::{Controller, TemplateId, backend::HttpBackend};
//!
//! let backend = Arc::new(HttpBackend::new("http://localhost:8080")?);
//! let mut controller = Controller::new(backend);
//! controller.init();
//! controller.settle().await;
//! controller.select_template(&TemplateId::Int(2));
//! controller.submit();
//! controller.settle().await;
//! println!("{}", controller.session().answer().unwrap());
//! ```

pub mod backend;
pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod session;
pub mod tui;

pub use backend::{BackendError, HttpBackend, TemplateBackend, create_backend};
pub use config::Config;
pub use controller::{Controller, Orchestrator, Outcome, SessionEvent};
pub use domain::{Answer, Template, TemplateId};
pub use session::{AskState, Session};
