//! Domain types for promptdesk
//!
//! Core domain types: Template, TemplateId, Answer.
//! The client never edits these in place; collections are replaced wholesale
//! with whatever the backend returns.

mod answer;
mod id;
mod template;

pub use answer::Answer;
pub use id::TemplateId;
pub use template::Template;
