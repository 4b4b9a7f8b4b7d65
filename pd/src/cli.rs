//! CLI argument parsing for promptdesk

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::{Template, TemplateId};

/// promptdesk - ask questions from saved prompt templates
#[derive(Parser, Debug)]
#[command(name = "pd")]
#[command(author, version, about = "Ask questions from saved prompt templates", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Backend base URL (overrides config)
    #[arg(short = 'u', long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Subcommand to execute (default: tui)
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive terminal UI
    Tui,

    /// List saved templates
    List,

    /// Ask a question, from a template or free text
    Ask {
        /// Template ID to ask with (takes precedence over TEXT)
        #[arg(short, long)]
        template: Option<String>,

        /// Question text
        text: Vec<String>,
    },

    /// Duplicate a template
    Copy {
        /// Template ID to copy
        #[arg(required = true)]
        id: String,
    },

    /// Delete a template
    Delete {
        /// Template ID to delete
        #[arg(required = true)]
        id: String,
    },
}

/// Match a command-line id against the fetched templates by its textual form
///
/// Ids stay opaque: `007` only matches a template whose id prints as `007`.
pub fn resolve_template_id(templates: &[Template], input: &str) -> Option<TemplateId> {
    let input = input.trim();
    templates.iter().find(|t| t.id.to_string() == input).map(|t| t.id.clone())
}
