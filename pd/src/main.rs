//! promptdesk - terminal client for prompt templates
//!
//! CLI entry point: interactive TUI by default, one-shot subcommands otherwise.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use promptdesk::cli::{Cli, Command, resolve_template_id};
use promptdesk::config::Config;
use promptdesk::{Controller, Template, TemplateId, create_backend, tui};

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptdesk")
        .join("logs")
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Logs go to a file so they never draw over the TUI
    let log_dir = log_dir();
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("promptdesk.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.backend.base_url = base_url;
    }
    info!(base_url = %config.backend.base_url, "promptdesk starting");

    let backend = create_backend(&config.backend).context("Failed to create backend client")?;
    let mut controller = Controller::new(backend);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => tui::run(controller, config.tui.tick_rate()).await,
        Command::List => {
            controller.init();
            controller.settle().await;
            print_templates(controller.session().templates());
            Ok(())
        }
        Command::Ask { template, text } => {
            controller.init();
            controller.settle().await;
            if let Some(input) = template {
                match resolve_template_id(controller.session().templates(), &input) {
                    Some(id) => {
                        controller.select_template(&id);
                    }
                    None => eprintln!("{} Template {} not found, asking with text", "!".yellow(), input),
                }
            }
            controller.set_free_text(text.join(" "));
            controller.submit();
            controller.settle().await;
            match controller.session().answer() {
                Some(answer) => println!("{}", answer),
                None => eprintln!(
                    "{} No answer (see {})",
                    "✗".red(),
                    log_dir().join("promptdesk.log").display()
                ),
            }
            Ok(())
        }
        Command::Copy { id } => {
            select_for_mutation(&mut controller, &id).await?;
            let before = controller.session().templates().len();
            controller.copy_selected();
            controller.settle().await;
            // Failures are only logged, so report what the refreshed list shows
            let landed = controller.session().templates().len() > before;
            println!("{}", mutation_summary("Copied", "copy", &id, landed));
            print_templates(controller.session().templates());
            Ok(())
        }
        Command::Delete { id } => {
            let target = select_for_mutation(&mut controller, &id).await?;
            controller.delete_selected();
            controller.settle().await;
            let landed = controller.session().find(&target).is_none();
            println!("{}", mutation_summary("Deleted", "delete", &id, landed));
            print_templates(controller.session().templates());
            Ok(())
        }
    }
}

/// Fetch the list and select `id`, the way a user would before pressing a button
async fn select_for_mutation(controller: &mut Controller, input: &str) -> Result<TemplateId> {
    controller.init();
    controller.settle().await;
    let id = resolve_template_id(controller.session().templates(), input)
        .ok_or_else(|| eyre::eyre!("Template {} not found", input))?;
    controller.select_template(&id);
    Ok(id)
}

fn print_templates(templates: &[Template]) {
    if templates.is_empty() {
        println!("No templates found");
        return;
    }
    for t in templates {
        println!("{:>4}  {}", t.id.to_string().yellow(), t.prompt);
    }
}

/// One-line result of a copy/delete; claims success only when the refreshed list shows it
fn mutation_summary(done: &str, verb: &str, id: &str, landed: bool) -> String {
    if landed {
        format!("{} {} template {}", "✓".green(), done, id.cyan())
    } else {
        format!("{} Requested {} of template {}", "!".yellow(), verb, id.cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_summary_only_claims_visible_changes() {
        let ok = mutation_summary("Deleted", "delete", "3", true);
        assert!(ok.contains("Deleted template"));
        assert!(ok.contains('3'));

        let unconfirmed = mutation_summary("Deleted", "delete", "3", false);
        assert!(unconfirmed.contains("Requested delete of template"));
        assert!(!unconfirmed.contains('✓'));
    }
}
