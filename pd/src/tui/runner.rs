//! TUI Runner - main loop that owns the terminal and the controller
//!
//! The TuiRunner is responsible for:
//! - Calling the controller's start hook once
//! - Applying finished requests on every tick
//! - Dispatching key events to App and App's actions to the controller
//! - Rendering

use std::time::Duration;

use eyre::Result;
use tracing::debug;

use crate::controller::Controller;

use super::Tui;
use super::app::{App, PendingAction};
use super::events::{Event, EventHandler};
use super::views;

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// UI state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Session owner
    controller: Controller,
    /// Event handler
    event_handler: EventHandler,
}

impl TuiRunner {
    pub fn new(terminal: Tui, controller: Controller, tick_rate: Duration) -> Self {
        Self {
            app: App::new(),
            terminal,
            controller,
            event_handler: EventHandler::new(tick_rate),
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        self.controller.init();

        loop {
            self.controller.apply_ready();
            self.app.clamp_cursor(self.controller.session().templates().len());

            let app = &self.app;
            let session = self.controller.session();
            let pending = self.controller.pending();
            self.terminal.draw(|frame| views::render(app, session, pending, frame))?;

            match self.event_handler.next().await? {
                Event::Tick | Event::Resize(..) => {}
                Event::Key(key_event) => {
                    if self.app.handle_key(key_event, self.controller.session()) {
                        break;
                    }
                }
            }

            for action in self.app.take_actions() {
                dispatch(&mut self.controller, action);
            }

            if self.app.should_quit {
                break;
            }
        }

        debug!(pending = self.controller.pending(), "run: exiting with requests in flight");
        Ok(())
    }
}

/// Route one UI action into the controller
pub(crate) fn dispatch(controller: &mut Controller, action: PendingAction) {
    debug!(?action, "dispatch: called");
    match action {
        PendingAction::Select(Some(id)) => {
            controller.select_template(&id);
        }
        PendingAction::Select(None) => controller.clear_selection(),
        PendingAction::SetFreeText(text) => controller.set_free_text(text),
        PendingAction::Ask => {
            controller.submit();
        }
        PendingAction::Copy => {
            controller.copy_selected();
        }
        PendingAction::Delete => {
            controller.delete_selected();
        }
        PendingAction::Refresh => controller.refresh(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::mock::{Call, MockBackend};
    use crate::domain::{Template, TemplateId};

    #[tokio::test]
    async fn test_dispatch_routes_actions() {
        let backend = Arc::new(MockBackend::new(vec![Template::new(1, "Hello"), Template::new(2, "World")]));
        let mut controller = Controller::new(backend.clone());
        controller.init();
        controller.settle().await;

        dispatch(&mut controller, PendingAction::Select(Some(TemplateId::Int(2))));
        dispatch(&mut controller, PendingAction::SetFreeText("ignored text".to_string()));
        dispatch(&mut controller, PendingAction::Ask);
        controller.settle().await;
        dispatch(&mut controller, PendingAction::Delete);
        controller.settle().await;

        assert_eq!(
            backend.calls(),
            vec![
                Call::List,
                Call::Ask("World".to_string()),
                Call::Delete(TemplateId::Int(2)),
                Call::List,
            ]
        );
        assert_eq!(controller.session().selected_id(), None);
        assert_eq!(controller.session().free_text(), "ignored text");
    }
}
