use crate::nav::NavError;
use crate::node::{Command, NavHost, NodeView};
use crate::store::StoreError;

/// One-line feedback shown in the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    Info(String),
    Error(String),
}

/// UI state around the mounted tree.
pub struct App {
    host: NavHost,
    view: NodeView,
    should_quit: bool,
    status: Option<StatusLine>,
}

impl App {
    pub fn new(host: NavHost) -> Self {
        let view = host.view();
        Self {
            host,
            view,
            should_quit: false,
            status: None,
        }
    }

    /// Snapshot taken after the last change.
    pub fn view(&self) -> &NodeView {
        &self.view
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Trigger the visible action at `index` (zero-based).
    pub fn perform(&mut self, index: usize) {
        let Some(action) = self.view.visible_actions().get(index).map(|a| (*a).clone()) else {
            return;
        };
        let result = self.host.perform(&action);
        self.report(result.map(|_| action.label));
        self.refresh();
    }

    /// Back press. Unconsumed back at the root exits.
    pub fn back(&mut self) {
        if self.host.back() {
            self.status = None;
            self.refresh();
        } else {
            self.request_quit();
        }
    }

    /// Apply a command posted by a background task.
    pub fn on_command(&mut self, command: Command) {
        let applied = self.host.apply_command(command).is_ok();
        // Drain the rest of a burst before redrawing.
        if self.host.pump() > 0 || applied {
            self.refresh();
        }
    }

    /// Periodic redraw; screens such as the countdown read shared state.
    pub fn on_tick(&mut self) {
        self.refresh();
    }

    /// Wait for the next command from a background task.
    pub async fn next_command(&mut self) -> Option<Command> {
        self.host.next_command().await
    }

    /// Save and tear the tree down.
    pub fn shutdown(self) -> Result<(), StoreError> {
        self.host.release()
    }

    fn refresh(&mut self) {
        self.view = self.host.view();
    }

    fn report(&mut self, result: Result<String, NavError>) {
        self.status = Some(match result {
            Ok(label) => StatusLine::Info(label),
            Err(err) => {
                tracing::warn!(error = %err, "Action failed");
                StatusLine::Error(err.to_string())
            }
        });
    }
}
