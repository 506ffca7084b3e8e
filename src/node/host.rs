//! Host entry point and the serialized command queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::nav::{NavError, NodePath, Operation};
use crate::node::context::NodeContext;
use crate::node::parent::Transition;
use crate::node::view::{ActionCommand, NodeView, ScreenAction};
use crate::node::Node;
use crate::store::{StateStore, StoreError};

/// A navigation operation addressed to a node by path.
///
/// `origin` is the token of the task that posted it. Once that token is
/// cancelled the command is stale: its node was released, or the work that
/// produced it was superseded, and it must not reach whatever lives at
/// `path` now.
#[derive(Debug, Clone)]
pub struct Command {
    pub path: NodePath,
    pub operation: Operation<String>,
    pub origin: CancellationToken,
}

impl Command {
    pub fn is_stale(&self) -> bool {
        self.origin.is_cancelled()
    }
}

/// Sending half of the host's command queue.
///
/// Background tasks never touch models directly; they post commands here
/// and the host applies them on its own thread in arrival order.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Command>,
}

impl Dispatcher {
    pub fn channel() -> (Dispatcher, CommandQueue) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Dispatcher { tx }, CommandQueue { rx })
    }

    /// Queue an operation on behalf of the task owning `origin`.
    /// Returns `false` if the host is gone.
    pub fn post(
        &self,
        origin: &CancellationToken,
        path: NodePath,
        operation: Operation<String>,
    ) -> bool {
        self.tx
            .send(Command {
                path,
                operation,
                origin: origin.clone(),
            })
            .is_ok()
    }
}

/// Receiving half of the host's command queue.
pub struct CommandQueue {
    rx: mpsc::UnboundedReceiver<Command>,
}

impl CommandQueue {
    pub fn try_next(&mut self) -> Option<Command> {
        self.rx.try_recv().ok()
    }

    pub async fn next(&mut self) -> Option<Command> {
        self.rx.recv().await
    }
}

/// Platform-provided data for mounting the root node.
#[derive(Clone)]
pub struct RootContext {
    pub store: Arc<dyn StateStore>,
}

/// Mount the root node. Called once per process/window lifetime.
pub fn mount_root<F>(root: RootContext, build: F) -> Result<NavHost, NavError>
where
    F: FnOnce(NodeContext) -> Result<Box<dyn Node>, NavError>,
{
    let (dispatcher, queue) = Dispatcher::channel();
    let ctx = NodeContext::root(Arc::clone(&root.store), dispatcher.clone());
    let node = build(ctx)?;
    tracing::info!(path = %node.path(), "Root mounted");
    Ok(NavHost {
        root: node,
        store: root.store,
        dispatcher,
        queue,
        transition: Transition::default(),
    })
}

/// Handle to a mounted tree.
pub struct NavHost {
    root: Box<dyn Node>,
    store: Arc<dyn StateStore>,
    dispatcher: Dispatcher,
    queue: CommandQueue,
    transition: Transition,
}

impl NavHost {
    /// Transition used for [`ActionCommand::ScrollAnimated`] actions.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn view(&self) -> NodeView {
        self.root.view()
    }

    pub fn root(&self) -> &dyn Node {
        self.root.as_ref()
    }

    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Apply an operation to the node at `path`.
    pub fn dispatch(&mut self, path: &NodePath, operation: Operation<String>) -> Result<u64, NavError> {
        let route = self
            .root
            .path()
            .route_to(path)
            .ok_or_else(|| NavError::NodeNotFound { path: path.clone() })?;
        self.root.dispatch(route, operation)
    }

    /// Execute a user-facing action from a view.
    pub fn perform(&mut self, action: &ScreenAction) -> Result<(), NavError> {
        tracing::debug!(path = %action.path, label = %action.label, "Action performed");
        match &action.command {
            ActionCommand::Apply(operation) => {
                self.dispatch(&action.path, operation.clone()).map(|_| ())
            }
            ActionCommand::ScrollAnimated(index) => {
                let route = self
                    .root
                    .path()
                    .route_to(&action.path)
                    .ok_or_else(|| NavError::NodeNotFound {
                        path: action.path.clone(),
                    })?;
                self.root.animate(route, *index, self.transition)
            }
        }
    }

    /// Offer a back event to the tree. Returns `true` if a node consumed it.
    pub fn back(&mut self) -> bool {
        let consumed = self.root.handle_back();
        tracing::debug!(consumed, "Back event");
        consumed
    }

    /// Apply a queued command. Stale commands are dropped with
    /// [`NavError::StaleCommand`].
    pub fn apply_command(&mut self, command: Command) -> Result<u64, NavError> {
        if command.is_stale() {
            tracing::debug!(
                path = %command.path,
                operation = command.operation.name(),
                "Stale command dropped"
            );
            return Err(NavError::StaleCommand { path: command.path });
        }
        let route = self
            .root
            .path()
            .route_to(&command.path)
            .ok_or_else(|| NavError::NodeNotFound {
                path: command.path.clone(),
            })?;
        let result = self.root.dispatch_posted(route, command.operation);
        if let Err(err) = &result {
            tracing::debug!(path = %command.path, error = %err, "Queued command rejected");
        }
        result
    }

    /// Apply every command queued so far. Returns how many were applied successfully.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.queue.try_next() {
            if self.apply_command(command).is_ok() {
                applied += 1;
            }
        }
        applied
    }

    /// Wait for the next queued command.
    pub async fn next_command(&mut self) -> Option<Command> {
        self.queue.next().await
    }

    /// Persist every model and flush the store, e.g. before suspension.
    pub fn save_all(&self) -> Result<(), StoreError> {
        self.root.save_state();
        self.store.flush()
    }

    /// Save state, then tear the tree down depth-first.
    pub fn release(mut self) -> Result<(), StoreError> {
        let saved = self.save_all();
        self.root.release();
        tracing::info!("Root released");
        saved
    }
}
