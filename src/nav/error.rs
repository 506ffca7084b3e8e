use thiserror::Error;

use crate::lifecycle::ScopeError;
use crate::nav::target::NodePath;

/// Errors produced by navigation models and nodes.
///
/// All variants are contained within the node that produced them; a
/// failing child never changes its parent's model or its siblings.
#[derive(Debug, Error)]
pub enum NavError {
    /// Operation precondition violated. The model is unchanged.
    #[error("Invalid operation '{operation}': {reason}")]
    InvalidOperation {
        operation: &'static str,
        reason: String,
    },

    /// A state failed its invariants (empty sequence, position out of bounds).
    #[error("Invalid navigation state: {reason}")]
    InvalidState { reason: String },

    /// A target could not be turned into a child node.
    #[error("Target '{target}' cannot be resolved at '{path}'")]
    UnresolvedTarget { path: NodePath, target: String },

    /// No node lives at the requested path.
    #[error("No node at '{path}'")]
    NodeNotFound { path: NodePath },

    /// The node has been released and accepts no further operations.
    #[error("Node '{path}' has been released")]
    Released { path: NodePath },

    /// A queued command whose posting task was cancelled before it was applied.
    #[error("Dropped stale command for '{path}'")]
    StaleCommand { path: NodePath },

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl NavError {
    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        NavError::InvalidOperation {
            operation,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        NavError::InvalidState {
            reason: reason.into(),
        }
    }
}
