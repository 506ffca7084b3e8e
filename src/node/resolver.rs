use crate::nav::{NavError, NavTarget};
use crate::node::context::NodeContext;
use crate::node::Node;

/// Maps a navigation target to a freshly constructed child node.
///
/// Implementations match exhaustively on the target enum, so every member
/// has a branch at compile time. Resolution may read `ctx` (restored state,
/// scope) but must not touch the parent's model.
pub trait ChildResolver<T: NavTarget>: Send {
    fn resolve(&self, target: &T, ctx: NodeContext) -> Result<Box<dyn Node>, NavError>;
}

impl<T, F> ChildResolver<T> for F
where
    T: NavTarget,
    F: Fn(&T, NodeContext) -> Result<Box<dyn Node>, NavError> + Send,
{
    fn resolve(&self, target: &T, ctx: NodeContext) -> Result<Box<dyn Node>, NavError> {
        self(target, ctx)
    }
}
