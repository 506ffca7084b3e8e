//! Node tree composition.
//!
//! A [`ParentNode`] owns one navigation model and materialises a child
//! node for every element of the model's active sequence. A [`LeafNode`]
//! wraps an externally supplied [`Screen`]. Both are driven through the
//! [`Node`] trait so a parent can hold children of any target type.

mod context;
mod host;
mod leaf;
mod parent;
mod resolver;
mod view;

pub use context::NodeContext;
pub use host::{mount_root, Command, CommandQueue, Dispatcher, NavHost, RootContext};
pub use leaf::{LeafNode, Screen};
pub use parent::{ParentNode, ReconcileStats, Transition};
pub use resolver::ChildResolver;
pub use view::{ActionCommand, ContainerView, NodeView, ScreenAction, ScreenView};

use crate::nav::{NavError, NodePath, Operation};

/// A long-lived unit of the navigation tree.
///
/// Lifecycle: constructed (state loaded or initial) → active → released.
/// Released is terminal; every further operation is rejected.
pub trait Node: Send {
    fn path(&self) -> &NodePath;

    /// Render snapshot of this node and its subtree.
    fn view(&self) -> NodeView;

    /// Route a string-keyed operation to the node at `route` below this one.
    /// An empty route addresses this node.
    fn dispatch(&mut self, route: &[String], operation: Operation<String>)
        -> Result<u64, NavError>;

    /// Route an operation posted by a background task in this subtree.
    ///
    /// Same routing as [`dispatch`](Self::dispatch), but it does not
    /// interrupt a running carousel animation the way a direct move does.
    fn dispatch_posted(
        &mut self,
        route: &[String],
        operation: Operation<String>,
    ) -> Result<u64, NavError> {
        self.dispatch(route, operation)
    }

    /// Animate a carousel at `route` to `index`.
    fn animate(
        &mut self,
        route: &[String],
        index: usize,
        transition: Transition,
    ) -> Result<(), NavError> {
        let _ = (index, transition);
        if route.is_empty() {
            Err(NavError::invalid("animate", "node has no carousel"))
        } else {
            Err(NavError::NodeNotFound {
                path: route.iter().fold(self.path().clone(), |p, s| p.child(s)),
            })
        }
    }

    /// Offer a back event to this subtree. Returns `true` if consumed.
    fn handle_back(&mut self) -> bool;

    /// Write every model in this subtree to the store.
    fn save_state(&self);

    /// Tear down this subtree, children first. Persisted state is kept.
    fn release(&mut self);

    /// Release and drop this subtree's persisted state.
    fn discard(&mut self);

    fn is_released(&self) -> bool;
}
