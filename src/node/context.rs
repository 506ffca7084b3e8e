use std::sync::Arc;

use crate::lifecycle::LifecycleScope;
use crate::nav::NodePath;
use crate::node::host::Dispatcher;
use crate::store::StateStore;

/// Ambient data handed to a node at construction.
///
/// The context owns the node's [`LifecycleScope`]; a child's scope is
/// derived from its parent's so cancellation flows down the tree.
pub struct NodeContext {
    path: NodePath,
    store: Arc<dyn StateStore>,
    scope: LifecycleScope,
    dispatcher: Dispatcher,
}

impl NodeContext {
    pub fn root(store: Arc<dyn StateStore>, dispatcher: Dispatcher) -> Self {
        let path = NodePath::root();
        Self {
            scope: LifecycleScope::new(path.to_string()),
            path,
            store,
            dispatcher,
        }
    }

    /// Context for a child mounted under `segment`.
    pub fn child(&self, segment: &str) -> Self {
        let path = self.path.child(segment);
        Self {
            scope: self.scope.child(path.to_string()),
            path,
            store: Arc::clone(&self.store),
            dispatcher: self.dispatcher.clone(),
        }
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn store(&self) -> Arc<dyn StateStore> {
        Arc::clone(&self.store)
    }

    pub fn scope(&self) -> &LifecycleScope {
        &self.scope
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
