use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::nav::NodePath;
use crate::store::StateStore;

/// Thread-safe in-memory state store.
///
/// Cloning shares the underlying map, so a clone handed to a second
/// mount sees everything the first one saved.
#[derive(Clone, Default)]
pub struct MemoryStateStore {
    inner: Arc<RwLock<BTreeMap<NodePath, String>>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn paths(&self) -> Vec<NodePath> {
        self.inner.read().keys().cloned().collect()
    }

    /// Overwrite an entry with arbitrary content, bypassing the codec.
    pub fn insert_raw(&self, path: NodePath, blob: impl Into<String>) {
        self.inner.write().insert(path, blob.into());
    }
}

impl StateStore for MemoryStateStore {
    fn save(&self, path: &NodePath, blob: &str) {
        self.inner.write().insert(path.clone(), blob.to_string());
    }

    fn load(&self, path: &NodePath) -> Option<String> {
        self.inner.read().get(path).cloned()
    }

    fn remove(&self, path: &NodePath) {
        self.inner.write().retain(|key, _| !path.contains(key));
    }
}
