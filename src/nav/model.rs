use std::sync::Arc;

use crate::nav::error::NavError;
use crate::nav::operation::Operation;
use crate::nav::reducer::{NavReducer, Reducer};
use crate::nav::state::NavState;
use crate::nav::target::{NavTarget, NodePath};
use crate::store::{self, StateStore};

/// Handle returned by [`NavigationModel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer<T> = Box<dyn FnMut(&NavState<T>, u64) + Send>;

/// State holder for one node's active children.
///
/// Every successful operation bumps the revision, is written to the
/// [`StateStore`] under the model's path, and is then published to
/// observers synchronously. Rejected operations change nothing.
pub struct NavigationModel<T: NavTarget> {
    path: NodePath,
    state: NavState<T>,
    revision: u64,
    store: Arc<dyn StateStore>,
    observers: Vec<(SubscriptionId, Observer<T>)>,
    next_subscription: u64,
}

impl<T: NavTarget> NavigationModel<T> {
    /// Build a model, seeding it from the store when a usable entry exists.
    ///
    /// Missing, corrupt or mismatched entries fall back to `initial`; the
    /// anomaly is logged. The resulting state is written back so the entry
    /// exists from the first construction onwards.
    pub fn restore(
        path: NodePath,
        store: Arc<dyn StateStore>,
        initial: NavState<T>,
    ) -> Result<Self, NavError> {
        initial.validate()?;

        let state = match store.load(&path) {
            None => {
                tracing::debug!(path = %path, "No persisted navigation state, using initial");
                initial
            }
            Some(blob) => match store::decode(&path, &blob, &initial) {
                Ok(state) => {
                    tracing::debug!(
                        path = %path,
                        depth = state.len(),
                        position = state.position(),
                        "Navigation state restored"
                    );
                    state
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path,
                        error = %err,
                        "Discarding persisted navigation state"
                    );
                    initial
                }
            },
        };

        let model = Self {
            path,
            state,
            revision: 0,
            store,
            observers: Vec::new(),
            next_subscription: 0,
        };
        model.persist();
        Ok(model)
    }

    /// Apply an operation and return the new revision.
    pub fn apply(&mut self, operation: Operation<T>) -> Result<u64, NavError> {
        let name = operation.name();
        let next = match NavReducer::reduce(&self.state, operation) {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(path = %self.path, operation = name, error = %err, "Operation rejected");
                return Err(err);
            }
        };

        self.state = next;
        self.revision += 1;
        self.persist();

        tracing::trace!(
            path = %self.path,
            operation = name,
            revision = self.revision,
            "Operation applied"
        );

        for (_, observer) in self.observers.iter_mut() {
            observer(&self.state, self.revision);
        }
        Ok(self.revision)
    }

    /// Write the current state to the store.
    pub fn persist(&self) {
        match store::encode(&self.path, &self.state) {
            Ok(blob) => self.store.save(&self.path, &blob),
            Err(err) => tracing::error!(path = %self.path, error = %err, "Failed to persist state"),
        }
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&NavState<T>, u64) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn state(&self) -> &NavState<T> {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStateStore;
    use parking_lot::Mutex;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    enum Screen {
        Home,
        Settings,
    }

    impl NavTarget for Screen {
        fn all() -> &'static [Self] {
            &[Self::Home, Self::Settings]
        }

        fn as_str(&self) -> &'static str {
            match self {
                Self::Home => "home",
                Self::Settings => "settings",
            }
        }
    }

    fn model(store: &MemoryStateStore) -> NavigationModel<Screen> {
        NavigationModel::restore(
            NodePath::root(),
            Arc::new(store.clone()),
            NavState::back_stack(Screen::Home),
        )
        .unwrap()
    }

    #[test]
    fn construction_creates_store_entry() {
        let store = MemoryStateStore::new();
        let model = model(&store);
        assert_eq!(model.revision(), 0);
        assert!(store.load(&NodePath::root()).is_some());
    }

    #[test]
    fn rejected_operation_keeps_revision() {
        let store = MemoryStateStore::new();
        let mut model = model(&store);
        assert!(model.apply(Operation::Pop).is_err());
        assert_eq!(model.revision(), 0);
        assert_eq!(model.state().elements(), &[Screen::Home]);
    }

    #[test]
    fn observers_see_each_revision() {
        let store = MemoryStateStore::new();
        let mut model = model(&store);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let id = model.subscribe(move |state, revision| {
            sink.lock().push((state.len(), revision));
        });

        model.apply(Operation::Push(Screen::Settings)).unwrap();
        model.apply(Operation::Pop).unwrap();
        assert!(model.unsubscribe(id));
        model.apply(Operation::Push(Screen::Settings)).unwrap();

        assert_eq!(*seen.lock(), vec![(2, 1), (1, 2)]);
    }

    #[test]
    fn restore_reads_last_save() {
        let store = MemoryStateStore::new();
        let mut first = model(&store);
        first.apply(Operation::Push(Screen::Settings)).unwrap();

        let second = model(&store);
        assert_eq!(second.state(), first.state());
        assert_eq!(second.revision(), 0);
    }

    #[test]
    fn corrupt_entry_falls_back_to_initial() {
        let store = MemoryStateStore::new();
        store.insert_raw(NodePath::root(), "garbage");
        let model = model(&store);
        assert_eq!(model.state(), &NavState::back_stack(Screen::Home));
        assert!(store.load(&NodePath::root()).is_some_and(|b| b != "garbage"));
    }
}
