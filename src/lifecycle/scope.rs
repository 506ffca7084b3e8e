use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Errors from launching work on a scope.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// The scope was already cancelled; its node is released.
    #[error("Scope '{scope}' is cancelled")]
    Cancelled { scope: String },

    /// `launch` was called outside a tokio runtime.
    #[error("No async runtime available to launch '{task}'")]
    NoRuntime { task: String },
}

/// How a scoped task ended. Cancellation is an expected outcome, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Completed,
    Cancelled,
    Panicked,
}

/// Task scope tied to a node's mount/unmount lifetime.
///
/// Every task gets a clone of the scope's cancellation token. Child scopes
/// use child tokens, so cancelling a scope also cancels everything below
/// it. [`cancel_all`](Self::cancel_all) takes effect exactly once.
pub struct LifecycleScope {
    label: String,
    token: CancellationToken,
    tasks: Mutex<JoinSet<TaskOutcome>>,
    cancelled: AtomicBool,
}

impl LifecycleScope {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_token(label.into(), CancellationToken::new())
    }

    /// Scope whose cancellation follows this one.
    pub fn child(&self, label: impl Into<String>) -> Self {
        Self::with_token(label.into(), self.token.child_token())
    }

    fn with_token(label: String, token: CancellationToken) -> Self {
        Self {
            label,
            token,
            tasks: Mutex::new(JoinSet::new()),
            cancelled: AtomicBool::new(false),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Schedule cooperative work on the current runtime.
    ///
    /// The future built by `task` is dropped at its next suspension point
    /// once the scope is cancelled, so it cannot observe or touch anything
    /// after that.
    pub fn launch<F, Fut>(&self, name: &str, task: F) -> Result<(), ScopeError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.is_cancelled() {
            return Err(ScopeError::Cancelled {
                scope: self.label.clone(),
            });
        }
        let handle = Handle::try_current().map_err(|_| ScopeError::NoRuntime {
            task: name.to_string(),
        })?;

        let token = self.token.clone();
        let work = task(token.clone());
        let scope = self.label.clone();
        let task_name = name.to_string();

        let mut tasks = self.tasks.lock();
        // Reap finished tasks so a long-lived scope does not accumulate them.
        while tasks.try_join_next().is_some() {}
        tasks.spawn_on(
            async move {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!(scope = %scope, task = %task_name, "Task cancelled");
                        TaskOutcome::Cancelled
                    }
                    _ = work => TaskOutcome::Completed,
                }
            },
            &handle,
        );
        drop(tasks);
        tracing::trace!(scope = %self.label, task = %name, "Task launched");
        Ok(())
    }

    /// Cancel every task in this scope and its child scopes.
    ///
    /// Returns `true` for the call that performed the cancellation.
    pub fn cancel_all(&self) -> bool {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.token.cancel();
        let mut tasks = self.tasks.lock();
        let pending = tasks.len();
        tasks.abort_all();
        tracing::debug!(scope = %self.label, pending, "Scope cancelled");
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Number of tasks that have not finished yet.
    pub fn active_tasks(&self) -> usize {
        let mut tasks = self.tasks.lock();
        while tasks.try_join_next().is_some() {}
        tasks.len()
    }

    /// Wait for every task launched so far and report how each ended.
    pub async fn join(&self) -> Vec<TaskOutcome> {
        let mut tasks = std::mem::take(&mut *self.tasks.lock());
        let mut outcomes = Vec::new();
        while let Some(result) = tasks.join_next().await {
            outcomes.push(match result {
                Ok(outcome) => outcome,
                Err(err) if err.is_cancelled() => TaskOutcome::Cancelled,
                Err(err) => {
                    tracing::error!(scope = %self.label, error = %err, "Task panicked");
                    TaskOutcome::Panicked
                }
            });
        }
        outcomes
    }
}

impl Drop for LifecycleScope {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
