//! Background work bound to a node's lifetime.

mod countdown;
mod scope;

pub use countdown::Countdown;
pub use scope::{LifecycleScope, ScopeError, TaskOutcome};
