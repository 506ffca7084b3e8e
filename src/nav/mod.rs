//! Navigation model primitives.
//!
//! This module provides the pure state layer of the navigation tree:
//! targets, operations, and the model that applies them.
//!
//! # Data flow
//!
//! ```text
//! Operation ──→ NavReducer ──→ NavState ──→ StateStore
//!     ↑                           │
//!     │                           ↓
//!     └──────── renderer ←── observers (revision)
//! ```
//!
//! - **NavTarget**: closed enumeration of destinations a node can show
//! - **Operation**: validated mutation request (push, pop, select, ...)
//! - **NavReducer**: pure function `(state, operation) -> Result<state>`
//! - **NavigationModel**: current state, revision counter and persistence

mod error;
mod model;
mod operation;
mod reducer;
mod state;
mod target;

pub use error::NavError;
pub use model::{NavigationModel, SubscriptionId};
pub use operation::Operation;
pub use reducer::{NavReducer, Reducer};
pub use state::{ModelKind, NavState};
pub use target::{ChildKey, NavTarget, NodePath};
