//! Hierarchical navigation tree for terminal applications.
//!
//! Each node of the tree owns a small navigation model (back stack, tab
//! selector or carousel), materialises children for the targets in its
//! active sequence, persists its state between runs, and scopes
//! background work to its own lifetime.

pub mod config;
pub mod demo;
pub mod lifecycle;
pub mod logging;
pub mod nav;
pub mod node;
pub mod store;
pub mod ui;
