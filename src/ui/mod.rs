//! Terminal shell around a mounted navigation tree.
//!
//! ```text
//! crossterm poll thread ──→ AppEvent ──┐
//! carousel tasks ──→ Dispatcher ───────┼──→ runtime loop ──→ App ──→ NavHost
//! tick interval ───────────────────────┘          │
//!                                                 └──→ render (header / body / footer)
//! ```

pub mod app;
pub mod events;
pub mod footer;
pub mod header;
pub mod input;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod terminal_guard;
pub mod theme;

pub use runtime::run;
