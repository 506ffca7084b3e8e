//! Persistence of navigation state across destroy/recreate cycles.
//!
//! Each node's model writes an opaque blob under its [`NodePath`] on every
//! successful transition and reads it back once at construction.

mod codec;
mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

use crate::nav::{ModelKind, NodePath};

pub use codec::{decode, encode, SavedState, SAVED_STATE_VERSION};
pub use file::FileStateStore;
pub use memory::MemoryStateStore;

/// Errors that can occur when reading or writing persisted state.
///
/// Decode failures are recovered by falling back to the initial state;
/// they are logged and never surfaced to the user.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Corrupt state at '{path}': {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("State at '{path}' has schema version {found}, expected {expected}")]
    SchemaMismatch {
        path: String,
        found: u32,
        expected: u32,
    },

    #[error("State at '{path}' is a {found}, expected a {expected}")]
    KindMismatch {
        path: String,
        found: ModelKind,
        expected: ModelKind,
    },

    #[error("State at '{path}' is invalid: {reason}")]
    Invalid { path: String, reason: String },

    #[error("Failed to encode state at '{path}': {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write state file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Keyed persistence for model state.
///
/// Writes for a given path are applied in call order and the last write
/// wins on read.
pub trait StateStore: Send + Sync {
    fn save(&self, path: &NodePath, blob: &str);

    fn load(&self, path: &NodePath) -> Option<String>;

    /// Remove the entry at `path` and every entry below it.
    fn remove(&self, path: &NodePath);

    /// Push buffered state to durable storage.
    fn flush(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
