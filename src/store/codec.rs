use serde::{Deserialize, Serialize};

use crate::nav::{ModelKind, NavState, NavTarget, NodePath};
use crate::store::StoreError;

pub const SAVED_STATE_VERSION: u32 = 1;

/// Versioned envelope around a persisted [`NavState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedState<T> {
    pub version: u32,
    pub state: NavState<T>,
}

pub fn encode<T: NavTarget>(path: &NodePath, state: &NavState<T>) -> Result<String, StoreError> {
    let saved = SavedState {
        version: SAVED_STATE_VERSION,
        state: state.clone(),
    };
    serde_json::to_string(&saved).map_err(|source| StoreError::Encode {
        path: path.to_string(),
        source,
    })
}

/// Decode a blob and check it against the model it is meant to seed.
///
/// The persisted state must have the same kind as `initial`. Tab selectors
/// and carousels have a fixed element set, so their elements must match
/// `initial` exactly. Fractional carousel positions are snapped.
pub fn decode<T: NavTarget>(
    path: &NodePath,
    blob: &str,
    initial: &NavState<T>,
) -> Result<NavState<T>, StoreError> {
    let saved: SavedState<T> = serde_json::from_str(blob).map_err(|source| StoreError::Corrupt {
        path: path.to_string(),
        source,
    })?;

    if saved.version != SAVED_STATE_VERSION {
        return Err(StoreError::SchemaMismatch {
            path: path.to_string(),
            found: saved.version,
            expected: SAVED_STATE_VERSION,
        });
    }

    let state = saved.state;
    if state.kind() != initial.kind() {
        return Err(StoreError::KindMismatch {
            path: path.to_string(),
            found: state.kind(),
            expected: initial.kind(),
        });
    }

    state.validate().map_err(|err| StoreError::Invalid {
        path: path.to_string(),
        reason: err.to_string(),
    })?;

    if state.kind() != ModelKind::BackStack && state.elements() != initial.elements() {
        return Err(StoreError::Invalid {
            path: path.to_string(),
            reason: "element set differs from the declared one".to_string(),
        });
    }

    Ok(state.snapped())
}
