use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::nav::NodePath;
use crate::store::{StateStore, StoreError};

/// On-disk layout: one JSON object mapping node paths to blobs.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// State store backed by a JSON file.
///
/// Saves are kept in memory; [`StateStore::flush`] writes the whole map
/// out, typically when the process is about to be suspended or exit.
#[derive(Clone)]
pub struct FileStateStore {
    inner: Arc<RwLock<BTreeMap<String, String>>>,
    path: PathBuf,
}

impl FileStateStore {
    /// Returns the default state file location.
    ///
    /// Uses `~/.local/share/navtree/state.json` on Linux, or the platform
    /// equivalent via `dirs::data_dir()`. Falls back to the current directory.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("navtree").join("state.json")
    }

    /// Open a store at `path`.
    ///
    /// A missing file gives an empty store. An unreadable or corrupt file
    /// is logged and also gives an empty store; it is replaced on flush.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    reason = %reason,
                    "Ignoring unreadable state file"
                );
                BTreeMap::new()
            }
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "State file opened");
        Self {
            inner: Arc::new(RwLock::new(entries)),
            path,
        }
    }

    /// Open a store that starts empty, ignoring any existing file.
    pub fn fresh(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, String> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let file: StateFile = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    Ok(file.entries)
}

impl StateStore for FileStateStore {
    fn save(&self, path: &NodePath, blob: &str) {
        self.inner.write().insert(path.to_string(), blob.to_string());
    }

    fn load(&self, path: &NodePath) -> Option<String> {
        self.inner.read().get(&path.to_string()).cloned()
    }

    fn remove(&self, path: &NodePath) {
        self.inner.write().retain(|key, _| match NodePath::parse(key) {
            Some(key) => !path.contains(&key),
            None => false,
        });
    }

    fn flush(&self) -> Result<(), StoreError> {
        let file = StateFile {
            entries: self.inner.read().clone(),
        };
        let content = serde_json::to_string_pretty(&file).map_err(|source| StoreError::Encode {
            path: self.path.display().to_string(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            entries = file.entries.len(),
            "State file written"
        );
        Ok(())
    }
}
