//! Session store implementations
//!
//! Two entries are in active use, `token` and `role`, stored as independent
//! key-value pairs. The file store mirrors what the original panel frontend
//! did with browser local storage: no locking, last write wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::debug;
use trackboard_core::{ErrorContext, PanelError, PanelResult, SessionStore};

/// In-memory session store for tests and embedders
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> PanelResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned("get"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PanelResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned("set"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PanelResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned("remove"))?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self) -> PanelResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned("clear"))?;
        entries.clear();
        Ok(())
    }
}

fn poisoned(operation: &str) -> PanelError {
    PanelError::Session {
        message: "Session store lock poisoned".to_string(),
        source: None,
        context: ErrorContext::new("memory_session_store").with_operation(operation),
    }
}

/// File-backed session store
///
/// Persists all entries as a single JSON object. Every operation is a full
/// read-modify-write; concurrent processes race with last-write-wins
/// semantics. A missing file reads as an empty session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Create a store writing to `session.json` under the given data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            path: data_dir.as_ref().join("session.json"),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> PanelResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| PanelError::Session {
            message: format!("Failed to read session file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("file_session_store")
                .with_operation("read_entries")
                .with_metadata("path", &self.path.display().to_string()),
        })?;

        serde_json::from_str(&content).map_err(|e| PanelError::Session {
            message: format!("Failed to parse session file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("file_session_store")
                .with_operation("read_entries")
                .with_suggestion("Delete the session file and log in again"),
        })
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> PanelResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content).map_err(|e| PanelError::Session {
            message: format!("Failed to write session file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("file_session_store")
                .with_operation("write_entries")
                .with_metadata("path", &self.path.display().to_string())
                .with_suggestion("Check if the data directory is writable"),
        })?;

        debug!("Wrote {} session entries to {:?}", entries.len(), self.path);
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> PanelResult<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PanelResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> PanelResult<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    fn clear(&self) -> PanelResult<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
