//! Persistence adapter.
//!
//! The task list is persisted wholesale as a JSON array under a single fixed
//! storage key. The storage medium itself is abstracted behind the
//! [`Storage`] trait so the controller can be exercised in tests against an
//! in-memory medium, while the application runs on a file per key under the
//! configured data directory.
//!
//! Failure policy follows the boundary rules of the application: save and
//! load failures are logged and degrade to in-memory-only operation, while
//! import failures propagate so the caller can surface them to the user.

mod error;

pub use error::StoreError;

use crate::tasks::Task;
use log::*;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The fixed key the task list lives under.
pub const STORAGE_KEY: &str = "todo.tasks.v1";

/// File name offered for exports.
pub const EXPORT_FILE_NAME: &str = "todos.json";

/// A string key-value storage medium.
///
pub trait Storage {
    /// Read the value stored under the key, or `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write the value under the key, overwriting any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// File-backed storage: one file per key inside a data directory.
///
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage rooted at the given directory, creating it if needed.
    ///
    pub fn new(dir: &Path) -> Result<FileStorage, StoreError> {
        fs::create_dir_all(dir)?;
        Ok(FileStorage {
            dir: dir.to_path_buf(),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}

/// In-memory storage medium for tests. Clones share the same underlying map,
/// so a test can keep a handle while the store owns another.
///
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MemoryStorage {
    entries: std::sync::Arc<std::sync::Mutex<std::collections::HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().expect("storage lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("storage lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and writes the full task list against a storage medium, and to and
/// from export/import files.
///
pub struct Store {
    storage: Box<dyn Storage>,
}

impl Store {
    pub fn new(storage: Box<dyn Storage>) -> Store {
        Store { storage }
    }

    /// Serialize the full task list and overwrite the storage key. Failures
    /// are logged and swallowed; the in-memory list stays authoritative.
    ///
    pub fn save(&mut self, tasks: &[Task]) {
        let serialized = match serde_json::to_string(tasks) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to serialize task list: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(STORAGE_KEY, &serialized) {
            error!("Failed to save task list to storage: {}", e);
        }
    }

    /// Load the task list from the storage key. Absent, unparseable or
    /// non-array content yields an empty list; failures are logged, never
    /// propagated.
    ///
    pub fn load(&self) -> Vec<Task> {
        let raw = match self.storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return vec![],
            Err(e) => {
                error!("Failed to read task list from storage: {}", e);
                return vec![];
            }
        };
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse persisted task list: {}", e);
                return vec![];
            }
        };
        if !parsed.is_array() {
            warn!("Persisted task list is not an array, starting empty");
            return vec![];
        }
        match serde_json::from_value(parsed) {
            Ok(tasks) => tasks,
            Err(e) => {
                error!("Persisted task records are malformed: {}", e);
                vec![]
            }
        }
    }

    /// Write the full task list, pretty-printed, to `todos.json` inside the
    /// given directory. Returns the path written.
    ///
    pub fn export_to_file(&self, tasks: &[Task], dir: &Path) -> Result<PathBuf, StoreError> {
        let path = dir.join(EXPORT_FILE_NAME);
        let serialized = serde_json::to_string_pretty(tasks)?;
        fs::write(&path, serialized)?;
        Ok(path)
    }

    /// Read an import file and parse it as a JSON array of raw records. The
    /// records are handed back untyped; normalization happens in the task
    /// list replacement.
    ///
    pub fn import_from_file(path: &Path) -> Result<Vec<Value>, StoreError> {
        let contents = fs::read_to_string(path)?;
        parse_import(&contents)
    }
}

/// Parse import text, requiring a top-level JSON array.
///
pub fn parse_import(contents: &str) -> Result<Vec<Value>, StoreError> {
    match serde_json::from_str(contents)? {
        Value::Array(records) => Ok(records),
        _ => Err(StoreError::NotAnArray),
    }
}
