//! Key-value storage for visibility snapshots.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use log::trace;
use thiserror::Error;

/// Errors raised by a [`SnapshotStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access snapshot `{key}`: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("snapshot `{key}` is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid snapshot key `{0}`")]
    InvalidKey(String),
}

/// Opaque string storage addressed by key.
///
/// A visibility store reads its snapshot once on construction and writes the
/// whole snapshot after each change.
pub trait SnapshotStore {
    /// Returns the value stored under `key`, or `None` if there is none.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process snapshot storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores a raw value, bypassing any validation.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each snapshot as `<key>.json` inside a directory.
///
/// Characters outside `[A-Za-z0-9_.-]` in the key are replaced by `_`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file that holds the snapshot for `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if name.is_empty() || name.chars().all(|c| c == '.') {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => {
                trace!(path:? = path; "Loaded snapshot file");
                Ok(Some(contents))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let io_error = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_error)?;
        fs::write(&path, value).map_err(io_error)?;
        trace!(path:? = path; "Saved snapshot file");
        Ok(())
    }
}
