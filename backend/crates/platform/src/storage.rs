//! Key/Value Blob Storage
//!
//! A deliberately small storage surface: whole string values addressed by a
//! flat key, read and replaced in one step. Callers own the encoding.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use uuid::Uuid;

/// Storage failure
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key is empty or contains characters outside `[A-Za-z0-9_.-]`
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage I/O failed for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The stored value is not text; callers decide whether that is fatal
    #[error("Stored value for key {key:?} is not valid UTF-8")]
    Corrupt {
        key: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A previous holder of the in-memory lock panicked
    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Whole-value key/value storage
pub trait BlobStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

// ============================================================================
// File-backed storage
// ============================================================================

/// One file per key inside a data directory.
///
/// Writes land in a synced temp file next to the target and are moved into
/// place with `rename`, so readers see either the old or the new value.
/// Temp files left behind by a crash are removed on `open`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        let swept = sweep_temp_files(&dir);
        tracing::debug!(dir = %dir.display(), swept, "File storage opened");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

/// Temp names start with a dot, which no valid key does
fn is_temp_file(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(".tmp")
}

fn sweep_temp_files(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    let mut swept = 0;
    for entry in entries.flatten() {
        let name = entry.file_name();
        if !name.to_str().is_some_and(is_temp_file) {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => swept += 1,
            Err(e) => tracing::warn!(
                path = %entry.path().display(),
                error = %e,
                "Failed to remove stale temp file"
            ),
        }
    }
    if swept > 0 {
        tracing::info!(dir = %dir.display(), swept, "Removed stale temp files");
    }
    swept
}

impl BlobStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|source| StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let temp_path = self
            .dir
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()));

        let io_err = |source: io::Error| StorageError::Io {
            key: key.to_string(),
            source,
        };

        let replace = || -> io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp_path, &path)
        };
        if let Err(source) = replace() {
            let _ = fs::remove_file(&temp_path);
            return Err(io_err(source));
        }
        if let Ok(dir) = fs::File::open(&self.dir) {
            let _ = dir.sync_all();
        }

        tracing::trace!(key, bytes = value.len(), "Blob written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

// ============================================================================
// In-memory storage
// ============================================================================

/// Process-local storage. Clones share the same entries, so a "restart" in
/// tests is just a second repository built over a clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

impl<S: BlobStorage + ?Sized> BlobStorage for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
