//! Durable key-value storage for the task collection.
//!
//! Values are plain strings keyed by name. `FileStorage` keeps one
//! `<key>.json` file per key in a data directory and writes through a temp
//! file plus rename. Tests use the in-memory `MemoryStorage`.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while reading or writing stored values.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String key-value storage that survives restarts.
pub trait KeyValueStore {
    /// Read the value for `key`; `Ok(None)` when nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value for `key` wholesale.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Directory-backed store, one file per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir).map_err(|source| StorageError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(FileStorage {
            dir: dir.to_path_buf(),
        })
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| StorageError::Io {
            path: tmp.clone(),
            source,
        };
        let mut f = File::create(&tmp).map_err(io_err)?;
        f.write_all(value.as_bytes()).map_err(io_err)?;
        f.flush().map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io { path, source })?;
        Ok(())
    }
}

/// In-memory store. Nothing outlives the value itself.
#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
