// SPDX-FileCopyrightText: 2026 TelcoNova Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`KeyValueStore`] implementations: one file per key on disk, and an
//! in-memory map for tests and ephemeral sessions.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use telconova_core::{DispatchError, KeyValueStore};
use tracing::debug;

fn storage_err(e: impl std::error::Error + Send + Sync + 'static) -> DispatchError {
    DispatchError::Storage {
        source: Box::new(e),
    }
}

/// Stores each key as a file named after the key inside `dir`.
///
/// Writes go through a sibling temp file and a rename, so a crash never
/// leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DispatchError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(DispatchError::Internal(format!(
                "invalid storage key `{key}`"
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, DispatchError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_err(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DispatchError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(storage_err)?;

        let tmp = self.dir.join(format!(".{key}.tmp"));
        std::fs::write(&tmp, value).map_err(storage_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&tmp, std::fs::Permissions::from_mode(0o600))
                .map_err(storage_err)?;
        }

        std::fs::rename(&tmp, &path).map_err(storage_err)?;
        debug!(key, dir = %self.dir.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DispatchError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "removed value");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err(e)),
        }
    }
}

/// Process-local store. Values vanish when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, DispatchError> {
        let values = self
            .values
            .lock()
            .map_err(|_| DispatchError::Internal("memory store lock poisoned".into()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DispatchError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| DispatchError::Internal("memory store lock poisoned".into()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DispatchError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| DispatchError::Internal("memory store lock poisoned".into()))?;
        values.remove(key);
        Ok(())
    }
}
