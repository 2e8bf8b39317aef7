//! File-backed key-value storage.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValuePort;

const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "foxgallery";
const APP_NAME: &str = "foxgallery";

/// Stores each key as its own file inside a data directory.
///
/// Writes go through a temp file that is renamed over the target, and all
/// access is serialized so a reader never observes a half-written record.
pub struct FileKeyValueStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Creates a store in the platform data directory.
    ///
    /// # Errors
    /// Returns error if the data directory cannot be determined.
    pub fn new() -> Result<Self, StorageError> {
        let dir = Self::default_dir().ok_or_else(|| {
            StorageError::Unavailable("failed to determine data directory".to_string())
        })?;
        Ok(Self::with_dir(dir))
    }

    /// Creates a store rooted at `dir` (useful for testing).
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
            lock: Mutex::new(()),
        }
    }

    /// Returns the platform data directory for the gallery.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::Unavailable(format!("invalid key '{key}'")));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValuePort for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.lock();

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(key, "No stored record");
                Ok(None)
            }
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let _guard = self.lock.lock();

        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };

        if !self.dir.exists() {
            info!("Creating data directory at {:?}", self.dir);
            fs::create_dir_all(&self.dir).map_err(write_err)?;
        }

        let mut temp_file = tempfile::NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        temp_file.write_all(value.as_bytes()).map_err(write_err)?;
        temp_file.persist(&path).map_err(|e| write_err(e.error))?;

        debug!(key, bytes = value.len(), "Record stored");
        Ok(())
    }
}
