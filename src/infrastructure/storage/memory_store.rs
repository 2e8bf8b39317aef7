//! In-memory key-value storage.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValuePort;

/// Process-local store used for `--ephemeral` sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with records.
    #[cfg(test)]
    #[must_use]
    pub fn with_records<K, V>(records: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            records: RwLock::new(
                records
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValuePort for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
