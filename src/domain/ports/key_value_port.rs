//! Key-value storage port definition.

use crate::domain::errors::StorageError;

/// Port for raw string records in local durable storage.
///
/// Values are always replaced in full; there are no partial writes.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValuePort: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written.
    ///
    /// # Errors
    /// Returns error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    /// Returns error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
