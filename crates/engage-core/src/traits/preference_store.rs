use crate::errors::StorageError;

/// Local durable key-value storage for preference flags.
///
/// `Ok(None)` means the key is unset, which is distinct from any explicit
/// value. Any `Err` is treated by callers as storage being unavailable.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
