//! Key-value storage medium abstraction.

use crate::error::Result;

/// A synchronous key-value byte store.
///
/// This is the persistence medium the service collection lives in. A read
/// of a key that was never written returns `Ok(None)`.
pub trait KeyValueStore: Send + Sync {
    /// Reads the bytes stored under `key`.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replaces the bytes stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
}
