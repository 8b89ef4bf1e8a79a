//! Service repository trait.

use super::model::Service;
use crate::error::Result;

/// Storage key the collection is kept under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "free-services-tracker";

/// Repository trait for persisting the service collection.
///
/// The collection is always read and written as a whole; there is no
/// per-record persistence.
pub trait ServiceRepository: Send + Sync {
    /// Loads the stored collection.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet, and an error when
    /// stored data exists but cannot be decoded.
    fn load_all(&self) -> Result<Option<Vec<Service>>>;

    /// Replaces the stored collection with `services`.
    fn save_all(&self, services: &[Service]) -> Result<()>;
}
