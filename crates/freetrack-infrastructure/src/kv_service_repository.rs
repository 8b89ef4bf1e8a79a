//! Service repository on top of a key-value store.
//!
//! The whole collection is stored as one JSON array under a single key
//! (`free-services-tracker` by default).

use freetrack_core::Result;
use freetrack_core::service::{DEFAULT_STORAGE_KEY, Service, ServiceRepository};
use freetrack_core::storage::KeyValueStore;

/// Persists the service collection as JSON in any [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct KvServiceRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KvServiceRepository<S> {
    /// Uses the default storage key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> ServiceRepository for KvServiceRepository<S> {
    fn load_all(&self) -> Result<Option<Vec<Service>>> {
        let Some(bytes) = self.store.get(&self.key)? else {
            return Ok(None);
        };

        // An empty value counts as "never stored".
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        let services: Vec<Service> = serde_json::from_slice(&bytes)?;
        tracing::debug!("Loaded {} services from '{}'", services.len(), self.key);
        Ok(Some(services))
    }

    fn save_all(&self, services: &[Service]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(services)?;
        self.store.set(&self.key, &bytes)?;
        tracing::debug!("Saved {} services to '{}'", services.len(), self.key);
        Ok(())
    }
}
