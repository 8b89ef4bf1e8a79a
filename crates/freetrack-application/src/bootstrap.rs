//! Wires the collection store to on-disk storage.

use std::sync::Arc;

use freetrack_core::Result;
use freetrack_core::config::FreetrackConfig;
use freetrack_core::notification::Notifier;
use freetrack_infrastructure::{
    ConfigService, FileKeyValueStore, FreetrackPaths, KvServiceRepository, TracingNotifier,
};

use crate::service_collection::ServiceCollection;

/// Opens a [`ServiceCollection`] backed by files under `paths`.
///
/// Reads `config.toml` (falling back to defaults if it cannot be parsed),
/// stores the collection in the data directory and logs notices.
pub fn open_collection(paths: &FreetrackPaths) -> Result<ServiceCollection> {
    open_collection_with_notifier(paths, Arc::new(TracingNotifier))
}

/// Like [`open_collection`], with a custom notice sink (e.g. UI toasts).
pub fn open_collection_with_notifier(
    paths: &FreetrackPaths,
    notifier: Arc<dyn Notifier>,
) -> Result<ServiceCollection> {
    let config = load_config(paths)?;

    let store = FileKeyValueStore::open_default(paths)?;
    let location = store.key_path(&config.storage_key)?;
    tracing::info!("[Bootstrap] Service storage: {:?}", location);

    let repository = KvServiceRepository::with_key(store, config.storage_key.clone());
    Ok(ServiceCollection::initialize(
        Arc::new(repository),
        notifier,
        config,
    ))
}

fn load_config(paths: &FreetrackPaths) -> Result<FreetrackConfig> {
    let config_service = ConfigService::new(paths)?;
    match config_service.load() {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!(
                "[Bootstrap] Ignoring unreadable config {:?}: {}",
                config_service.path(),
                e
            );
            Ok(FreetrackConfig::default())
        }
    }
}
