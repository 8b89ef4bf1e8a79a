//! The service collection store.
//!
//! `ServiceCollection` owns the canonical list of service records. It is the
//! only component allowed to mutate records; every mutation writes the full
//! collection back to the repository before the in-memory list changes, then
//! publishes the new snapshot to subscribers.

use std::collections::HashSet;
use std::sync::Arc;

use freetrack_core::clock::{Clock, SystemClock};
use freetrack_core::config::{FreetrackConfig, MissingIdPolicy};
use freetrack_core::notification::{Notice, Notifier};
use freetrack_core::service::{Service, ServiceFormData, ServicePatch, ServiceRepository};
use freetrack_core::view::{self, CollectionStats, ViewCriteria};
use freetrack_core::{FreetrackError, Result};
use tokio::sync::watch;
use uuid::Uuid;

/// Shared, immutable snapshot of the collection.
pub type Snapshot = Arc<Vec<Service>>;

/// Owner of the service collection.
///
/// Created with [`ServiceCollection::initialize`], which loads the stored
/// collection once. Mutations take `&mut self`, so they never interleave.
pub struct ServiceCollection {
    repository: Arc<dyn ServiceRepository>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    config: FreetrackConfig,
    services: Snapshot,
    sender: watch::Sender<Snapshot>,
}

impl ServiceCollection {
    /// Loads the stored collection and returns a ready store.
    ///
    /// Never fails: absent data starts an empty collection, and unreadable
    /// data is logged and also starts an empty collection.
    pub fn initialize(
        repository: Arc<dyn ServiceRepository>,
        notifier: Arc<dyn Notifier>,
        config: FreetrackConfig,
    ) -> Self {
        Self::initialize_with_clock(repository, notifier, Arc::new(SystemClock), config)
    }

    /// Same as [`initialize`](Self::initialize) with an explicit time source.
    pub fn initialize_with_clock(
        repository: Arc<dyn ServiceRepository>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
        config: FreetrackConfig,
    ) -> Self {
        let services = match repository.load_all() {
            Ok(Some(stored)) => dedupe_by_id(stored),
            Ok(None) => {
                tracing::info!("[ServiceCollection] No stored services, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(
                    "[ServiceCollection] Failed to load stored services, starting empty: {}",
                    e
                );
                Vec::new()
            }
        };

        tracing::info!(
            "[ServiceCollection] Initialized with {} services",
            services.len()
        );

        let services: Snapshot = Arc::new(services);
        let (sender, _) = watch::channel(Arc::clone(&services));

        Self {
            repository,
            notifier,
            clock,
            config,
            services,
            sender,
        }
    }

    // ============================================================================
    // Reads
    // ============================================================================

    /// The current collection in storage order.
    pub fn current_collection(&self) -> Snapshot {
        Arc::clone(&self.services)
    }

    /// Receives a new snapshot after every successful mutation.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.sender.subscribe()
    }

    pub fn get(&self, id: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn config(&self) -> &FreetrackConfig {
        &self.config
    }

    /// Projects the current collection; see [`view::project`].
    pub fn project(&self, criteria: &ViewCriteria) -> Vec<Service> {
        view::project(&self.services, criteria)
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats::from_services(&self.services)
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Adds a new service built from form input and returns it.
    ///
    /// The store assigns the id and both timestamps; the new record is not a
    /// favorite. Input is trusted as already validated.
    pub fn add(&mut self, form: ServiceFormData) -> Result<Service> {
        let service = Service::new(self.fresh_id(), form, self.clock.now());

        let mut next = self.services.as_ref().clone();
        next.push(service.clone());
        self.commit(next)?;

        tracing::info!(
            "[ServiceCollection] Added service '{}' ({})",
            service.name,
            service.id
        );
        self.notifier.notify(Notice::ServiceAdded {
            id: service.id.clone(),
            name: service.name.clone(),
        });
        Ok(service)
    }

    /// Merges `patch` into the service with `id`.
    ///
    /// Returns the updated record, or `Ok(None)` when the id is unknown and
    /// the missing-id policy is `Ignore`.
    pub fn update(&mut self, id: &str, patch: ServicePatch) -> Result<Option<Service>> {
        let Some(index) = self.locate(id)? else {
            return Ok(None);
        };

        let mut next = self.services.as_ref().clone();
        next[index].apply_patch(patch, self.clock.now());
        let updated = next[index].clone();
        self.commit(next)?;

        tracing::info!("[ServiceCollection] Updated service {}", id);
        self.notifier.notify(Notice::ServiceUpdated {
            id: updated.id.clone(),
            name: updated.name.clone(),
        });
        Ok(Some(updated))
    }

    /// Permanently removes the service with `id` and returns it.
    pub fn delete(&mut self, id: &str) -> Result<Option<Service>> {
        let Some(index) = self.locate(id)? else {
            return Ok(None);
        };

        let mut next = self.services.as_ref().clone();
        let removed = next.remove(index);
        self.commit(next)?;

        tracing::info!(
            "[ServiceCollection] Deleted service '{}' ({})",
            removed.name,
            removed.id
        );
        self.notifier.notify(Notice::ServiceDeleted {
            id: removed.id.clone(),
            name: removed.name.clone(),
        });
        Ok(Some(removed))
    }

    /// Flips the favorite flag of the service with `id`.
    ///
    /// Persists like every other mutation but emits no notice.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<Option<Service>> {
        let Some(index) = self.locate(id)? else {
            return Ok(None);
        };

        let mut next = self.services.as_ref().clone();
        next[index].toggle_favorite(self.clock.now());
        let toggled = next[index].clone();
        self.commit(next)?;

        tracing::debug!(
            "[ServiceCollection] Service {} favorite = {}",
            id,
            toggled.is_favorite
        );
        Ok(Some(toggled))
    }

    /// Ends the store's lifecycle. Subscribers see the channel close.
    pub fn close(self) {
        tracing::info!(
            "[ServiceCollection] Closing with {} services",
            self.services.len()
        );
    }

    // ============================================================================
    // Internals
    // ============================================================================

    /// Persists `next`, then makes it the current collection and publishes it.
    ///
    /// On a failed write nothing in memory changes.
    fn commit(&mut self, next: Vec<Service>) -> Result<()> {
        self.repository.save_all(&next).map_err(|e| {
            tracing::warn!("[ServiceCollection] Failed to persist services: {}", e);
            if e.is_storage() {
                e
            } else {
                FreetrackError::storage(e.to_string())
            }
        })?;

        self.services = Arc::new(next);
        self.sender.send_replace(Arc::clone(&self.services));
        Ok(())
    }

    /// Index of `id`, applying the missing-id policy when absent.
    fn locate(&self, id: &str) -> Result<Option<usize>> {
        match self.services.iter().position(|s| s.id == id) {
            Some(index) => Ok(Some(index)),
            None => match self.config.missing_id_policy {
                MissingIdPolicy::Ignore => {
                    tracing::debug!("[ServiceCollection] Ignoring unknown service id {}", id);
                    Ok(None)
                }
                MissingIdPolicy::Reject => Err(FreetrackError::not_found("service", id)),
            },
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

/// Drops records whose id was already seen, keeping the first.
fn dedupe_by_id(services: Vec<Service>) -> Vec<Service> {
    let total = services.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<Service> = services
        .into_iter()
        .filter(|s| seen.insert(s.id.clone()))
        .collect();

    if unique.len() != total {
        tracing::warn!(
            "[ServiceCollection] Dropped {} stored services with duplicate ids",
            total - unique.len()
        );
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use freetrack_core::clock::ManualClock;
    use freetrack_core::service::DEFAULT_STORAGE_KEY;
    use freetrack_core::storage::KeyValueStore;
    use freetrack_infrastructure::{KvServiceRepository, MemoryKeyValueStore};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<Notice>>,
    }

    impl RecordingNotifier {
        fn titles(&self) -> Vec<&'static str> {
            self.notices.lock().unwrap().iter().map(|n| n.title()).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notice: Notice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    /// Key-value store whose writes can be switched off.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryKeyValueStore,
        fail_writes: Mutex<bool>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> Result<()> {
            if *self.fail_writes.lock().unwrap() {
                return Err(FreetrackError::storage("disk full"));
            }
            self.inner.set(key, value)
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.timestamp_opt(1_705_312_800, 0).unwrap()
    }

    struct Fixture {
        store: MemoryKeyValueStore,
        notifier: Arc<RecordingNotifier>,
        clock: Arc<ManualClock>,
        collection: ServiceCollection,
    }

    fn fixture_with(store: MemoryKeyValueStore, config: FreetrackConfig) -> Fixture {
        let notifier = Arc::new(RecordingNotifier::default());
        let clock = Arc::new(ManualClock::new(start()));
        let collection = ServiceCollection::initialize_with_clock(
            Arc::new(KvServiceRepository::new(store.clone())),
            notifier.clone(),
            clock.clone(),
            config,
        );
        Fixture {
            store,
            notifier,
            clock,
            collection,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MemoryKeyValueStore::new(), FreetrackConfig::default())
    }

    fn form(name: &str, category: &str) -> ServiceFormData {
        ServiceFormData::new(
            name,
            category,
            format!("{name} description"),
            "Free tier limits",
            "https://example.com/login",
        )
    }

    fn stored(store: &MemoryKeyValueStore) -> Vec<Service> {
        let bytes = store.get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_add_assigns_id_and_timestamps() {
        let mut f = fixture();
        let service = f.collection.add(form("Notion", "Productivity")).unwrap();

        assert!(!service.id.is_empty());
        assert!(!service.is_favorite);
        assert_eq!(service.created_at, start());
        assert_eq!(service.updated_at, start());
        assert_eq!(f.collection.len(), 1);
        assert_eq!(stored(&f.store), vec![service]);
        assert_eq!(f.notifier.titles(), ["Service added successfully!"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut f = fixture();
        for i in 0..50 {
            f.collection.add(form(&format!("svc-{i}"), "Other")).unwrap();
        }
        let ids: HashSet<String> = f
            .collection
            .current_collection()
            .iter()
            .map(|s| s.id.clone())
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_update_merges_and_refreshes_updated_at() {
        let mut f = fixture();
        let service = f.collection.add(form("Notion", "Productivity")).unwrap();
        f.clock.advance(Duration::seconds(30));

        let updated = f
            .collection
            .update(&service.id, ServicePatch::new().limitations("1000 blocks"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, service.id);
        assert_eq!(updated.name, "Notion");
        assert_eq!(updated.limitations, "1000 blocks");
        assert_eq!(updated.created_at, start());
        assert_eq!(updated.updated_at, start() + Duration::seconds(30));
        assert_eq!(stored(&f.store)[0], updated);
        assert_eq!(
            f.notifier.titles(),
            ["Service added successfully!", "Service updated successfully!"]
        );
    }

    #[test]
    fn test_toggle_favorite_is_silent_but_persisted() {
        let mut f = fixture();
        let service = f.collection.add(form("Notion", "Productivity")).unwrap();
        f.clock.advance(Duration::seconds(1));

        let toggled = f.collection.toggle_favorite(&service.id).unwrap().unwrap();

        assert!(toggled.is_favorite);
        assert_eq!(toggled.updated_at, start() + Duration::seconds(1));
        assert!(stored(&f.store)[0].is_favorite);
        assert_eq!(f.notifier.titles(), ["Service added successfully!"]);

        let back = f.collection.toggle_favorite(&service.id).unwrap().unwrap();
        assert!(!back.is_favorite);
    }

    #[test]
    fn test_delete_removes_record() {
        let mut f = fixture();
        let keep = f.collection.add(form("Dropbox", "Cloud Storage")).unwrap();
        let gone = f.collection.add(form("Figma", "Design")).unwrap();

        let removed = f.collection.delete(&gone.id).unwrap().unwrap();

        assert_eq!(removed, gone);
        assert_eq!(*f.collection.current_collection(), vec![keep.clone()]);
        assert_eq!(stored(&f.store), vec![keep]);
        assert_eq!(f.notifier.titles().last(), Some(&"Service deleted successfully!"));
    }

    #[test]
    fn test_missing_id_is_a_silent_no_op_by_default() {
        let mut f = fixture();
        f.collection.add(form("Notion", "Productivity")).unwrap();
        let before = f.collection.current_collection();
        let stored_before = f.store.get(DEFAULT_STORAGE_KEY).unwrap();
        let mut rx = f.collection.subscribe();

        assert_eq!(f.collection.update("nope", ServicePatch::new().name("x")).unwrap(), None);
        assert_eq!(f.collection.delete("nope").unwrap(), None);
        assert_eq!(f.collection.toggle_favorite("nope").unwrap(), None);

        assert_eq!(f.collection.current_collection(), before);
        assert_eq!(f.store.get(DEFAULT_STORAGE_KEY).unwrap(), stored_before);
        assert_eq!(f.notifier.titles().len(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_missing_id_rejected_when_strict() {
        let mut f = fixture_with(MemoryKeyValueStore::new(), FreetrackConfig::strict());
        f.collection.add(form("Notion", "Productivity")).unwrap();

        let err = f.collection.delete("nope").unwrap_err();
        assert_eq!(err, FreetrackError::not_found("service", "nope"));
        assert!(f.collection.toggle_favorite("nope").unwrap_err().is_not_found());
        assert!(
            f.collection
                .update("nope", ServicePatch::new())
                .unwrap_err()
                .is_not_found()
        );
        assert_eq!(f.collection.len(), 1);
    }

    #[test]
    fn test_write_failure_leaves_memory_unchanged() {
        let store = Arc::new(FlakyStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut collection = ServiceCollection::initialize(
            Arc::new(KvServiceRepository::new(store.clone())),
            notifier.clone(),
            FreetrackConfig::default(),
        );
        let service = collection.add(form("Notion", "Productivity")).unwrap();
        let mut rx = collection.subscribe();

        *store.fail_writes.lock().unwrap() = true;

        assert!(collection.add(form("Figma", "Design")).unwrap_err().is_storage());
        assert!(collection.toggle_favorite(&service.id).unwrap_err().is_storage());
        assert!(collection.delete(&service.id).unwrap_err().is_storage());

        assert_eq!(*collection.current_collection(), vec![service]);
        assert_eq!(notifier.titles(), ["Service added successfully!"]);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let store = MemoryKeyValueStore::with_entry(DEFAULT_STORAGE_KEY, "][ not json");
        let f = fixture_with(store, FreetrackConfig::default());

        assert!(f.collection.is_empty());
        // Corrupt bytes stay until the next successful write.
        assert_eq!(
            f.store.get(DEFAULT_STORAGE_KEY).unwrap(),
            Some(b"][ not json".to_vec())
        );
    }

    #[test]
    fn test_duplicate_stored_ids_are_dropped() {
        let service = Service::new("dup", form("Notion", "Productivity"), start());
        let mut twin = service.clone();
        twin.name = "Notion copy".to_string();
        let bytes = serde_json::to_vec(&vec![service.clone(), twin]).unwrap();
        let store = MemoryKeyValueStore::with_entry(DEFAULT_STORAGE_KEY, bytes);

        let f = fixture_with(store, FreetrackConfig::default());

        assert_eq!(*f.collection.current_collection(), vec![service]);
    }

    #[test]
    fn test_updated_at_never_decreases_when_clock_steps_back() {
        let mut f = fixture();
        let service = f.collection.add(form("Notion", "Productivity")).unwrap();
        f.clock.set(start() - Duration::hours(1));

        let updated = f
            .collection
            .update(&service.id, ServicePatch::new().name("Notion 2"))
            .unwrap()
            .unwrap();

        assert_eq!(updated.updated_at, start());
        assert!(updated.created_at <= updated.updated_at);
    }

    #[test]
    fn test_subscribers_see_each_mutation() {
        let mut f = fixture();
        let mut rx = f.collection.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        let service = f.collection.add(form("Notion", "Productivity")).unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        f.collection.toggle_favorite(&service.id).unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update()[0].is_favorite);

        f.collection.close();
        assert!(rx.has_changed().is_err());
    }

    #[test]
    fn test_project_and_stats_follow_collection() {
        let mut f = fixture();
        f.collection.add(form("Google Drive", "Cloud Storage")).unwrap();
        let dropbox = f.collection.add(form("Dropbox", "Cloud Storage")).unwrap();
        f.collection.add(form("Figma", "Design")).unwrap();
        f.collection.toggle_favorite(&dropbox.id).unwrap();

        let stats = f.collection.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.favorites, 1);
        assert_eq!(stats.categories, 2);

        let favorites = f.collection.project(&ViewCriteria::favorites());
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, dropbox.id);
    }
}
