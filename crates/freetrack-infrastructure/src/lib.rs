pub mod config_service;
pub mod kv_service_repository;
pub mod logging;
pub mod notifier;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::kv_service_repository::KvServiceRepository;
pub use crate::notifier::TracingNotifier;
pub use crate::paths::FreetrackPaths;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
