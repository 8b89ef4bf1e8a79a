//! Application layer: the service collection store and its wiring.

pub mod bootstrap;
pub mod service_collection;

pub use bootstrap::{open_collection, open_collection_with_notifier};
pub use service_collection::{ServiceCollection, Snapshot};
