//! View Projector: pure, stateless projections of the service collection.
//!
//! Nothing here is persisted. Presentation layers hold a [`ViewCriteria`]
//! and call [`project`] whenever the criteria or the collection change.

mod criteria;
mod projector;
mod stats;

pub use criteria::{ALL_CATEGORIES, CategoryFilter, SortDirection, SortKey, ViewCriteria};
pub use projector::{favorites, project};
pub use stats::CollectionStats;
