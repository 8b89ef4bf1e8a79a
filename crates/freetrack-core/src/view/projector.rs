//! Filtered and sorted projections of the service collection.

use std::cmp::Ordering;

use super::criteria::{SortDirection, SortKey, ViewCriteria};
use crate::service::Service;

/// Produces the display sequence for `services` under `criteria`.
///
/// Filters run in a fixed order (favorites, search text, category), then the
/// survivors are stably sorted. The input slice is never modified.
pub fn project(services: &[Service], criteria: &ViewCriteria) -> Vec<Service> {
    let needle = criteria.search_text.to_lowercase();

    let mut projected: Vec<Service> = services
        .iter()
        .filter(|s| !criteria.favorites_only || s.is_favorite)
        .filter(|s| needle.is_empty() || matches_search(s, &needle))
        .filter(|s| criteria.category_filter.accepts(&s.category))
        .cloned()
        .collect();

    projected.sort_by(|a, b| {
        let ordering = compare_by(a, b, criteria.sort_key);
        match criteria.sort_direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    projected
}

/// Favorites only, in default order.
pub fn favorites(services: &[Service]) -> Vec<Service> {
    project(services, &ViewCriteria::favorites())
}

/// `needle` must already be lowercased.
fn matches_search(service: &Service, needle: &str) -> bool {
    service.name.to_lowercase().contains(needle)
        || service.description.to_lowercase().contains(needle)
}

fn compare_by(a: &Service, b: &Service, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Category => a.category.to_lowercase().cmp(&b.category.to_lowercase()),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}
