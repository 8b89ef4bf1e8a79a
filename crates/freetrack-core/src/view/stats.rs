//! Dashboard counters.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::service::Service;

/// Summary numbers shown above the service list.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    pub total: usize,
    pub favorites: usize,
    /// Number of distinct category strings in use.
    pub categories: usize,
}

impl CollectionStats {
    pub fn from_services(services: &[Service]) -> Self {
        let categories: HashSet<&str> = services.iter().map(|s| s.category.as_str()).collect();
        Self {
            total: services.len(),
            favorites: services.iter().filter(|s| s.is_favorite).count(),
            categories: categories.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::ServiceFormData;
    use chrono::Utc;

    #[test]
    fn test_counts() {
        let now = Utc::now();
        let mk = |id: &str, category: &str| {
            Service::new(
                id,
                ServiceFormData::new(id, category, "d", "l", "https://example.com"),
                now,
            )
        };
        let mut services = vec![
            mk("a", "Design"),
            mk("b", "Design"),
            mk("c", "Learning"),
        ];
        services[2].is_favorite = true;

        let stats = CollectionStats::from_services(&services);
        assert_eq!(
            stats,
            CollectionStats {
                total: 3,
                favorites: 1,
                categories: 2,
            }
        );
        assert_eq!(CollectionStats::from_services(&[]), CollectionStats::default());
    }
}
