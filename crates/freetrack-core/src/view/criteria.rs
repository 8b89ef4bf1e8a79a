//! Transient view criteria supplied by the presentation layer.

use serde::{Deserialize, Serialize};

use crate::service::Category;

/// Sentinel used by the UI for "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Which category a view is restricted to.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// No category filtering.
    #[default]
    All,
    /// Only records whose category equals this text exactly.
    Only(String),
}

impl CategoryFilter {
    pub fn only(category: impl Into<String>) -> Self {
        CategoryFilter::Only(category.into())
    }

    /// Returns true if a record with `category` passes the filter.
    pub fn accepts(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Only(category) => category,
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category.as_str().to_string())
    }
}

/// Field a view is ordered by.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Category,
    #[serde(alias = "created")]
    CreatedAt,
    #[serde(alias = "updated")]
    UpdatedAt,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Search, filter and sort settings for one view of the collection.
///
/// Every field has a default, so `ViewCriteria::default()` shows the whole
/// collection sorted by name ascending.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewCriteria {
    pub favorites_only: bool,
    /// Case-insensitive substring matched against name and description.
    pub search_text: String,
    pub category_filter: CategoryFilter,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

impl ViewCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Criteria for the favorites tab.
    pub fn favorites() -> Self {
        Self::default().favorites_only(true)
    }

    pub fn favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = favorites_only;
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn category(mut self, filter: impl Into<CategoryFilter>) -> Self {
        self.category_filter = filter.into();
        self
    }

    pub fn sort_by(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort_key = key;
        self.sort_direction = direction;
        self
    }
}
