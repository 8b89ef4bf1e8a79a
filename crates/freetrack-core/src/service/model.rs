//! Service domain model.
//!
//! A service record describes one free-tier online service the user keeps
//! track of: where to log in, what the free plan allows, and whether it is
//! marked as a favorite.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Well-known service categories, in display order.
///
/// Records store their category as free text, so a record may carry a
/// category outside this list.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Cloud Storage")]
    CloudStorage,
    #[serde(rename = "Development Tools")]
    DevelopmentTools,
    #[serde(rename = "Design")]
    Design,
    #[serde(rename = "Communication")]
    Communication,
    #[serde(rename = "Productivity")]
    Productivity,
    #[serde(rename = "Analytics")]
    Analytics,
    #[serde(rename = "Email Marketing")]
    EmailMarketing,
    #[serde(rename = "Social Media")]
    SocialMedia,
    #[serde(rename = "Learning")]
    Learning,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// All known categories in display order.
    pub const ALL: [Category; 10] = [
        Category::CloudStorage,
        Category::DevelopmentTools,
        Category::Design,
        Category::Communication,
        Category::Productivity,
        Category::Analytics,
        Category::EmailMarketing,
        Category::SocialMedia,
        Category::Learning,
        Category::Other,
    ];

    /// Returns the display label, which is also the stored text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CloudStorage => "Cloud Storage",
            Category::DevelopmentTools => "Development Tools",
            Category::Design => "Design",
            Category::Communication => "Communication",
            Category::Productivity => "Productivity",
            Category::Analytics => "Analytics",
            Category::EmailMarketing => "Email Marketing",
            Category::SocialMedia => "Social Media",
            Category::Learning => "Learning",
            Category::Other => "Other",
        }
    }

    /// Looks up a category by its exact label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

/// Reads an optional URL, treating `null` and blank strings as absent.
fn deserialize_optional_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_url(value))
}

fn normalize_url(value: Option<String>) -> Option<String> {
    value.filter(|url| !url.trim().is_empty())
}

/// A tracked free-tier service.
///
/// `id`, `created_at` and `updated_at` are owned by the collection store;
/// everything else comes from the user's form input.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name
    pub name: String,
    /// Category label, usually one of [`Category::ALL`]
    pub category: String,
    /// Short description of what the service does
    pub description: String,
    /// What the free tier allows or restricts
    pub limitations: String,
    /// Where to sign in
    pub login_url: String,
    /// Pricing page, if the user recorded one
    #[serde(
        default,
        deserialize_with = "deserialize_optional_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub pricing_url: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    /// Builds a fresh record from form input.
    ///
    /// The record starts as a non-favorite with both timestamps set to `now`.
    pub fn new(id: impl Into<String>, form: ServiceFormData, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: form.name,
            category: form.category,
            description: form.description,
            limitations: form.limitations,
            login_url: form.login_url,
            pricing_url: normalize_url(form.pricing_url),
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the category as a known [`Category`], if it is one.
    pub fn known_category(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }

    /// Merges the provided patch fields and refreshes `updated_at`.
    pub fn apply_patch(&mut self, patch: ServicePatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(limitations) = patch.limitations {
            self.limitations = limitations;
        }
        if let Some(login_url) = patch.login_url {
            self.login_url = login_url;
        }
        if let Some(pricing_url) = patch.pricing_url {
            self.pricing_url = normalize_url(pricing_url);
        }
        self.touch(now);
    }

    /// Flips the favorite flag and refreshes `updated_at`.
    pub fn toggle_favorite(&mut self, now: DateTime<Utc>) {
        self.is_favorite = !self.is_favorite;
        self.touch(now);
    }

    /// Refreshes `updated_at`, never moving it backwards.
    ///
    /// Keeps `created_at <= updated_at` even if the wall clock steps back.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }
}

/// Field data submitted by the add/edit form.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFormData {
    pub name: String,
    pub category: String,
    pub description: String,
    pub limitations: String,
    pub login_url: String,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub pricing_url: Option<String>,
}

impl ServiceFormData {
    /// Creates form data with the required fields and no pricing URL.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        limitations: impl Into<String>,
        login_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
            limitations: limitations.into(),
            login_url: login_url.into(),
            pricing_url: None,
        }
    }

    /// Sets the pricing URL.
    pub fn with_pricing_url(mut self, pricing_url: impl Into<String>) -> Self {
        self.pricing_url = Some(pricing_url.into());
        self
    }
}

/// A partial update to a service. `None` fields are left unchanged.
///
/// `pricing_url` is tri-state: `None` keeps the current value,
/// `Some(None)` clears it and `Some(Some(url))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServicePatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub limitations: Option<String>,
    pub login_url: Option<String>,
    pub pricing_url: Option<Option<String>>,
}

impl ServicePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn limitations(mut self, limitations: impl Into<String>) -> Self {
        self.limitations = Some(limitations.into());
        self
    }

    pub fn login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = Some(login_url.into());
        self
    }

    pub fn pricing_url(mut self, pricing_url: Option<String>) -> Self {
        self.pricing_url = Some(pricing_url);
        self
    }

    /// Returns true when the patch would change no field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.limitations.is_none()
            && self.login_url.is_none()
            && self.pricing_url.is_none()
    }
}

/// A full edit-form submission replaces every field, including clearing
/// the pricing URL when the form left it blank.
impl From<ServiceFormData> for ServicePatch {
    fn from(form: ServiceFormData) -> Self {
        Self {
            name: Some(form.name),
            category: Some(form.category),
            description: Some(form.description),
            limitations: Some(form.limitations),
            login_url: Some(form.login_url),
            pricing_url: Some(form.pricing_url),
        }
    }
}
