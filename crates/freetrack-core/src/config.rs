//! Freetrack configuration model.

use serde::{Deserialize, Serialize};

use crate::service::DEFAULT_STORAGE_KEY;

/// What a mutation does when the target id is not in the collection.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingIdPolicy {
    /// Leave the collection unchanged and report nothing.
    Ignore,
    /// Fail with a `NotFound` error.
    Reject,
}

impl Default for MissingIdPolicy {
    fn default() -> Self {
        MissingIdPolicy::Ignore
    }
}

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FreetrackConfig {
    /// Storage key the collection is persisted under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub missing_id_policy: MissingIdPolicy,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for FreetrackConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            missing_id_policy: MissingIdPolicy::default(),
        }
    }
}

impl FreetrackConfig {
    /// Default config with missing-id mutations rejected.
    pub fn strict() -> Self {
        Self {
            missing_id_policy: MissingIdPolicy::Reject,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: FreetrackConfig = toml::from_str("").unwrap();
        assert_eq!(config, FreetrackConfig::default());
        assert_eq!(config.storage_key, "free-services-tracker");
        assert_eq!(config.missing_id_policy, MissingIdPolicy::Ignore);
    }

    #[test]
    fn test_parse_reject_policy() {
        let config: FreetrackConfig = toml::from_str(
            r#"
storage_key = "my-services"
missing_id_policy = "reject"
"#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "my-services");
        assert_eq!(config.missing_id_policy, MissingIdPolicy::Reject);
    }
}
