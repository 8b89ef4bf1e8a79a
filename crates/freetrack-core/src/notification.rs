//! User-facing notifications emitted by the collection store.

use serde::{Deserialize, Serialize};

/// A confirmation shown to the user after a successful change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    ServiceAdded { id: String, name: String },
    ServiceUpdated { id: String, name: String },
    ServiceDeleted { id: String, name: String },
}

impl Notice {
    /// Toast title for this notice.
    pub fn title(&self) -> &'static str {
        match self {
            Notice::ServiceAdded { .. } => "Service added successfully!",
            Notice::ServiceUpdated { .. } => "Service updated successfully!",
            Notice::ServiceDeleted { .. } => "Service deleted successfully!",
        }
    }

    /// Id of the service the notice is about.
    pub fn service_id(&self) -> &str {
        match self {
            Notice::ServiceAdded { id, .. }
            | Notice::ServiceUpdated { id, .. }
            | Notice::ServiceDeleted { id, .. } => id,
        }
    }
}

/// Write-only sink for notices (toasts, status bar, log).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Discards every notice.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notice: Notice) {}
}
