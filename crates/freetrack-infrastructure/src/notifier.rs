//! Notification sink that writes notices to the log.

use freetrack_core::notification::{Notice, Notifier};

/// Logs every notice at info level.
///
/// Used when no UI toast surface is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::info!(service_id = notice.service_id(), "{}", notice.title());
    }
}
