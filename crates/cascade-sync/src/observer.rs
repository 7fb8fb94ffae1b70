//! Progress hook for callers that display a running sync.

use cascade_core::responses::ItemReport;

/// Receives progress events from [`crate::SyncDriver`].
///
/// Both methods default to no-ops.
pub trait SyncObserver: Send + Sync {
    /// All item pages are loaded; `total` items will be processed.
    fn items_loaded(&self, _total: usize) {}

    /// One item finished, whether synced or skipped.
    fn item_finished(&self, _report: &ItemReport) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}
