use async_trait::async_trait;
use chrono::{DateTime, Utc};

use downwatch_model::{HistoryEventKind, HistoryRecord};

use crate::Result;

/// Read-only view of the internal grab/failure ledger.
///
/// The ledger owns and persists history records; this service only reads
/// snapshots. Both queries surface storage failures as
/// [`crate::ReconcileError::LedgerUnavailable`].
///
/// "Already failed" is deliberately answered by the separate [`failed`]
/// query rather than by a status field on records returned from
/// [`records_between`]: grab and failure events are distinct ledger rows.
///
/// [`failed`]: HistoryLedger::failed
/// [`records_between`]: HistoryLedger::records_between
#[async_trait]
pub trait HistoryLedger: Send + Sync {
    /// Records of the given kind with `start <= date <= end`, in ledger
    /// (insertion) order.
    async fn records_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        kind: HistoryEventKind,
    ) -> Result<Vec<HistoryRecord>>;

    /// All records already flagged as failed downloads.
    async fn failed(&self) -> Result<Vec<HistoryRecord>>;
}
