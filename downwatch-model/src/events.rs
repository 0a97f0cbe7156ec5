use chrono::{DateTime, Utc};

use crate::ids::{EpisodeID, HistoryID, SeriesID};

/// Event published once per newly detected download failure.
///
/// Carries enough context for downstream consumers (UI refresh, retry
/// pipelines, alerting) to act without re-querying the ledger. Constructed
/// per detected failure and discarded after publication; never persisted by
/// the reconciliation service itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DownloadFailedEvent {
    /// Ledger record that grabbed the release which has now failed.
    pub history_id: HistoryID,
    pub episode_id: EpisodeID,
    pub series_id: SeriesID,
    pub source_title: String,
    /// Download client that reported the failure.
    pub client: String,
    /// The client's own identifier for the failed task.
    pub client_task_id: String,
    /// Failure detail as reported by the client, when it gave one.
    pub reason: Option<String>,
    pub detected_at: DateTime<Utc>,
}
