use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::ids::{EpisodeID, HistoryID, SeriesID};

/// Data-map key naming the download client that handled a grab.
pub const DOWNLOAD_CLIENT_KEY: &str = "downloadClient";
/// Data-map key carrying the client's own task identifier for a grab.
pub const DOWNLOAD_CLIENT_ID_KEY: &str = "downloadClientId";

/// Kind of domain event a ledger record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HistoryEventKind {
    Grabbed,
    Imported,
    Failed,
}

impl fmt::Display for HistoryEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Grabbed => "grabbed",
            Self::Imported => "imported",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One record in the internal append-only history ledger.
///
/// Records are owned and persisted by the ledger; downwatch reads them as
/// snapshots. The `data` map carries cross-reference fields written at grab
/// time, notably [`DOWNLOAD_CLIENT_KEY`] and [`DOWNLOAD_CLIENT_ID_KEY`],
/// which together form the correlation key back to a client task.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryRecord {
    pub id: HistoryID,
    pub kind: HistoryEventKind,
    pub date: DateTime<Utc>,
    pub episode_id: EpisodeID,
    pub series_id: SeriesID,
    /// Release name as it was grabbed, kept for operator-facing messages.
    pub source_title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: HashMap<String, String>,
}

impl HistoryRecord {
    pub fn new(
        kind: HistoryEventKind,
        episode_id: EpisodeID,
        series_id: SeriesID,
        source_title: impl Into<String>,
    ) -> Self {
        Self {
            id: HistoryID::new(),
            kind,
            date: Utc::now(),
            episode_id,
            series_id,
            source_title: source_title.into(),
            data: HashMap::new(),
        }
    }

    /// Attach the correlation key fields written when a release is handed to
    /// a download client.
    pub fn with_download_client(
        mut self,
        client: impl Into<String>,
        client_task_id: impl Into<String>,
    ) -> Self {
        self.data
            .insert(DOWNLOAD_CLIENT_KEY.to_string(), client.into());
        self.data
            .insert(DOWNLOAD_CLIENT_ID_KEY.to_string(), client_task_id.into());
        self
    }

    pub fn download_client(&self) -> Option<&str> {
        self.data.get(DOWNLOAD_CLIENT_KEY).map(String::as_str)
    }

    pub fn download_client_id(&self) -> Option<&str> {
        self.data.get(DOWNLOAD_CLIENT_ID_KEY).map(String::as_str)
    }

    /// Whether this record's correlation key matches the given client task
    /// identity. Both fields must be present; a record without them never
    /// matches anything.
    pub fn matches_task(&self, client: &str, task_id: &str) -> bool {
        self.download_client() == Some(client)
            && self.download_client_id() == Some(task_id)
    }
}
