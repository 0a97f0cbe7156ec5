//! Core data model definitions shared across downwatch crates.
#![allow(missing_docs)]

pub mod download;
pub mod events;
pub mod history;
pub mod ids;

// Intentionally curated re-exports for downstream consumers.
pub use download::{DownloadTask, TaskStatus};
pub use events::DownloadFailedEvent;
pub use history::{
    DOWNLOAD_CLIENT_ID_KEY, DOWNLOAD_CLIENT_KEY, HistoryEventKind,
    HistoryRecord,
};
pub use ids::{EpisodeID, HistoryID, SeriesID};
