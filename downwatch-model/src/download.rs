use std::collections::HashMap;
use std::fmt;

/// Status of a task as reported by the download client itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaskStatus {
    Queued,
    Paused,
    Downloading,
    Completed,
    Failed,
}

impl TaskStatus {
    pub const fn is_failed(self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Queued => "queued",
            Self::Paused => "paused",
            Self::Downloading => "downloading",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Immutable snapshot of one entry in a download client's task history.
///
/// The client owns these records; downwatch only reads them. The `id` is
/// opaque and only guaranteed unique within the originating client, so it is
/// always paired with `client` when used for correlation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DownloadTask {
    pub id: String,
    /// Name of the download client that produced this record.
    pub client: String,
    pub title: String,
    pub status: TaskStatus,
    /// Client-supplied detail, e.g. the failure message for failed tasks.
    pub message: Option<String>,
    /// Arbitrary client-supplied key/value metadata, passed through as-is.
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: HashMap<String, String>,
}

impl DownloadTask {
    pub fn new(
        id: impl Into<String>,
        client: impl Into<String>,
        title: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id: id.into(),
            client: client.into(),
            title: title.into(),
            status,
            message: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failed_status_is_failed() {
        assert!(TaskStatus::Failed.is_failed());
        assert!(!TaskStatus::Queued.is_failed());
        assert!(!TaskStatus::Downloading.is_failed());
        assert!(!TaskStatus::Completed.is_failed());
    }
}
