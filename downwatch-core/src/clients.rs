use async_trait::async_trait;

use downwatch_model::DownloadTask;

use crate::Result;

/// Read-only view of one download client's task history.
///
/// Implementations wrap a concrete client protocol (sabnzbd, nzbget,
/// qbittorrent, ...) and surface transport or decode failures as
/// [`crate::ReconcileError::ClientUnavailable`]. No retries happen behind
/// this trait; the caller's scheduler retries by running another pass.
#[async_trait]
pub trait DownloadClientGateway: Send + Sync {
    /// Fetch up to `limit` of the client's most recent task-history
    /// entries, newest first, starting at `offset`.
    async fn recent_history(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<DownloadTask>>;
}
