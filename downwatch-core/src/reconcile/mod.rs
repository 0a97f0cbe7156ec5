//! One reconciliation pass: pull client history, early-exit when there is
//! nothing to do, correlate failures against the grab ledger, publish.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};

use downwatch_model::{DownloadFailedEvent, HistoryEventKind};

use crate::Result;
use crate::clients::DownloadClientGateway;
use crate::config::ReconcileConfig;
use crate::events::EventSink;
use crate::ledger::HistoryLedger;

pub mod correlator;

/// Drives failed-download reconciliation for a single download client.
///
/// Construct one service per client: the internal pass guard serializes
/// overlapping passes for that client (two concurrent passes could both see
/// a failure as novel and double-publish), while services for distinct
/// clients run freely in parallel. The service holds no other state between
/// passes; every pass re-reads both collaborators.
pub struct FailedDownloadService {
    client: String,
    gateway: Arc<dyn DownloadClientGateway>,
    ledger: Arc<dyn HistoryLedger>,
    sink: Arc<dyn EventSink>,
    config: ReconcileConfig,
    pass_guard: Mutex<()>,
}

impl fmt::Debug for FailedDownloadService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailedDownloadService")
            .field("client", &self.client)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl FailedDownloadService {
    pub fn new(
        client: impl Into<String>,
        gateway: Arc<dyn DownloadClientGateway>,
        ledger: Arc<dyn HistoryLedger>,
        sink: Arc<dyn EventSink>,
        config: ReconcileConfig,
    ) -> Self {
        Self {
            client: client.into(),
            gateway,
            ledger,
            sink,
            config,
            pass_guard: Mutex::new(()),
        }
    }

    /// Run one reconciliation pass.
    ///
    /// Reads are ordered client-history-first so an idle client never costs
    /// a ledger query. Publishes happen only after every read has
    /// succeeded; a gateway or ledger error aborts the pass with zero
    /// publishes and is surfaced to the caller's scheduler, which retries
    /// by scheduling the next pass. The known-failures dedup makes that
    /// retry safe.
    pub async fn check_for_failed_downloads(&self) -> Result<()> {
        let _pass = self.pass_guard.lock().await;

        let history = self
            .gateway
            .recent_history(0, self.config.history_page_size)
            .await?;
        if history.is_empty() {
            debug!(
                client = %self.client,
                "download client reported no task history"
            );
            return Ok(());
        }

        let failed_tasks: Vec<_> = history
            .into_iter()
            .filter(|task| task.status.is_failed())
            .collect();
        if failed_tasks.is_empty() {
            debug!(
                client = %self.client,
                "no failed tasks in client history"
            );
            return Ok(());
        }

        let end = Utc::now();
        let start = end - self.config.grab_window();
        let grabbed = self
            .ledger
            .records_between(start, end, HistoryEventKind::Grabbed)
            .await?;
        if grabbed.is_empty() {
            debug!(
                client = %self.client,
                failed_tasks = failed_tasks.len(),
                "no recent grabs to correlate against"
            );
            return Ok(());
        }

        let known_failed = self.ledger.failed().await?;
        let matches =
            correlator::correlate(&failed_tasks, &grabbed, &known_failed);

        for matched in matches {
            info!(
                client = %self.client,
                task = %matched.task.id,
                source = %matched.record.source_title,
                "detected failed download"
            );

            let event = DownloadFailedEvent {
                history_id: matched.record.id,
                episode_id: matched.record.episode_id,
                series_id: matched.record.series_id,
                source_title: matched.record.source_title.clone(),
                client: matched.task.client.clone(),
                client_task_id: matched.task.id.clone(),
                reason: matched.task.message.clone(),
                detected_at: end,
            };
            self.sink.publish(event).await;
        }

        Ok(())
    }
}
