use async_trait::async_trait;
use tokio::sync::broadcast;

use downwatch_model::DownloadFailedEvent;

/// Destination for failure notifications.
///
/// Fire-and-forget from the reconciliation service's perspective: no
/// acknowledgement is awaited and delivery guarantees belong to the sink.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn publish(&self, event: DownloadFailedEvent);
}

/// In-process [`EventSink`] fanning events out over a tokio broadcast
/// channel. Subscribers that lag past the channel capacity lose the oldest
/// events, which is acceptable for notification fan-out; a sink with
/// stronger guarantees can replace this behind the same trait.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    tx: broadcast::Sender<DownloadFailedEvent>,
}

impl BroadcastSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DownloadFailedEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventSink for BroadcastSink {
    async fn publish(&self, event: DownloadFailedEvent) {
        // Send only errors when there are no live subscribers; the event is
        // dropped, which matches fire-and-forget semantics.
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use downwatch_model::{EpisodeID, HistoryID, SeriesID};

    fn event() -> DownloadFailedEvent {
        DownloadFailedEvent {
            history_id: HistoryID::new(),
            episode_id: EpisodeID::new(),
            series_id: SeriesID::new(),
            source_title: "Some.Show.S01E01.720p".to_string(),
            client: "sabnzbd".to_string(),
            client_task_id: "7".to_string(),
            reason: None,
            detected_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn delivers_to_subscriber() {
        let sink = BroadcastSink::new(16);
        let mut rx = sink.subscribe();

        let published = event();
        sink.publish(published.clone()).await;

        let received = rx.recv().await.unwrap();
        assert_eq!(received, published);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_silent() {
        let sink = BroadcastSink::new(16);
        sink.publish(event()).await;
    }
}
