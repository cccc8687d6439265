use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use signage_model::{MediaId, MediaItem, MediaKind};

/// The surface the driver renders to.
#[async_trait]
pub trait MediaSink: Send {
    /// Put `item` on screen, replacing whatever was shown before.
    async fn show(&mut self, item: &MediaItem, url: &str);

    /// Nothing to play.
    async fn idle(&mut self);

    /// Resolves once the video most recently passed to [`MediaSink::show`]
    /// finishes playing.
    async fn media_ended(&mut self);
}

/// Logs what would be on screen. Videos "end" after their nominal duration
/// since nothing is actually decoded.
#[derive(Debug, Default)]
pub struct LogSink {
    video_length: Duration,
}

#[async_trait]
impl MediaSink for LogSink {
    async fn show(&mut self, item: &MediaItem, url: &str) {
        info!(
            media_id = %item.id,
            name = %item.name,
            kind = %item.media_type,
            %url,
            "now showing"
        );
        if item.media_type == MediaKind::Video {
            self.video_length = item.duration.as_duration();
        }
    }

    async fn idle(&mut self) {
        info!("no content to show");
    }

    async fn media_ended(&mut self) {
        tokio::time::sleep(self.video_length).await;
    }
}

/// Observable output of a [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Show { media: MediaId, url: String },
    Idle,
}

/// Forwards everything over channels so an embedding renderer (or a test)
/// can watch the rotation and report when videos finish.
#[derive(Debug)]
pub struct ChannelSink {
    events: mpsc::UnboundedSender<SinkEvent>,
    ended: mpsc::UnboundedReceiver<()>,
}

/// The other ends of a [`ChannelSink`].
#[derive(Debug)]
pub struct SinkHandle {
    pub events: mpsc::UnboundedReceiver<SinkEvent>,
    ended: mpsc::UnboundedSender<()>,
}

impl SinkHandle {
    /// Signal that the current video reached its end.
    pub fn video_ended(&self) {
        let _ = self.ended.send(());
    }
}

impl ChannelSink {
    pub fn new() -> (Self, SinkHandle) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (ended_tx, ended_rx) = mpsc::unbounded_channel();
        (
            Self {
                events: events_tx,
                ended: ended_rx,
            },
            SinkHandle {
                events: events_rx,
                ended: ended_tx,
            },
        )
    }

    /// Drop end signals meant for whatever was on screen before.
    fn discard_stale_ends(&mut self) {
        while self.ended.try_recv().is_ok() {}
    }
}

#[async_trait]
impl MediaSink for ChannelSink {
    async fn show(&mut self, item: &MediaItem, url: &str) {
        self.discard_stale_ends();
        let _ = self.events.send(SinkEvent::Show {
            media: item.id,
            url: url.to_string(),
        });
    }

    async fn idle(&mut self) {
        self.discard_stale_ends();
        let _ = self.events.send(SinkEvent::Idle);
    }

    async fn media_ended(&mut self) {
        if self.ended.recv().await.is_none() {
            // Handle dropped: nobody will ever report an end.
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn going_idle_discards_pending_end_signals() {
        let (mut sink, mut handle) = ChannelSink::new();
        handle.video_ended();

        sink.idle().await;

        assert_eq!(handle.events.recv().await, Some(SinkEvent::Idle));
        assert!(sink.ended.try_recv().is_err());
    }
}
