use std::time::Duration;

use tokio::{sync::watch, time::MissedTickBehavior};
use tracing::{info, warn};

use signage_model::PlaylistConfig;

use crate::client::ConfigSource;

/// What the driver should be rotating through. `None` means idle.
pub type PublishedPlaylist = Option<PlaylistConfig>;

/// Periodically fetches the screen config and publishes playlist changes.
#[derive(Debug)]
pub struct ConfigPoller<S> {
    source: S,
    interval: Duration,
    tx: watch::Sender<PublishedPlaylist>,
}

impl<S: ConfigSource> ConfigPoller<S> {
    /// Returns the poller plus the receiver the driver listens on. The
    /// channel starts out idle until the first successful fetch.
    pub fn new(source: S, interval: Duration) -> (Self, watch::Receiver<PublishedPlaylist>) {
        let (tx, rx) = watch::channel(None);
        (
            Self {
                source,
                interval,
                tx,
            },
            rx,
        )
    }

    /// Fetch once. Returns `true` when a different playlist was published.
    ///
    /// Fetch errors keep whatever is currently published.
    pub async fn poll_once(&self) -> bool {
        match self.source.fetch().await {
            Ok(config) => self.publish(config.map(|c| c.playlist)),
            Err(err) => {
                warn!(error = %err, "config fetch failed; keeping current rotation");
                false
            }
        }
    }

    fn publish(&self, next: PublishedPlaylist) -> bool {
        let changed = self.tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next.clone();
            true
        });
        if changed {
            match &next {
                Some(playlist) => info!(
                    playlist_id = %playlist.id,
                    name = %playlist.name,
                    items = playlist.media_items.len(),
                    "playlist changed"
                ),
                None => info!("no playlist assigned; going idle"),
            }
        }
        changed
    }

    /// Poll until every receiver is gone.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once().await;
                }
                _ = self.tx.closed() => {
                    info!("config poller stopping");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use signage_model::{PlaylistId, ScreenConfig, ScreenId, ScreenInfo, ScreenStatus};

    use super::*;
    use crate::error::{PlayerError, Result};

    #[derive(Clone, Default)]
    struct Scripted(Arc<Mutex<VecDeque<Result<Option<ScreenConfig>>>>>);

    impl Scripted {
        fn push(&self, next: Result<Option<ScreenConfig>>) {
            self.0.lock().unwrap().push_back(next);
        }
    }

    #[async_trait]
    impl ConfigSource for Scripted {
        async fn fetch(&self) -> Result<Option<ScreenConfig>> {
            self.0.lock().unwrap().pop_front().unwrap_or(Ok(None))
        }
    }

    fn config(playlist_id: PlaylistId, name: &str) -> ScreenConfig {
        ScreenConfig {
            screen: ScreenInfo {
                id: ScreenId::new(),
                name: "Lobby".into(),
                location: None,
                status: ScreenStatus::Active,
            },
            playlist: PlaylistConfig {
                id: playlist_id,
                name: name.into(),
                media_items: Vec::new(),
            },
        }
    }

    fn server_error() -> PlayerError {
        PlayerError::Status {
            status: StatusCode::BAD_GATEWAY,
            url: "http://test/api/screens/x/config".into(),
        }
    }

    #[tokio::test]
    async fn publishes_only_when_the_playlist_changes() {
        let source = Scripted::default();
        let (poller, rx) = ConfigPoller::new(source.clone(), Duration::from_secs(30));
        let id = PlaylistId::new();

        source.push(Ok(Some(config(id, "Day"))));
        assert!(poller.poll_once().await);
        assert_eq!(rx.borrow().as_ref().map(|p| p.name.as_str()), Some("Day"));

        source.push(Ok(Some(config(id, "Day"))));
        assert!(!poller.poll_once().await);

        source.push(Ok(Some(config(id, "Day (edited)"))));
        assert!(poller.poll_once().await);
    }

    #[tokio::test]
    async fn errors_keep_the_current_rotation() {
        let source = Scripted::default();
        let (poller, rx) = ConfigPoller::new(source.clone(), Duration::from_secs(30));
        let id = PlaylistId::new();

        source.push(Ok(Some(config(id, "Day"))));
        poller.poll_once().await;
        source.push(Err(server_error()));
        assert!(!poller.poll_once().await);
        assert_eq!(rx.borrow().as_ref().map(|p| p.id), Some(id));
    }

    #[tokio::test]
    async fn unassigned_screen_goes_idle() {
        let source = Scripted::default();
        let (poller, rx) = ConfigPoller::new(source.clone(), Duration::from_secs(30));

        source.push(Ok(Some(config(PlaylistId::new(), "Day"))));
        poller.poll_once().await;
        source.push(Ok(None));
        assert!(poller.poll_once().await);
        assert!(rx.borrow().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn run_polls_on_the_interval_and_stops_without_receivers() {
        let source = Scripted::default();
        let (poller, mut rx) = ConfigPoller::new(source.clone(), Duration::from_secs(30));
        source.push(Ok(Some(config(PlaylistId::new(), "First"))));
        let task = tokio::spawn(poller.run());

        // First tick fires immediately.
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().as_ref().map(|p| p.name.as_str()), Some("First"));

        let start = tokio::time::Instant::now();
        source.push(Ok(Some(config(PlaylistId::new(), "Second"))));
        rx.changed().await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(30));

        drop(rx);
        task.await.unwrap();
    }
}
