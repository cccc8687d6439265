use tokio::sync::watch;
use tracing::{debug, info};

use signage_core::{AdvanceTrigger, Generation, PlaybackCursor};

use crate::{poller::PublishedPlaylist, sink::MediaSink, urls::resolve_media_url};

/// Owns the rotation for one screen.
///
/// At most one advancement is pending at a time: either a display timer for
/// an image or the sink's end-of-video signal. A playlist change on the
/// watch channel drops that pending future and restarts from the first item.
#[derive(Debug)]
pub struct PlaybackDriver<S> {
    cursor: PlaybackCursor,
    playlists: watch::Receiver<PublishedPlaylist>,
    sink: S,
    media_base: String,
}

impl<S: MediaSink> PlaybackDriver<S> {
    pub fn new(
        playlists: watch::Receiver<PublishedPlaylist>,
        sink: S,
        media_base: impl Into<String>,
    ) -> Self {
        Self {
            cursor: PlaybackCursor::default(),
            playlists,
            sink,
            media_base: media_base.into(),
        }
    }

    /// Run until the publishing side of the channel goes away.
    pub async fn run(mut self) {
        self.reload().await;

        loop {
            let pending = self
                .cursor
                .current()
                .ok()
                .map(|item| (AdvanceTrigger::for_item(item), self.cursor.generation()));

            match pending {
                None => {
                    if self.playlists.changed().await.is_err() {
                        break;
                    }
                    self.reload().await;
                }
                Some((trigger, generation)) => {
                    tokio::select! {
                        changed = self.playlists.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            self.reload().await;
                        }
                        _ = wait_for(trigger, &mut self.sink) => {
                            self.advance(generation).await;
                        }
                    }
                }
            }
        }

        info!("playlist source closed; driver stopping");
    }

    async fn reload(&mut self) {
        let items = self
            .playlists
            .borrow_and_update()
            .as_ref()
            .map(|playlist| playlist.media_items.clone())
            .unwrap_or_default();
        let generation = self.cursor.init(items);
        debug!(
            generation = generation.value(),
            items = self.cursor.len(),
            "rotation reinitialized"
        );
        self.show_current().await;
    }

    async fn advance(&mut self, generation: Generation) {
        if self.cursor.advance_for(generation).is_some() {
            self.show_current().await;
        }
    }

    async fn show_current(&mut self) {
        match self.cursor.current() {
            Ok(item) => {
                let url = resolve_media_url(&self.media_base, &item.file_path);
                self.sink.show(item, &url).await;
            }
            Err(_) => self.sink.idle().await,
        }
    }
}

async fn wait_for<S: MediaSink>(trigger: AdvanceTrigger, sink: &mut S) {
    match trigger {
        AdvanceTrigger::Timer(duration) => tokio::time::sleep(duration).await,
        AdvanceTrigger::MediaEnd => sink.media_ended().await,
    }
}
