//! Turns a screen id into the rotation that screen should play.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use signage_model::{
    MediaItem, PlaylistConfig, PopulatedPlaylist, Screen, ScreenConfig, ScreenId, ScreenInfo,
};

use crate::database::ports::{PlaylistRepository, ScreenRepository};
use crate::error::SignageError;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("screen not found")]
    ScreenNotFound,

    #[error("no playlist assigned")]
    NoPlaylistAssigned,

    #[error(transparent)]
    Storage(#[from] SignageError),
}

/// Joins screen, assigned playlist and ordered media into a `ScreenConfig`.
#[derive(Clone)]
pub struct ScreenConfigResolver {
    screens: Arc<dyn ScreenRepository>,
    playlists: Arc<dyn PlaylistRepository>,
}

impl std::fmt::Debug for ScreenConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenConfigResolver").finish_non_exhaustive()
    }
}

impl ScreenConfigResolver {
    pub fn new(screens: Arc<dyn ScreenRepository>, playlists: Arc<dyn PlaylistRepository>) -> Self {
        Self { screens, playlists }
    }

    pub async fn resolve(&self, screen_id: ScreenId) -> Result<ScreenConfig, ResolveError> {
        let screen = self
            .screens
            .get_screen(screen_id)
            .await?
            .ok_or(ResolveError::ScreenNotFound)?;

        let playlist_id = screen
            .current_playlist
            .ok_or(ResolveError::NoPlaylistAssigned)?;

        // A dangling reference reads the same as no assignment.
        let playlist = self
            .playlists
            .get_playlist(playlist_id)
            .await?
            .ok_or(ResolveError::NoPlaylistAssigned)?;

        debug!(
            screen_id = %screen.id,
            playlist_id = %playlist.id,
            items = playlist.media_items.len(),
            "resolved screen configuration"
        );
        Ok(build_config(&screen, &playlist))
    }
}

/// Flatten a populated playlist into the shape the player consumes. Each
/// item carries its slot's duration, not the media row's default.
pub fn build_config(screen: &Screen, playlist: &PopulatedPlaylist) -> ScreenConfig {
    ScreenConfig {
        screen: ScreenInfo {
            id: screen.id,
            name: screen.name.clone(),
            location: screen.location.clone(),
            status: screen.status,
        },
        playlist: PlaylistConfig {
            id: playlist.id,
            name: playlist.name.clone(),
            media_items: playlist
                .media_items
                .iter()
                .map(|entry| MediaItem::from_media(&entry.media, entry.duration))
                .collect(),
        },
    }
}
