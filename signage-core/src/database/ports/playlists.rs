use async_trait::async_trait;

use signage_model::{PlaylistEntry, PlaylistId, PlaylistRecord, PopulatedPlaylist};

use crate::error::Result;

#[async_trait]
pub trait PlaylistRepository: Send + Sync {
    /// All playlists with their media joined in, newest first.
    async fn list_playlists(&self) -> Result<Vec<PopulatedPlaylist>>;

    /// One playlist with entries in position order.
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<PopulatedPlaylist>>;

    /// Fails with `InvalidInput` when an entry references unknown media.
    async fn create_playlist(&self, playlist: &PlaylistRecord) -> Result<()>;

    /// Replace name and entries. Returns `false` when the playlist is unknown.
    async fn update_playlist(
        &self,
        id: PlaylistId,
        name: &str,
        entries: &[PlaylistEntry],
    ) -> Result<bool>;

    /// Append one entry at the end. Returns `false` when the playlist is
    /// unknown.
    async fn append_entry(&self, id: PlaylistId, entry: &PlaylistEntry) -> Result<bool>;

    /// Remove the playlist and clear it from any screen that shows it.
    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool>;
}
