use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    duration::DisplayDuration,
    ids::{MediaId, PlaylistId},
    media::Media,
};

/// One slot of a playlist: a media reference plus how long to show it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    pub media: MediaId,
    #[serde(default)]
    pub duration: DisplayDuration,
}

/// A playlist as persisted: entries keep their caller-defined order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRecord {
    pub id: PlaylistId,
    pub name: String,
    pub media_items: Vec<PlaylistEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry with its media row joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedEntry {
    pub media: Media,
    pub duration: DisplayDuration,
}

/// Playlist with every entry's media resolved, as returned by the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedPlaylist {
    pub id: PlaylistId,
    pub name: String,
    pub media_items: Vec<PopulatedEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal playlist reference embedded in screen listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    pub id: PlaylistId,
    pub name: String,
}

/// Body of `POST /api/playlists` and `PUT /api/playlists/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub media_items: Vec<PlaylistEntry>,
}

/// Body of `POST /api/playlists/{id}/media`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendMediaRequest {
    pub media_id: MediaId,
    #[serde(default)]
    pub duration: DisplayDuration,
}
