use serde::{Deserialize, Serialize};

use crate::{
    ids::{PlaylistId, ScreenId},
    media::MediaItem,
    screen::ScreenStatus,
};

/// Screen section of a resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenInfo {
    pub id: ScreenId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: ScreenStatus,
}

/// Playlist section of a resolved configuration: the ordered rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistConfig {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub media_items: Vec<MediaItem>,
}

/// Payload of `GET /api/screens/{id}/config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenConfig {
    pub screen: ScreenInfo,
    pub playlist: PlaylistConfig,
}

impl ScreenConfig {
    pub fn media_items(&self) -> &[MediaItem] {
        &self.playlist.media_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_payload_normalizes_durations_on_ingest() {
        let json = r#"{
            "screen": {"id": "0192d9c4-63a0-7c4e-9d0b-5b1f5e0f0001", "name": "Lobby"},
            "playlist": {
                "id": "0192d9c4-63a0-7c4e-9d0b-5b1f5e0f0002",
                "name": "Morning",
                "mediaItems": [
                    {"id": "0192d9c4-63a0-7c4e-9d0b-5b1f5e0f0003", "name": "a",
                     "mediaType": "Image", "filePath": "/uploads/a.png", "duration": 0},
                    {"id": "0192d9c4-63a0-7c4e-9d0b-5b1f5e0f0004", "name": "b",
                     "mediaType": "Video", "filePath": "/uploads/b.mp4", "duration": 10}
                ]
            }
        }"#;

        let config: ScreenConfig = serde_json::from_str(json).unwrap();
        let items = config.media_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].duration.secs(), 5.0);
        assert_eq!(items[1].duration.secs(), 10.0);
        assert!(items[1].is_video());
        assert_eq!(config.screen.status, ScreenStatus::Active);
    }
}
