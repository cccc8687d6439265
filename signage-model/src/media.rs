use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{duration::DisplayDuration, ids::MediaId, media_type::MediaKind};

/// A stored media asset as managed through the admin API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: MediaId,
    pub name: String,
    pub media_type: MediaKind,
    /// Public path under `/uploads`, e.g. `/uploads/1718-42.png`
    pub file_path: String,
    #[serde(default)]
    pub duration: DisplayDuration,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to register a freshly stored upload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedia {
    pub name: String,
    pub media_type: MediaKind,
    pub file_path: String,
    pub duration: DisplayDuration,
}

impl NewMedia {
    pub fn into_media(self, now: DateTime<Utc>) -> Media {
        Media {
            id: MediaId::new(),
            name: self.name,
            media_type: self.media_type,
            file_path: self.file_path,
            duration: self.duration,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One entry of a resolved rotation, in the shape screens consume.
///
/// `duration` is the playlist slot's duration, already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: MediaId,
    pub name: String,
    pub media_type: MediaKind,
    pub file_path: String,
    #[serde(default)]
    pub duration: DisplayDuration,
}

impl MediaItem {
    pub fn from_media(media: &Media, duration: DisplayDuration) -> Self {
        MediaItem {
            id: media.id,
            name: media.name.clone(),
            media_type: media.media_type,
            file_path: media.file_path.clone(),
            duration,
        }
    }

    pub fn is_video(&self) -> bool {
        self.media_type == MediaKind::Video
    }
}
