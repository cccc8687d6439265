use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The two kinds of content a screen can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// Still image, shown for its configured duration
    #[serde(alias = "Resim", alias = "image")]
    Image,
    /// Video, shown until playback ends
    #[serde(alias = "video")]
    Video,
}

impl MediaKind {
    /// Classify an upload by its MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// File extension to store an upload under, derived from its declared
    /// MIME type. Subtypes that browsers could run as markup (SVG) or that
    /// are not recognized get no extension and are served as opaque bytes.
    pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
        let mime = mime.split(';').next().unwrap_or_default();
        let mime = mime.trim().to_ascii_lowercase();
        let ext = match mime.as_str() {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            "image/bmp" => "bmp",
            "image/avif" => "avif",
            "video/mp4" => "mp4",
            "video/webm" => "webm",
            "video/ogg" => "ogv",
            "video/quicktime" => "mov",
            "video/x-matroska" => "mkv",
            "video/mpeg" => "mpeg",
            "video/x-msvideo" => "avi",
            _ => return None,
        };
        Some(ext)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Image" | "image" | "Resim" => Ok(MediaKind::Image),
            "Video" | "video" => Ok(MediaKind::Video),
            other => Err(ModelError::InvalidMediaKind(other.to_string())),
        }
    }
}
