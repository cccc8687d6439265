//! Core data model definitions shared across signage crates.
#![allow(missing_docs)]

pub mod assignment;
pub mod config;
pub mod duration;
pub mod error;
pub mod ids;
pub mod media;
pub mod media_type;
pub mod playlist;
pub mod screen;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use assignment::{AssignPlaylistRequest, Assignment, AssignmentDetails};
pub use config::{PlaylistConfig, ScreenConfig, ScreenInfo};
pub use duration::{DEFAULT_DISPLAY_SECS, DisplayDuration, MAX_DISPLAY_SECS};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{AssignmentId, MediaId, PlaylistId, ScreenId, UserId};
pub use media::{Media, MediaItem, NewMedia};
pub use media_type::MediaKind;
pub use playlist::{
    AppendMediaRequest, PlaylistEntry, PlaylistRecord, PlaylistRequest,
    PlaylistSummary, PopulatedEntry, PopulatedPlaylist,
};
pub use screen::{
    CreateScreenRequest, Screen, ScreenDetails, ScreenListing, ScreenStatus,
    UpdateScreenRequest,
};
pub use user::{Claims, Credentials, TokenResponse, User, VerifyResponse};
