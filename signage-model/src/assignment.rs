use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    ids::{AssignmentId, PlaylistId, ScreenId},
    playlist::PlaylistSummary,
    screen::Screen,
};

/// Historical record of a playlist being assigned to a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: AssignmentId,
    pub screen_id: ScreenId,
    pub playlist_id: PlaylistId,
    pub is_active: bool,
    pub assigned_at: DateTime<Utc>,
}

/// Assignment with both sides joined in. Either side may have been deleted
/// since the assignment was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDetails {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub screen: Option<Screen>,
    pub playlist: Option<PlaylistSummary>,
}

/// Body of `POST /api/assignments`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPlaylistRequest {
    pub screen_id: ScreenId,
    pub playlist_id: PlaylistId,
}
