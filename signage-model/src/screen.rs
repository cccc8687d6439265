use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    error::ModelError,
    ids::{PlaylistId, ScreenId},
    playlist::{PlaylistSummary, PopulatedPlaylist},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenStatus {
    #[default]
    Active,
    Inactive,
}

impl ScreenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenStatus::Active => "active",
            ScreenStatus::Inactive => "inactive",
        }
    }
}

impl Display for ScreenStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScreenStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ScreenStatus::Active),
            "inactive" => Ok(ScreenStatus::Inactive),
            other => Err(ModelError::InvalidScreenStatus(other.to_string())),
        }
    }
}

/// A physical display device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: ScreenId,
    pub name: String,
    pub location: Option<String>,
    pub status: ScreenStatus,
    pub current_playlist: Option<PlaylistId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Placeholder name older deployments gave to unnamed screens.
pub const LEGACY_UNNAMED_SCREEN: &str = "İsimsiz Ekran";

impl Screen {
    /// Whether this screen still carries an empty or placeholder name.
    pub fn needs_generated_name(&self) -> bool {
        let name = self.name.trim();
        name.is_empty() || name == LEGACY_UNNAMED_SCREEN
    }

    /// `Screen <last four id characters>`.
    pub fn generated_name(&self) -> String {
        let simple = self.id.0.simple().to_string();
        let tail = &simple[simple.len() - 4..];
        format!("Screen {tail}")
    }
}

/// Screen row as listed in the admin panel, with its playlist name joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenListing {
    #[serde(flatten)]
    pub screen: Screen,
    pub playlist: Option<PlaylistSummary>,
}

/// Screen with its assigned playlist fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDetails {
    #[serde(flatten)]
    pub screen: Screen,
    pub playlist: Option<PopulatedPlaylist>,
}

/// Body of `POST /api/screens`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScreenRequest {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<ScreenStatus>,
}

/// Body of `PUT /api/screens/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScreenRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: Option<ScreenStatus>,
    /// `null` clears the assignment, absence leaves it as is.
    #[serde(default, deserialize_with = "present_or_null")]
    pub current_playlist: Option<Option<PlaylistId>>,
}

fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
