use async_trait::async_trait;

use signage_model::{Assignment, AssignmentDetails, PlaylistId, Screen, ScreenId};

use crate::error::Result;

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Full history, newest first, with screen and playlist joined where
    /// they still exist.
    async fn list_assignments(&self) -> Result<Vec<AssignmentDetails>>;

    /// Point `screen` at `playlist`, deactivate the screen's previous
    /// assignment and record a new active one. Fails with `NotFound` when
    /// either side is unknown.
    async fn assign(
        &self,
        screen: ScreenId,
        playlist: PlaylistId,
    ) -> Result<(Screen, Assignment)>;
}
