use axum::{Json, extract::State};
use tracing::info;

use signage_model::{AssignPlaylistRequest, AssignmentDetails, Screen};

use crate::infra::{app_state::AppState, auth::AuthenticatedUser, errors::AppResult};

pub async fn list_assignments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    Ok(Json(state.repos.assignments.list_assignments().await?))
}

/// Point a screen at a playlist. Players pick the change up on their next
/// poll of the config endpoint.
pub async fn assign_playlist(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<AssignPlaylistRequest>,
) -> AppResult<Json<Screen>> {
    let (screen, assignment) = state
        .repos
        .assignments
        .assign(request.screen_id, request.playlist_id)
        .await?;

    info!(
        screen_id = %screen.id,
        playlist_id = %assignment.playlist_id,
        user_id = %user.user_id,
        "playlist assigned"
    );
    Ok(Json(screen))
}
