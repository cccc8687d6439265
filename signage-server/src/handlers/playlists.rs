use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use signage_model::{
    AppendMediaRequest, PlaylistEntry, PlaylistId, PlaylistRecord, PlaylistRequest,
    PopulatedPlaylist,
};

use crate::infra::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
};

fn validated_name(request: &PlaylistRequest) -> AppResult<String> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Playlist name is required"));
    }
    Ok(name.to_string())
}

async fn load_playlist(state: &AppState, id: PlaylistId) -> AppResult<PopulatedPlaylist> {
    state
        .repos
        .playlists
        .get_playlist(id)
        .await?
        .ok_or_else(|| AppError::not_found("Playlist not found"))
}

pub async fn list_playlists(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PopulatedPlaylist>>> {
    Ok(Json(state.repos.playlists.list_playlists().await?))
}

pub async fn get_playlist(
    State(state): State<AppState>,
    Path(id): Path<PlaylistId>,
) -> AppResult<Json<PopulatedPlaylist>> {
    Ok(Json(load_playlist(&state, id).await?))
}

pub async fn create_playlist(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<PlaylistRequest>,
) -> AppResult<(StatusCode, Json<PopulatedPlaylist>)> {
    let name = validated_name(&request)?;
    let now = Utc::now();
    let record = PlaylistRecord {
        id: PlaylistId::new(),
        name,
        media_items: request.media_items,
        created_at: now,
        updated_at: now,
    };
    state.repos.playlists.create_playlist(&record).await?;

    info!(playlist_id = %record.id, items = record.media_items.len(), "playlist created");
    Ok((StatusCode::CREATED, Json(load_playlist(&state, record.id).await?)))
}

pub async fn update_playlist(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<PlaylistId>,
    Json(request): Json<PlaylistRequest>,
) -> AppResult<Json<PopulatedPlaylist>> {
    let name = validated_name(&request)?;
    if !state
        .repos
        .playlists
        .update_playlist(id, &name, &request.media_items)
        .await?
    {
        return Err(AppError::not_found("Playlist not found"));
    }

    info!(playlist_id = %id, items = request.media_items.len(), "playlist updated");
    Ok(Json(load_playlist(&state, id).await?))
}

pub async fn delete_playlist(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<PlaylistId>,
) -> AppResult<Json<Value>> {
    if !state.repos.playlists.delete_playlist(id).await? {
        return Err(AppError::not_found("Playlist not found"));
    }
    info!(playlist_id = %id, "playlist deleted");
    Ok(Json(json!({ "message": "Playlist deleted" })))
}

pub async fn append_media(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<PlaylistId>,
    Json(request): Json<AppendMediaRequest>,
) -> AppResult<Json<PopulatedPlaylist>> {
    let entry = PlaylistEntry {
        media: request.media_id,
        duration: request.duration,
    };
    if !state.repos.playlists.append_entry(id, &entry).await? {
        return Err(AppError::not_found("Playlist not found"));
    }
    Ok(Json(load_playlist(&state, id).await?))
}
