use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{debug, info};

use signage_model::{
    CreateScreenRequest, Screen, ScreenConfig, ScreenDetails, ScreenId, ScreenListing,
    UpdateScreenRequest,
};

use crate::infra::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
};

async fn load_screen(state: &AppState, id: ScreenId) -> AppResult<Screen> {
    state
        .repos
        .screens
        .get_screen(id)
        .await?
        .ok_or_else(|| AppError::not_found("Screen not found"))
}

pub async fn list_screens(State(state): State<AppState>) -> AppResult<Json<Vec<ScreenListing>>> {
    Ok(Json(state.repos.screens.list_screens().await?))
}

pub async fn get_screen(
    State(state): State<AppState>,
    Path(id): Path<ScreenId>,
) -> AppResult<Json<ScreenDetails>> {
    let screen = load_screen(&state, id).await?;
    let playlist = match screen.current_playlist {
        Some(playlist_id) => state.repos.playlists.get_playlist(playlist_id).await?,
        None => None,
    };
    Ok(Json(ScreenDetails { screen, playlist }))
}

/// Polled by players; public so screens need no credentials.
pub async fn get_screen_config(
    State(state): State<AppState>,
    Path(id): Path<ScreenId>,
) -> AppResult<Json<ScreenConfig>> {
    let config = state.resolver.resolve(id).await?;
    debug!(screen_id = %id, items = config.media_items().len(), "served screen config");
    Ok(Json(config))
}

pub async fn create_screen(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<CreateScreenRequest>,
) -> AppResult<(StatusCode, Json<Screen>)> {
    let now = Utc::now();
    let mut screen = Screen {
        id: ScreenId::new(),
        name: request.name.trim().to_string(),
        location: request.location.filter(|l| !l.trim().is_empty()),
        status: request.status.unwrap_or_default(),
        current_playlist: None,
        created_at: now,
        updated_at: now,
    };
    if screen.needs_generated_name() {
        screen.name = screen.generated_name();
    }
    state.repos.screens.create_screen(&screen).await?;

    info!(screen_id = %screen.id, name = %screen.name, "screen created");
    Ok((StatusCode::CREATED, Json(screen)))
}

pub async fn update_screen(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<ScreenId>,
    Json(request): Json<UpdateScreenRequest>,
) -> AppResult<Json<Screen>> {
    let mut screen = load_screen(&state, id).await?;

    if let Some(name) = request.name {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request("Screen name cannot be empty"));
        }
        screen.name = name.to_string();
    }
    if let Some(location) = request.location {
        screen.location = Some(location).filter(|l| !l.trim().is_empty());
    }
    if let Some(status) = request.status {
        screen.status = status;
    }
    if let Some(current_playlist) = request.current_playlist {
        screen.current_playlist = current_playlist;
    }
    screen.updated_at = Utc::now();

    if !state.repos.screens.update_screen(&screen).await? {
        return Err(AppError::not_found("Screen not found"));
    }
    info!(screen_id = %id, "screen updated");
    Ok(Json(screen))
}

pub async fn delete_screen(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<ScreenId>,
) -> AppResult<Json<Value>> {
    if !state.repos.screens.delete_screen(id).await? {
        return Err(AppError::not_found("Screen not found"));
    }
    info!(screen_id = %id, "screen deleted");
    Ok(Json(json!({ "message": "Screen deleted" })))
}
