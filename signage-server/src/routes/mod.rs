use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    handlers::{assignments, auth, health, media, playlists, screens},
};

/// Room for multipart boundaries and text fields on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted under `/api`.
///
/// Reads and the screen config endpoint are public. Mutating handlers take an
/// `AuthenticatedUser` and reject requests without a valid bearer token.
pub fn create_api_router(state: &AppState) -> Router<AppState> {
    let upload_limit = state
        .config()
        .storage
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/ping", get(health::ping_handler))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        .route("/media", get(media::list_media))
        .route(
            "/media/upload",
            post(media::upload_media).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/media/{id}", delete(media::delete_media))
        .route(
            "/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route(
            "/playlists/{id}",
            get(playlists::get_playlist)
                .put(playlists::update_playlist)
                .delete(playlists::delete_playlist),
        )
        .route("/playlists/{id}/media", post(playlists::append_media))
        .route(
            "/screens",
            get(screens::list_screens).post(screens::create_screen),
        )
        .route(
            "/screens/{id}",
            get(screens::get_screen)
                .put(screens::update_screen)
                .delete(screens::delete_screen),
        )
        .route("/screens/{id}/config", get(screens::get_screen_config))
        .route(
            "/assignments",
            get(assignments::list_assignments).post(assignments::assign_playlist),
        )
}
