//! # Signage Server
//!
//! REST backend for hospital digital signage. Staff upload media, build
//! playlists and assign them to screens; screens poll
//! `/api/screens/{id}/config` for the rotation they should play.

pub mod handlers;
pub mod infra;
pub mod maintenance;
pub mod routes;

pub use infra::app_state::AppState;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use crate::infra::config::CorsConfig;

pub fn create_app(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.config().cors, state.config().dev_mode);
    let uploads = ServeDir::new(state.store.root());

    Router::new()
        .route("/", get(handlers::health::root_handler))
        .nest("/api", routes::create_api_router(&state))
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Permissive in dev mode, allow-list otherwise.
fn build_cors_layer(cors: &CorsConfig, dev_mode: bool) -> CorsLayer {
    if dev_mode {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = if cors.is_wildcard_included() {
        Vec::new()
    } else {
        cors.allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect()
    };
    let any_origin = origins.is_empty();
    let allow_origin = if any_origin {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|m| match Method::from_bytes(m.as_bytes()) {
            Ok(method) => Some(method),
            Err(_) => {
                warn!(method = %m, "ignoring invalid CORS method");
                None
            }
        })
        .collect();

    let headers: Vec<HeaderName> = cors
        .allowed_headers
        .iter()
        .filter_map(|h| match HeaderName::from_bytes(h.as_bytes()) {
            Ok(name) => Some(name),
            Err(_) => {
                warn!(header = %h, "ignoring invalid CORS header");
                None
            }
        })
        .collect();

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::list(headers));

    // Credentials cannot be combined with a wildcard origin.
    if cors.allow_credentials && !any_origin {
        layer = layer.allow_credentials(true);
    }

    layer
}
