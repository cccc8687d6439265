use axum::response::Json;
use serde_json::{Value, json};
use tracing::debug;

pub async fn root_handler() -> &'static str {
    "Hospital signage API is running"
}

pub async fn ping_handler() -> Json<Value> {
    debug!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "message": "Hospital signage API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
