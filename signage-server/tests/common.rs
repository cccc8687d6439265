#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use tempfile::TempDir;

use signage_core::database::Repositories;
use signage_server::{
    AppState, create_app,
    infra::config::{
        Config, ConfigLoad, ConfigMetadata, loader::compose_config, sources::EnvConfig,
    },
};

pub const ADMIN_EMAIL: &str = "admin@hospital.test";
pub const ADMIN_PASSWORD: &str = "Signage#123";

/// In-memory app with uploads written to a scratch directory that lives as
/// long as the harness.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub uploads: TempDir,
}

pub fn test_config(uploads: &TempDir) -> Result<Config> {
    let ConfigLoad { mut config, .. } =
        compose_config(None, EnvConfig::default(), ConfigMetadata::default())?;
    config.storage.uploads_dir = uploads.path().to_path_buf();
    config.storage.max_upload_bytes = 1024 * 1024;
    config.auth.jwt_secret = "integration-test-secret".into();
    config.dev_mode = true;
    Ok(config)
}

pub fn build_test_app() -> Result<TestApp> {
    let uploads = tempfile::tempdir()?;
    let config = Arc::new(test_config(&uploads)?);
    let state = AppState::new(config, Repositories::in_memory());
    let server = TestServer::new(create_app(state.clone()))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    Ok(TestApp {
        server,
        state,
        uploads,
    })
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn error_message(body: &Value) -> &str {
    body["error"]["message"]
        .as_str()
        .unwrap_or_else(|| panic!("error message missing in {body}"))
}

/// Registers the default admin and returns a bearer token for it.
pub async fn admin_token(server: &TestServer) -> String {
    server
        .post("/api/auth/register")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .await
        .assert_status(StatusCode::CREATED);

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .await;
    login.assert_status_ok();
    let body: Value = login.json();
    body["token"].as_str().expect("token present").to_string()
}
