use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{info, warn};

use signage_model::{Credentials, TokenResponse, User, UserId, VerifyResponse};

use crate::infra::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
};

const MISSING_CREDENTIALS: &str = "Email and password are required";
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<Credentials>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let (email, password) = request
        .normalized()
        .ok_or_else(|| AppError::bad_request(MISSING_CREDENTIALS))?;

    if state.repos.users.get_user_by_email(&email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = state.auth_crypto.hash_password(password)?;
    let user = User {
        id: UserId::new(),
        email,
        password_hash,
        created_at: Utc::now(),
    };
    state.repos.users.create_user(&user).await?;

    info!(user_id = %user.id, "registered admin user");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<Credentials>,
) -> AppResult<Json<TokenResponse>> {
    let (email, password) = request
        .normalized()
        .ok_or_else(|| AppError::bad_request(MISSING_CREDENTIALS))?;

    let Some(user) = state.repos.users.get_user_by_email(&email).await? else {
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    };

    if !state
        .auth_crypto
        .verify_password(password, &user.password_hash)?
    {
        warn!(user_id = %user.id, "failed login attempt");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = state.auth_crypto.issue_token(user.id)?;
    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

pub async fn verify(_user: AuthenticatedUser) -> Json<VerifyResponse> {
    Json(VerifyResponse { valid: true })
}
