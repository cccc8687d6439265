use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tracing::debug;

use signage_model::{Claims, UserId};

use crate::infra::{app_state::AppState, errors::AppError};

/// Admin identity taken from a valid `Authorization: Bearer` header.
/// Handlers that mutate data take this as an argument.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))?;

        let claims = state.auth_crypto.verify_token(token).map_err(|err| {
            debug!(error = %err, "rejected bearer token");
            AppError::unauthorized("Invalid or expired token")
        })?;

        Ok(Self {
            user_id: claims.sub,
            claims,
        })
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
