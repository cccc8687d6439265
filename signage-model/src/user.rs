use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Admin panel account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/auth/register` and `POST /api/auth/login`.
///
/// Both fields are optional at the wire level so that a missing field can be
/// answered with a validation message instead of a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    /// Returns `(email, password)` when both are present and non-blank. The
    /// email is trimmed and lower-cased.
    pub fn normalized(&self) -> Option<(String, &str)> {
        let email = self.email.as_deref()?.trim();
        let password = self.password.as_deref()?;
        if email.is_empty() || password.is_empty() {
            return None;
        }
        Some((email.to_lowercase(), password))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

/// JWT claims issued at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}
