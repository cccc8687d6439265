use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for SignageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => SignageError::NotFound("row not found".into()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                SignageError::Conflict(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                SignageError::InvalidInput(db.message().to_string())
            }
            other => SignageError::Database(other.to_string()),
        }
    }
}

impl From<signage_model::ModelError> for SignageError {
    fn from(err: signage_model::ModelError) -> Self {
        SignageError::Database(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SignageError>;
