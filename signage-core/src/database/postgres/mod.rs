//! PostgreSQL adapter for every repository port.

mod assignments;
mod media;
mod playlists;
mod screens;
mod users;

use std::{fmt, time::Duration};

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::error::{Result, SignageError};

pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    max_connections: u32,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn connect(connection_string: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(connection_string)
            .await
            .map_err(|e| SignageError::Database(format!("Database connection failed: {e}")))?;

        info!(max_connections, "database pool initialized");
        Ok(Self::from_pool(pool, max_connections))
    }

    pub fn from_pool(pool: PgPool, max_connections: u32) -> Self {
        Self {
            pool,
            max_connections,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply embedded migrations.
    pub async fn migrate(&self) -> Result<()> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| SignageError::Database(format!("Migration failed: {e}")))?;
        info!("database migrations applied");
        Ok(())
    }
}

/// Classify a driver error, prefixing generic failures with what was being
/// attempted.
pub(crate) fn db_err(action: &'static str) -> impl FnOnce(sqlx::Error) -> SignageError {
    move |err| match SignageError::from(err) {
        SignageError::Database(msg) => SignageError::Database(format!("Failed to {action}: {msg}")),
        other => other,
    }
}
