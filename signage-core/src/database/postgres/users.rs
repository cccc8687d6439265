use async_trait::async_trait;
use sqlx::Row;
use tracing::info;

use signage_model::{User, UserId};

use super::{PostgresDatabase, db_err};
use crate::database::ports::UserRepository;
use crate::error::{Result, SignageError};

#[async_trait]
impl UserRepository for PostgresDatabase {
    async fn create_user(&self, user: &User) -> Result<()> {
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id.to_uuid())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| {
            if let Some(db_error) = e.as_database_error()
                && db_error.constraint() == Some("idx_users_email_unique")
            {
                return SignageError::Conflict("Email already exists".to_string());
            }
            db_err("create user")(e)
        })?;

        info!(user_id = %user.id, "created user");
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(db_err("get user by email"))?;

        row.map(|r| -> Result<User> {
            Ok(User {
                id: UserId(r.try_get("id")?),
                email: r.try_get("email")?,
                password_hash: r.try_get("password_hash")?,
                created_at: r.try_get("created_at")?,
            })
        })
        .transpose()
    }
}
