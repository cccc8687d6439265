use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use signage_model::{
    Assignment, AssignmentDetails, AssignmentId, PlaylistId, PlaylistSummary, Screen, ScreenId,
};

use super::screens::{SCREEN_COLUMNS, map_screen_row};
use super::{PostgresDatabase, db_err};
use crate::database::ports::AssignmentRepository;
use crate::error::{Result, SignageError};

#[async_trait]
impl AssignmentRepository for PostgresDatabase {
    async fn list_assignments(&self) -> Result<Vec<AssignmentDetails>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT a.id AS assignment_id, a.screen_id, a.playlist_id, a.is_active, a.assigned_at,
                   s.id IS NOT NULL AS has_screen, {SCREEN_COLUMNS},
                   p.name AS playlist_name
            FROM assignments a
            LEFT JOIN screens s ON s.id = a.screen_id
            LEFT JOIN playlists p ON p.id = a.playlist_id
            ORDER BY a.assigned_at DESC, a.id DESC
            "#
        ))
        .fetch_all(self.pool())
        .await
        .map_err(db_err("list assignments"))?;

        rows.iter()
            .map(|row| -> Result<AssignmentDetails> {
                let assignment = Assignment {
                    id: AssignmentId(row.try_get("assignment_id")?),
                    screen_id: ScreenId(row.try_get("screen_id")?),
                    playlist_id: PlaylistId(row.try_get("playlist_id")?),
                    is_active: row.try_get("is_active")?,
                    assigned_at: row.try_get("assigned_at")?,
                };
                let has_screen: bool = row.try_get("has_screen")?;
                let screen = if has_screen {
                    Some(map_screen_row(row)?)
                } else {
                    None
                };
                let playlist_name: Option<String> = row.try_get("playlist_name")?;
                let playlist = playlist_name.map(|name| PlaylistSummary {
                    id: assignment.playlist_id,
                    name,
                });
                Ok(AssignmentDetails {
                    assignment,
                    screen,
                    playlist,
                })
            })
            .collect()
    }

    async fn assign(
        &self,
        screen_id: ScreenId,
        playlist_id: PlaylistId,
    ) -> Result<(Screen, Assignment)> {
        let mut tx = self.pool().begin().await.map_err(db_err("start transaction"))?;

        let playlist: Option<Uuid> = sqlx::query_scalar("SELECT id FROM playlists WHERE id = $1")
            .bind(playlist_id.to_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err("look up playlist"))?;
        if playlist.is_none() {
            return Err(SignageError::NotFound(format!("playlist {playlist_id}")));
        }

        let now = Utc::now();
        let row = sqlx::query(&format!(
            r#"
            UPDATE screens s SET current_playlist = $2, updated_at = $3
            WHERE s.id = $1
            RETURNING {SCREEN_COLUMNS}
            "#
        ))
        .bind(screen_id.to_uuid())
        .bind(playlist_id.to_uuid())
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_err("point screen at playlist"))?;
        let screen = match row {
            Some(row) => map_screen_row(&row)?,
            None => return Err(SignageError::NotFound(format!("screen {screen_id}"))),
        };

        sqlx::query("UPDATE assignments SET is_active = FALSE WHERE screen_id = $1 AND is_active")
            .bind(screen_id.to_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_err("deactivate previous assignment"))?;

        let assignment = Assignment {
            id: AssignmentId::new(),
            screen_id,
            playlist_id,
            is_active: true,
            assigned_at: now,
        };
        sqlx::query(
            r#"
            INSERT INTO assignments (id, screen_id, playlist_id, is_active, assigned_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(assignment.id.to_uuid())
        .bind(screen_id.to_uuid())
        .bind(playlist_id.to_uuid())
        .bind(assignment.is_active)
        .bind(assignment.assigned_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err("record assignment"))?;

        tx.commit().await.map_err(db_err("commit assignment"))?;
        Ok((screen, assignment))
    }
}
