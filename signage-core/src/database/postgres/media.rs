use async_trait::async_trait;
use sqlx::{Row, postgres::PgRow};

use signage_model::{DisplayDuration, Media, MediaId, MediaKind};

use super::{PostgresDatabase, db_err};
use crate::database::ports::MediaRepository;
use crate::error::Result;

pub(super) const MEDIA_COLUMNS: &str =
    "id, name, media_type, file_path, duration, created_at, updated_at";

pub(super) fn map_media_row(row: &PgRow) -> Result<Media> {
    let media_type: String = row.try_get("media_type")?;
    let media_type: MediaKind = media_type.parse()?;
    let duration: f64 = row.try_get("duration")?;

    Ok(Media {
        id: MediaId(row.try_get("id")?),
        name: row.try_get("name")?,
        media_type,
        file_path: row.try_get("file_path")?,
        duration: DisplayDuration::from(duration),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl MediaRepository for PostgresDatabase {
    async fn list_media(&self) -> Result<Vec<Media>> {
        let rows = sqlx::query(&format!(
            "SELECT {MEDIA_COLUMNS} FROM media ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool())
        .await
        .map_err(db_err("list media"))?;

        rows.iter().map(map_media_row).collect()
    }

    async fn get_media(&self, id: MediaId) -> Result<Option<Media>> {
        let row = sqlx::query(&format!("SELECT {MEDIA_COLUMNS} FROM media WHERE id = $1"))
            .bind(id.to_uuid())
            .fetch_optional(self.pool())
            .await
            .map_err(db_err("get media"))?;

        row.as_ref().map(map_media_row).transpose()
    }

    async fn insert_media(&self, media: &Media) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO media (id, name, media_type, file_path, duration, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(media.id.to_uuid())
        .bind(&media.name)
        .bind(media.media_type.as_str())
        .bind(&media.file_path)
        .bind(media.duration.secs())
        .bind(media.created_at)
        .bind(media.updated_at)
        .execute(self.pool())
        .await
        .map_err(db_err("insert media"))?;
        Ok(())
    }

    async fn delete_media(&self, id: MediaId) -> Result<Option<Media>> {
        // playlist_items rows go with it through ON DELETE CASCADE
        let row = sqlx::query(&format!(
            "DELETE FROM media WHERE id = $1 RETURNING {MEDIA_COLUMNS}"
        ))
        .bind(id.to_uuid())
        .fetch_optional(self.pool())
        .await
        .map_err(db_err("delete media"))?;

        row.as_ref().map(map_media_row).transpose()
    }
}
