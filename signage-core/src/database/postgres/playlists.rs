use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Postgres, Row, Transaction, postgres::PgRow};
use uuid::Uuid;

use signage_model::{
    DisplayDuration, PlaylistEntry, PlaylistId, PlaylistRecord, PopulatedEntry,
    PopulatedPlaylist,
};

use super::media::map_media_row;
use super::{PostgresDatabase, db_err};
use crate::database::ports::PlaylistRepository;
use crate::error::Result;

const ITEMS_QUERY: &str = r#"
    SELECT pi.playlist_id, pi.duration AS slot_duration,
           m.id, m.name, m.media_type, m.file_path, m.duration, m.created_at, m.updated_at
    FROM playlist_items pi
    JOIN media m ON m.id = pi.media_id
    WHERE pi.playlist_id = ANY($1)
    ORDER BY pi.playlist_id, pi.position
"#;

fn map_playlist_row(row: &PgRow) -> Result<PopulatedPlaylist> {
    Ok(PopulatedPlaylist {
        id: PlaylistId(row.try_get("id")?),
        name: row.try_get("name")?,
        media_items: Vec::new(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

async fn insert_entries(
    tx: &mut Transaction<'_, Postgres>,
    playlist: PlaylistId,
    first_position: i32,
    entries: &[PlaylistEntry],
) -> Result<()> {
    for (offset, entry) in entries.iter().enumerate() {
        let position = first_position + i32::try_from(offset).unwrap_or(i32::MAX);
        sqlx::query(
            r#"
            INSERT INTO playlist_items (playlist_id, position, media_id, duration)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(playlist.to_uuid())
        .bind(position)
        .bind(entry.media.to_uuid())
        .bind(entry.duration.secs())
        .execute(&mut **tx)
        .await
        .map_err(db_err("insert playlist item"))?;
    }
    Ok(())
}

impl PostgresDatabase {
    /// Fill `media_items` of each playlist in position order.
    async fn attach_items(&self, playlists: &mut [PopulatedPlaylist]) -> Result<()> {
        if playlists.is_empty() {
            return Ok(());
        }
        let ids: Vec<Uuid> = playlists.iter().map(|p| p.id.to_uuid()).collect();
        let rows = sqlx::query(ITEMS_QUERY)
            .bind(&ids)
            .fetch_all(self.pool())
            .await
            .map_err(db_err("load playlist items"))?;

        let mut grouped: HashMap<Uuid, Vec<PopulatedEntry>> = HashMap::new();
        for row in &rows {
            let playlist_id: Uuid = row.try_get("playlist_id")?;
            let slot: f64 = row.try_get("slot_duration")?;
            grouped.entry(playlist_id).or_default().push(PopulatedEntry {
                media: map_media_row(row)?,
                duration: DisplayDuration::from(slot),
            });
        }

        for playlist in playlists.iter_mut() {
            playlist.media_items = grouped.remove(playlist.id.as_uuid()).unwrap_or_default();
        }
        Ok(())
    }
}

#[async_trait]
impl PlaylistRepository for PostgresDatabase {
    async fn list_playlists(&self) -> Result<Vec<PopulatedPlaylist>> {
        let rows = sqlx::query(
            "SELECT id, name, created_at, updated_at FROM playlists ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(self.pool())
        .await
        .map_err(db_err("list playlists"))?;

        let mut playlists = rows.iter().map(map_playlist_row).collect::<Result<Vec<_>>>()?;
        self.attach_items(&mut playlists).await?;
        Ok(playlists)
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<PopulatedPlaylist>> {
        let row = sqlx::query("SELECT id, name, created_at, updated_at FROM playlists WHERE id = $1")
            .bind(id.to_uuid())
            .fetch_optional(self.pool())
            .await
            .map_err(db_err("get playlist"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut playlists = [map_playlist_row(&row)?];
        self.attach_items(&mut playlists).await?;
        let [playlist] = playlists;
        Ok(Some(playlist))
    }

    async fn create_playlist(&self, playlist: &PlaylistRecord) -> Result<()> {
        let mut tx = self.pool().begin().await.map_err(db_err("start transaction"))?;

        sqlx::query(
            "INSERT INTO playlists (id, name, created_at, updated_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(playlist.id.to_uuid())
        .bind(&playlist.name)
        .bind(playlist.created_at)
        .bind(playlist.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_err("insert playlist"))?;

        insert_entries(&mut tx, playlist.id, 0, &playlist.media_items).await?;
        tx.commit().await.map_err(db_err("commit playlist"))?;
        Ok(())
    }

    async fn update_playlist(
        &self,
        id: PlaylistId,
        name: &str,
        entries: &[PlaylistEntry],
    ) -> Result<bool> {
        let mut tx = self.pool().begin().await.map_err(db_err("start transaction"))?;

        let updated = sqlx::query("UPDATE playlists SET name = $2, updated_at = $3 WHERE id = $1")
            .bind(id.to_uuid())
            .bind(name)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(db_err("update playlist"))?;
        if updated.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM playlist_items WHERE playlist_id = $1")
            .bind(id.to_uuid())
            .execute(&mut *tx)
            .await
            .map_err(db_err("clear playlist items"))?;
        insert_entries(&mut tx, id, 0, entries).await?;

        tx.commit().await.map_err(db_err("commit playlist"))?;
        Ok(true)
    }

    async fn append_entry(&self, id: PlaylistId, entry: &PlaylistEntry) -> Result<bool> {
        let mut tx = self.pool().begin().await.map_err(db_err("start transaction"))?;

        // Row lock keeps concurrent appends from racing for the same position.
        let locked = sqlx::query("SELECT id FROM playlists WHERE id = $1 FOR UPDATE")
            .bind(id.to_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err("lock playlist"))?;
        if locked.is_none() {
            return Ok(false);
        }

        let next: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM playlist_items WHERE playlist_id = $1",
        )
        .bind(id.to_uuid())
        .fetch_one(&mut *tx)
        .await
        .map_err(db_err("find next position"))?;

        insert_entries(&mut tx, id, next, std::slice::from_ref(entry)).await?;

        sqlx::query("UPDATE playlists SET updated_at = $2 WHERE id = $1")
            .bind(id.to_uuid())
            .bind(Utc::now())
            .execute(&mut *tx)
            .await
            .map_err(db_err("touch playlist"))?;

        tx.commit().await.map_err(db_err("commit playlist"))?;
        Ok(true)
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool> {
        // screens.current_playlist is cleared by ON DELETE SET NULL
        let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id.to_uuid())
            .execute(self.pool())
            .await
            .map_err(db_err("delete playlist"))?;
        Ok(result.rows_affected() > 0)
    }
}
