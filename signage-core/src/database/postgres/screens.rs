use async_trait::async_trait;
use sqlx::{Row, postgres::PgRow};
use uuid::Uuid;

use signage_model::{PlaylistId, PlaylistSummary, Screen, ScreenId, ScreenListing, ScreenStatus};

use super::{PostgresDatabase, db_err};
use crate::database::ports::ScreenRepository;
use crate::error::Result;

pub(super) const SCREEN_COLUMNS: &str =
    "s.id, s.name, s.location, s.status, s.current_playlist, s.created_at, s.updated_at";

pub(super) fn map_screen_row(row: &PgRow) -> Result<Screen> {
    let status: String = row.try_get("status")?;
    let status: ScreenStatus = status.parse()?;
    let current_playlist: Option<Uuid> = row.try_get("current_playlist")?;

    Ok(Screen {
        id: ScreenId(row.try_get("id")?),
        name: row.try_get("name")?,
        location: row.try_get("location")?,
        status,
        current_playlist: current_playlist.map(PlaylistId),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn map_listing_row(row: &PgRow) -> Result<ScreenListing> {
    let screen = map_screen_row(row)?;
    let playlist_name: Option<String> = row.try_get("playlist_name")?;
    let playlist = match (screen.current_playlist, playlist_name) {
        (Some(id), Some(name)) => Some(PlaylistSummary { id, name }),
        _ => None,
    };
    Ok(ScreenListing { screen, playlist })
}

#[async_trait]
impl ScreenRepository for PostgresDatabase {
    async fn list_screens(&self) -> Result<Vec<ScreenListing>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SCREEN_COLUMNS}, p.name AS playlist_name
            FROM screens s
            LEFT JOIN playlists p ON p.id = s.current_playlist
            ORDER BY s.created_at DESC, s.id DESC
            "#
        ))
        .fetch_all(self.pool())
        .await
        .map_err(db_err("list screens"))?;

        rows.iter().map(map_listing_row).collect()
    }

    async fn get_screen(&self, id: ScreenId) -> Result<Option<Screen>> {
        let row = sqlx::query(&format!("SELECT {SCREEN_COLUMNS} FROM screens s WHERE s.id = $1"))
            .bind(id.to_uuid())
            .fetch_optional(self.pool())
            .await
            .map_err(db_err("get screen"))?;

        row.as_ref().map(map_screen_row).transpose()
    }

    async fn create_screen(&self, screen: &Screen) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO screens (id, name, location, status, current_playlist, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(screen.id.to_uuid())
        .bind(&screen.name)
        .bind(&screen.location)
        .bind(screen.status.as_str())
        .bind(screen.current_playlist.map(|p| p.to_uuid()))
        .bind(screen.created_at)
        .bind(screen.updated_at)
        .execute(self.pool())
        .await
        .map_err(db_err("insert screen"))?;
        Ok(())
    }

    async fn update_screen(&self, screen: &Screen) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE screens
            SET name = $2, location = $3, status = $4, current_playlist = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(screen.id.to_uuid())
        .bind(&screen.name)
        .bind(&screen.location)
        .bind(screen.status.as_str())
        .bind(screen.current_playlist.map(|p| p.to_uuid()))
        .bind(screen.updated_at)
        .execute(self.pool())
        .await
        .map_err(db_err("update screen"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_screen(&self, id: ScreenId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM screens WHERE id = $1")
            .bind(id.to_uuid())
            .execute(self.pool())
            .await
            .map_err(db_err("delete screen"))?;
        Ok(result.rows_affected() > 0)
    }
}
