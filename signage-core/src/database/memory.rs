//! In-process store used for development without Postgres and in tests.
//!
//! Mirrors the relational constraints of the SQL schema: deleting media
//! drops its playlist slots, deleting a playlist clears screens that show
//! it, and entries or screens cannot reference rows that do not exist.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use signage_model::{
    Assignment, AssignmentDetails, AssignmentId, Media, MediaId, PlaylistEntry, PlaylistId,
    PlaylistRecord, PlaylistSummary, PopulatedEntry, PopulatedPlaylist, Screen, ScreenId,
    ScreenListing, User,
};

use super::ports::{
    AssignmentRepository, MediaRepository, PlaylistRepository, ScreenRepository,
    UserRepository,
};
use crate::error::{Result, SignageError};

#[derive(Debug, Default)]
struct Tables {
    media: HashMap<MediaId, Media>,
    playlists: HashMap<PlaylistId, PlaylistRecord>,
    screens: HashMap<ScreenId, Screen>,
    assignments: Vec<Assignment>,
    users: HashMap<String, User>,
}

impl Tables {
    fn populate(&self, record: &PlaylistRecord) -> PopulatedPlaylist {
        let media_items = record
            .media_items
            .iter()
            .filter_map(|entry| {
                self.media.get(&entry.media).map(|media| PopulatedEntry {
                    media: media.clone(),
                    duration: entry.duration,
                })
            })
            .collect();

        PopulatedPlaylist {
            id: record.id,
            name: record.name.clone(),
            media_items,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn summary(&self, id: PlaylistId) -> Option<PlaylistSummary> {
        self.playlists.get(&id).map(|p| PlaylistSummary {
            id: p.id,
            name: p.name.clone(),
        })
    }

    fn check_entries(&self, entries: &[PlaylistEntry]) -> Result<()> {
        match entries.iter().find(|e| !self.media.contains_key(&e.media)) {
            Some(missing) => Err(SignageError::InvalidInput(format!(
                "media {} does not exist",
                missing.media
            ))),
            None => Ok(()),
        }
    }

    fn check_playlist_ref(&self, playlist: Option<PlaylistId>) -> Result<()> {
        match playlist {
            Some(id) if !self.playlists.contains_key(&id) => Err(
                SignageError::InvalidInput(format!("playlist {id} does not exist")),
            ),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaRepository for InMemoryStore {
    async fn list_media(&self) -> Result<Vec<Media>> {
        let tables = self.tables.read().await;
        let mut media: Vec<Media> = tables.media.values().cloned().collect();
        media.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(media)
    }

    async fn get_media(&self, id: MediaId) -> Result<Option<Media>> {
        Ok(self.tables.read().await.media.get(&id).cloned())
    }

    async fn insert_media(&self, media: &Media) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.media.contains_key(&media.id) {
            return Err(SignageError::Conflict(format!("media {} exists", media.id)));
        }
        tables.media.insert(media.id, media.clone());
        Ok(())
    }

    async fn delete_media(&self, id: MediaId) -> Result<Option<Media>> {
        let mut tables = self.tables.write().await;
        let Some(removed) = tables.media.remove(&id) else {
            return Ok(None);
        };

        let mut slots = 0usize;
        for playlist in tables.playlists.values_mut() {
            let before = playlist.media_items.len();
            playlist.media_items.retain(|entry| entry.media != id);
            slots += before - playlist.media_items.len();
        }
        debug!(media_id = %id, slots, "removed media and its playlist slots");
        Ok(Some(removed))
    }
}

#[async_trait]
impl PlaylistRepository for InMemoryStore {
    async fn list_playlists(&self) -> Result<Vec<PopulatedPlaylist>> {
        let tables = self.tables.read().await;
        let mut playlists: Vec<PopulatedPlaylist> = tables
            .playlists
            .values()
            .map(|record| tables.populate(record))
            .collect();
        playlists.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(playlists)
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<PopulatedPlaylist>> {
        let tables = self.tables.read().await;
        Ok(tables.playlists.get(&id).map(|record| tables.populate(record)))
    }

    async fn create_playlist(&self, playlist: &PlaylistRecord) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check_entries(&playlist.media_items)?;
        if tables.playlists.contains_key(&playlist.id) {
            return Err(SignageError::Conflict(format!(
                "playlist {} exists",
                playlist.id
            )));
        }
        tables.playlists.insert(playlist.id, playlist.clone());
        Ok(())
    }

    async fn update_playlist(
        &self,
        id: PlaylistId,
        name: &str,
        entries: &[PlaylistEntry],
    ) -> Result<bool> {
        let mut tables = self.tables.write().await;
        tables.check_entries(entries)?;
        let Some(record) = tables.playlists.get_mut(&id) else {
            return Ok(false);
        };
        record.name = name.to_string();
        record.media_items = entries.to_vec();
        record.updated_at = Utc::now();
        Ok(true)
    }

    async fn append_entry(&self, id: PlaylistId, entry: &PlaylistEntry) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if !tables.playlists.contains_key(&id) {
            return Ok(false);
        }
        tables.check_entries(std::slice::from_ref(entry))?;
        if let Some(record) = tables.playlists.get_mut(&id) {
            record.media_items.push(entry.clone());
            record.updated_at = Utc::now();
        }
        Ok(true)
    }

    async fn delete_playlist(&self, id: PlaylistId) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.playlists.remove(&id).is_none() {
            return Ok(false);
        }
        let now = Utc::now();
        for screen in tables.screens.values_mut() {
            if screen.current_playlist == Some(id) {
                screen.current_playlist = None;
                screen.updated_at = now;
            }
        }
        Ok(true)
    }
}

#[async_trait]
impl ScreenRepository for InMemoryStore {
    async fn list_screens(&self) -> Result<Vec<ScreenListing>> {
        let tables = self.tables.read().await;
        let mut screens: Vec<ScreenListing> = tables
            .screens
            .values()
            .map(|screen| ScreenListing {
                screen: screen.clone(),
                playlist: screen.current_playlist.and_then(|id| tables.summary(id)),
            })
            .collect();
        screens.sort_by(|a, b| {
            (b.screen.created_at, b.screen.id).cmp(&(a.screen.created_at, a.screen.id))
        });
        Ok(screens)
    }

    async fn get_screen(&self, id: ScreenId) -> Result<Option<Screen>> {
        Ok(self.tables.read().await.screens.get(&id).cloned())
    }

    async fn create_screen(&self, screen: &Screen) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.check_playlist_ref(screen.current_playlist)?;
        if tables.screens.contains_key(&screen.id) {
            return Err(SignageError::Conflict(format!("screen {} exists", screen.id)));
        }
        tables.screens.insert(screen.id, screen.clone());
        Ok(())
    }

    async fn update_screen(&self, screen: &Screen) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if !tables.screens.contains_key(&screen.id) {
            return Ok(false);
        }
        tables.check_playlist_ref(screen.current_playlist)?;
        tables.screens.insert(screen.id, screen.clone());
        Ok(true)
    }

    async fn delete_screen(&self, id: ScreenId) -> Result<bool> {
        Ok(self.tables.write().await.screens.remove(&id).is_some())
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryStore {
    async fn list_assignments(&self) -> Result<Vec<AssignmentDetails>> {
        let tables = self.tables.read().await;
        let mut details: Vec<AssignmentDetails> = tables
            .assignments
            .iter()
            .map(|assignment| AssignmentDetails {
                assignment: assignment.clone(),
                screen: tables.screens.get(&assignment.screen_id).cloned(),
                playlist: tables.summary(assignment.playlist_id),
            })
            .collect();
        details.sort_by(|a, b| {
            (b.assignment.assigned_at, b.assignment.id)
                .cmp(&(a.assignment.assigned_at, a.assignment.id))
        });
        Ok(details)
    }

    async fn assign(
        &self,
        screen_id: ScreenId,
        playlist_id: PlaylistId,
    ) -> Result<(Screen, Assignment)> {
        let mut tables = self.tables.write().await;
        if !tables.playlists.contains_key(&playlist_id) {
            return Err(SignageError::NotFound(format!("playlist {playlist_id}")));
        }

        let now = Utc::now();
        let screen = match tables.screens.get_mut(&screen_id) {
            Some(screen) => {
                screen.current_playlist = Some(playlist_id);
                screen.updated_at = now;
                screen.clone()
            }
            None => return Err(SignageError::NotFound(format!("screen {screen_id}"))),
        };

        for previous in tables
            .assignments
            .iter_mut()
            .filter(|a| a.screen_id == screen_id && a.is_active)
        {
            previous.is_active = false;
        }

        let assignment = Assignment {
            id: AssignmentId::new(),
            screen_id,
            playlist_id,
            is_active: true,
            assigned_at: now,
        };
        tables.assignments.push(assignment.clone());
        Ok((screen, assignment))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.email) {
            return Err(SignageError::Conflict("Email already exists".into()));
        }
        tables.users.insert(user.email.clone(), user.clone());
        Ok(())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signage_model::{DisplayDuration, MediaKind, ScreenStatus};

    fn media(name: &str) -> Media {
        signage_model::NewMedia {
            name: name.into(),
            media_type: MediaKind::Image,
            file_path: format!("/uploads/{name}"),
            duration: DisplayDuration::default(),
        }
        .into_media(Utc::now())
    }

    fn playlist(name: &str, media: &[&Media]) -> PlaylistRecord {
        let now = Utc::now();
        PlaylistRecord {
            id: PlaylistId::new(),
            name: name.into(),
            media_items: media
                .iter()
                .map(|m| PlaylistEntry {
                    media: m.id,
                    duration: DisplayDuration::from(3.0),
                })
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    fn screen(name: &str) -> Screen {
        let now = Utc::now();
        Screen {
            id: ScreenId::new(),
            name: name.into(),
            location: None,
            status: ScreenStatus::Active,
            current_playlist: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn deleting_media_drops_playlist_slots() {
        let store = InMemoryStore::new();
        let a = media("a.png");
        let b = media("b.png");
        store.insert_media(&a).await.unwrap();
        store.insert_media(&b).await.unwrap();

        let list = playlist("ward", &[&a, &b, &a]);
        store.create_playlist(&list).await.unwrap();

        store.delete_media(a.id).await.unwrap();
        let populated = store.get_playlist(list.id).await.unwrap().unwrap();
        assert_eq!(populated.media_items.len(), 1);
        assert_eq!(populated.media_items[0].media.id, b.id);
    }

    #[tokio::test]
    async fn playlist_rejects_unknown_media() {
        let store = InMemoryStore::new();
        let ghost = media("ghost.png");
        let err = store
            .create_playlist(&playlist("bad", &[&ghost]))
            .await
            .unwrap_err();
        assert!(matches!(err, SignageError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn deleting_playlist_clears_screens() {
        let store = InMemoryStore::new();
        let list = playlist("empty", &[]);
        store.create_playlist(&list).await.unwrap();
        let lobby = screen("Lobby");
        store.create_screen(&lobby).await.unwrap();
        store.assign(lobby.id, list.id).await.unwrap();

        assert!(store.delete_playlist(list.id).await.unwrap());
        let reloaded = store.get_screen(lobby.id).await.unwrap().unwrap();
        assert_eq!(reloaded.current_playlist, None);
    }

    #[tokio::test]
    async fn reassignment_deactivates_previous() {
        let store = InMemoryStore::new();
        let first = playlist("first", &[]);
        let second = playlist("second", &[]);
        store.create_playlist(&first).await.unwrap();
        store.create_playlist(&second).await.unwrap();
        let lobby = screen("Lobby");
        store.create_screen(&lobby).await.unwrap();

        store.assign(lobby.id, first.id).await.unwrap();
        let (updated, _) = store.assign(lobby.id, second.id).await.unwrap();
        assert_eq!(updated.current_playlist, Some(second.id));

        let history = store.list_assignments().await.unwrap();
        assert_eq!(history.len(), 2);
        let active: Vec<_> = history.iter().filter(|d| d.assignment.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].assignment.playlist_id, second.id);
    }

    #[tokio::test]
    async fn assign_unknown_screen_is_not_found() {
        let store = InMemoryStore::new();
        let list = playlist("p", &[]);
        store.create_playlist(&list).await.unwrap();
        let err = store.assign(ScreenId::new(), list.id).await.unwrap_err();
        assert!(matches!(err, SignageError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let store = InMemoryStore::new();
        let user = User {
            id: signage_model::UserId::new(),
            email: "a@b.c".into(),
            password_hash: "x".into(),
            created_at: Utc::now(),
        };
        store.create_user(&user).await.unwrap();
        let again = User {
            id: signage_model::UserId::new(),
            ..user
        };
        assert!(matches!(
            store.create_user(&again).await,
            Err(SignageError::Conflict(_))
        ));
    }
}
