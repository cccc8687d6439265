use chrono::{Duration, Utc};

use signage_core::database::Repositories;
use signage_core::{PlaybackCursor, ResolveError, ScreenConfigResolver};
use signage_model::{
    DisplayDuration, Media, MediaKind, NewMedia, PlaylistEntry, PlaylistId, PlaylistRecord,
    Screen, ScreenId, ScreenStatus,
};

fn media(name: &str, kind: MediaKind, offset_secs: i64) -> Media {
    NewMedia {
        name: name.into(),
        media_type: kind,
        file_path: format!("/uploads/{name}"),
        duration: DisplayDuration::default(),
    }
    .into_media(Utc::now() + Duration::seconds(offset_secs))
}

fn screen(playlist: Option<PlaylistId>) -> Screen {
    let now = Utc::now();
    Screen {
        id: ScreenId::new(),
        name: "Radiology Waiting".into(),
        location: Some("Floor 2".into()),
        status: ScreenStatus::Active,
        current_playlist: playlist,
        created_at: now,
        updated_at: now,
    }
}

fn resolver(repos: &Repositories) -> ScreenConfigResolver {
    ScreenConfigResolver::new(repos.screens.clone(), repos.playlists.clone())
}

#[tokio::test]
async fn unknown_screen_is_reported() {
    let repos = Repositories::in_memory();
    let err = resolver(&repos).resolve(ScreenId::new()).await.unwrap_err();
    assert!(matches!(err, ResolveError::ScreenNotFound));
}

#[tokio::test]
async fn screen_without_playlist_is_reported() {
    let repos = Repositories::in_memory();
    let lonely = screen(None);
    repos.screens.create_screen(&lonely).await.unwrap();

    let err = resolver(&repos).resolve(lonely.id).await.unwrap_err();
    assert!(matches!(err, ResolveError::NoPlaylistAssigned));
}

#[tokio::test]
async fn items_follow_playlist_order_with_slot_durations() {
    let repos = Repositories::in_memory();
    // Inserted in reverse so that storage order differs from playlist order.
    let video = media("tour.mp4", MediaKind::Video, 2);
    let second = media("hours.png", MediaKind::Image, 1);
    let first = media("welcome.png", MediaKind::Image, 0);
    for m in [&video, &second, &first] {
        repos.media.insert_media(m).await.unwrap();
    }

    let now = Utc::now();
    let playlist = PlaylistRecord {
        id: PlaylistId::new(),
        name: "Lobby loop".into(),
        media_items: vec![
            PlaylistEntry { media: first.id, duration: DisplayDuration::from(3.0) },
            PlaylistEntry { media: second.id, duration: DisplayDuration::from(0.0) },
            PlaylistEntry { media: video.id, duration: DisplayDuration::from(10.0) },
        ],
        created_at: now,
        updated_at: now,
    };
    repos.playlists.create_playlist(&playlist).await.unwrap();

    let lobby = screen(None);
    repos.screens.create_screen(&lobby).await.unwrap();
    repos.assignments.assign(lobby.id, playlist.id).await.unwrap();

    let config = resolver(&repos).resolve(lobby.id).await.unwrap();
    assert_eq!(config.screen.name, "Radiology Waiting");
    assert_eq!(config.playlist.name, "Lobby loop");

    let items = config.media_items();
    let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["welcome.png", "hours.png", "tour.mp4"]);
    let secs: Vec<_> = items.iter().map(|i| i.duration.secs()).collect();
    assert_eq!(secs, [3.0, 5.0, 10.0]);

    let mut cursor = PlaybackCursor::new(items.to_vec());
    assert_eq!(cursor.current().unwrap().id, first.id);
    cursor.advance().unwrap();
    cursor.advance().unwrap();
    assert!(cursor.current().unwrap().is_video());
    assert_eq!(cursor.advance().unwrap().id, first.id);
}

#[tokio::test]
async fn deleted_playlist_reads_as_unassigned() {
    let repos = Repositories::in_memory();
    let now = Utc::now();
    let playlist = PlaylistRecord {
        id: PlaylistId::new(),
        name: "Short lived".into(),
        media_items: Vec::new(),
        created_at: now,
        updated_at: now,
    };
    repos.playlists.create_playlist(&playlist).await.unwrap();
    let ward = screen(Some(playlist.id));
    repos.screens.create_screen(&ward).await.unwrap();

    repos.playlists.delete_playlist(playlist.id).await.unwrap();

    let err = resolver(&repos).resolve(ward.id).await.unwrap_err();
    assert!(matches!(err, ResolveError::NoPlaylistAssigned));
}
