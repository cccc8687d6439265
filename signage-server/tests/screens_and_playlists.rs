use anyhow::Result;
use axum::http::StatusCode;
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use serde_json::{Value, json};

mod common;
use common::{admin_token, bearer, build_test_app, error_message};

async fn upload(server: &TestServer, token: &str, file_name: &str, mime: &str) -> String {
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"media-bytes".to_vec())
            .file_name(file_name.to_string())
            .mime_type(mime.to_string()),
    );
    let media: Value = server
        .post("/api/media/upload")
        .add_header("Authorization", bearer(token))
        .multipart(form)
        .await
        .json();
    media["id"].as_str().expect("media id").to_string()
}

async fn create_screen(server: &TestServer, token: &str, body: Value) -> Value {
    let response = server
        .post("/api/screens")
        .add_header("Authorization", bearer(token))
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn playlist_crud_keeps_entry_order_and_durations() -> Result<()> {
    let app = build_test_app()?;
    let server = &app.server;
    let token = admin_token(server).await;

    let image = upload(server, &token, "map.png", "image/png").await;
    let video = upload(server, &token, "intro.mp4", "video/mp4").await;

    let unnamed = server
        .post("/api/playlists")
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "name": "   ", "mediaItems": [] }))
        .await;
    unnamed.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = unnamed.json();
    assert_eq!(error_message(&body), "Playlist name is required");

    let created = server
        .post("/api/playlists")
        .add_header("Authorization", bearer(&token))
        .json(&json!({
            "name": "Lobby rotation",
            "mediaItems": [
                { "media": video, "duration": 0 },
                { "media": image, "duration": 8 }
            ]
        }))
        .await;
    created.assert_status(StatusCode::CREATED);
    let playlist: Value = created.json();
    let playlist_id = playlist["id"].as_str().expect("playlist id").to_string();
    let items = playlist["mediaItems"].as_array().expect("media items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["media"]["id"], video.as_str());
    assert_eq!(items[0]["duration"], 5.0);
    assert_eq!(items[1]["media"]["id"], image.as_str());
    assert_eq!(items[1]["duration"], 8.0);

    let appended = server
        .post(&format!("/api/playlists/{playlist_id}/media"))
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "mediaId": image, "duration": 3 }))
        .await;
    appended.assert_status_ok();
    let playlist: Value = appended.json();
    assert_eq!(playlist["mediaItems"].as_array().map(Vec::len), Some(3));

    let updated = server
        .put(&format!("/api/playlists/{playlist_id}"))
        .add_header("Authorization", bearer(&token))
        .json(&json!({
            "name": "Lobby rotation (night)",
            "mediaItems": [{ "media": image, "duration": 20 }]
        }))
        .await;
    updated.assert_status_ok();
    let playlist: Value = updated.json();
    assert_eq!(playlist["name"], "Lobby rotation (night)");
    assert_eq!(playlist["mediaItems"].as_array().map(Vec::len), Some(1));

    let fetched: Value = server
        .get(&format!("/api/playlists/{playlist_id}"))
        .await
        .json();
    assert_eq!(fetched["mediaItems"][0]["duration"], 20.0);

    server
        .delete(&format!("/api/playlists/{playlist_id}"))
        .add_header("Authorization", bearer(&token))
        .await
        .assert_status_ok();
    let missing = server.get(&format!("/api/playlists/{playlist_id}")).await;
    missing.assert_status(StatusCode::NOT_FOUND);
    let body: Value = missing.json();
    assert_eq!(error_message(&body), "Playlist not found");

    Ok(())
}

#[tokio::test]
async fn screen_lifecycle_and_generated_names() -> Result<()> {
    let app = build_test_app()?;
    let server = &app.server;
    let token = admin_token(server).await;

    let named = create_screen(
        server,
        &token,
        json!({ "name": "ER waiting room", "location": "Block A, floor 1" }),
    )
    .await;
    assert_eq!(named["status"], "active");
    assert_eq!(named["currentPlaylist"], Value::Null);

    let blank = create_screen(server, &token, json!({ "name": "" })).await;
    let blank_id = blank["id"].as_str().expect("screen id");
    let suffix = &blank_id[blank_id.len() - 4..];
    assert_eq!(blank["name"], format!("Screen {suffix}"));

    let screens: Vec<Value> = server.get("/api/screens").await.json();
    assert_eq!(screens.len(), 2);

    let id = named["id"].as_str().expect("screen id");
    let empty_name = server
        .put(&format!("/api/screens/{id}"))
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "name": "  " }))
        .await;
    empty_name.assert_status(StatusCode::BAD_REQUEST);

    let updated = server
        .put(&format!("/api/screens/{id}"))
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "status": "inactive" }))
        .await;
    updated.assert_status_ok();
    let screen: Value = updated.json();
    assert_eq!(screen["status"], "inactive");
    assert_eq!(screen["name"], "ER waiting room");

    server
        .delete(&format!("/api/screens/{id}"))
        .add_header("Authorization", bearer(&token))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/screens/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn screen_config_follows_assignments() -> Result<()> {
    let app = build_test_app()?;
    let server = &app.server;
    let token = admin_token(server).await;

    let image = upload(server, &token, "visiting-hours.png", "image/png").await;
    let video = upload(server, &token, "hand-hygiene.mp4", "video/mp4").await;

    let screen = create_screen(server, &token, json!({ "name": "Cafeteria" })).await;
    let screen_id = screen["id"].as_str().expect("screen id").to_string();

    let unassigned = server.get(&format!("/api/screens/{screen_id}/config")).await;
    unassigned.assert_status(StatusCode::NOT_FOUND);
    let body: Value = unassigned.json();
    assert_eq!(error_message(&body), "No playlist assigned");

    let unknown = server
        .get("/api/screens/0190b5a4-0000-7000-8000-000000000000/config")
        .await;
    unknown.assert_status(StatusCode::NOT_FOUND);
    let body: Value = unknown.json();
    assert_eq!(error_message(&body), "Screen not found");

    let mut playlist_ids = Vec::new();
    for (name, media) in [("Day", &image), ("Night", &video)] {
        let playlist: Value = server
            .post("/api/playlists")
            .add_header("Authorization", bearer(&token))
            .json(&json!({ "name": name, "mediaItems": [{ "media": media, "duration": 7 }] }))
            .await
            .json();
        playlist_ids.push(playlist["id"].as_str().expect("playlist id").to_string());
    }

    let assigned = server
        .post("/api/assignments")
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "screenId": screen_id, "playlistId": playlist_ids[0] }))
        .await;
    assigned.assert_status_ok();
    let body: Value = assigned.json();
    assert_eq!(body["currentPlaylist"], playlist_ids[0].as_str());

    let config: Value = server
        .get(&format!("/api/screens/{screen_id}/config"))
        .await
        .json();
    assert_eq!(config["screen"]["name"], "Cafeteria");
    assert_eq!(config["playlist"]["name"], "Day");
    let items = config["playlist"]["mediaItems"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], image.as_str());
    assert_eq!(items[0]["mediaType"], "Image");
    assert_eq!(items[0]["duration"], 7.0);

    server
        .post("/api/assignments")
        .add_header("Authorization", bearer(&token))
        .json(&json!({ "screenId": screen_id, "playlistId": playlist_ids[1] }))
        .await
        .assert_status_ok();

    let config: Value = server
        .get(&format!("/api/screens/{screen_id}/config"))
        .await
        .json();
    assert_eq!(config["playlist"]["name"], "Night");
    assert_eq!(config["playlist"]["mediaItems"][0]["mediaType"], "Video");

    let assignments: Vec<Value> = server.get("/api/assignments").await.json();
    assert_eq!(assignments.len(), 2);
    let active: Vec<&Value> = assignments
        .iter()
        .filter(|a| a["isActive"] == true)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["playlistId"], playlist_ids[1].as_str());

    let bad_assignment = server
        .post("/api/assignments")
        .add_header("Authorization", bearer(&token))
        .json(&json!({
            "screenId": screen_id,
            "playlistId": "0190b5a4-0000-7000-8000-000000000001"
        }))
        .await;
    bad_assignment.assert_status(StatusCode::NOT_FOUND);

    // Deleting the assigned playlist leaves the screen unassigned.
    server
        .delete(&format!("/api/playlists/{}", playlist_ids[1]))
        .add_header("Authorization", bearer(&token))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/screens/{screen_id}/config"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    Ok(())
}
