use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use signage_model::{Media, MediaId, MediaKind, NewMedia, duration::normalize_str};

use crate::infra::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
};

struct UploadForm {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
    name: Option<String>,
    duration: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut file = None;
    let mut name = None;
    let mut duration = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("name") => name = Some(field.text().await?),
            Some("duration") => duration = Some(field.text().await?),
            _ => {}
        }
    }

    let (file_name, content_type, bytes) =
        file.ok_or_else(|| AppError::bad_request("No file uploaded"))?;
    Ok(UploadForm {
        file_name,
        content_type,
        bytes,
        name,
        duration,
    })
}

pub async fn list_media(State(state): State<AppState>) -> AppResult<Json<Vec<Media>>> {
    Ok(Json(state.repos.media.list_media().await?))
}

pub async fn upload_media(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Media>)> {
    let form = read_upload_form(multipart).await?;

    let limit = state.config().storage.max_upload_bytes;
    if form.bytes.len() > limit {
        return Err(AppError::payload_too_large(format!(
            "File exceeds the {limit} byte upload limit"
        )));
    }

    let media_type = form
        .content_type
        .as_deref()
        .and_then(MediaKind::from_mime)
        .ok_or_else(|| AppError::bad_request("Only image and video files are allowed"))?;

    let name = form
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| form.file_name.clone());

    let extension = form
        .content_type
        .as_deref()
        .and_then(MediaKind::extension_for_mime);
    let file_path = state.store.save(extension, &form.bytes).await?;
    let media = NewMedia {
        name,
        media_type,
        file_path,
        duration: normalize_str(form.duration.as_deref()),
    }
    .into_media(Utc::now());

    if let Err(err) = state.repos.media.insert_media(&media).await {
        state.store.remove(&media.file_path).await;
        return Err(err.into());
    }

    info!(
        media_id = %media.id,
        user_id = %user.user_id,
        kind = %media.media_type,
        size = form.bytes.len(),
        "media uploaded"
    );
    Ok((StatusCode::CREATED, Json(media)))
}

pub async fn delete_media(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<MediaId>,
) -> AppResult<Json<Value>> {
    let Some(removed) = state.repos.media.delete_media(id).await? else {
        return Err(AppError::not_found("Media not found"));
    };

    state.store.remove(&removed.file_path).await;
    info!(media_id = %id, "media deleted");
    Ok(Json(json!({ "message": "Media deleted" })))
}
