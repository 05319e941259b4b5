// src/handlers/media.rs

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    config::Config,
    error::AppError,
    utils::media::{MediaKind, MediaUrls, disk_path},
};

/// Stores the `file` field of a multipart upload under the directory of
/// `kind` and returns its relative path and absolute URL.
pub async fn upload(
    State(config): State<Config>,
    media: MediaUrls,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let kind = MediaKind::parse(&kind)
        .ok_or(AppError::NotFound(format!("Unknown media kind '{}'", kind)))?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let relative = kind.storage_path(field.file_name());
        let data = field.bytes().await?;
        if data.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        let target = disk_path(&config.media_root, &relative);
        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        tokio::fs::write(&target, &data).await.map_err(|e| {
            tracing::error!("Failed to write upload {:?}: {:?}", target, e);
            AppError::from(e)
        })?;

        tracing::info!("Stored {} upload at {} ({} bytes)", kind.as_str(), relative, data.len());

        return Ok((
            StatusCode::CREATED,
            Json(json!({
                "path": relative,
                "url": media.absolute(Some(&relative)),
            })),
        ));
    }

    Err(AppError::BadRequest("Missing 'file' field".to_string()))
}
