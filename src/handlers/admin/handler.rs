//! Admin handler implementations

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::BulkImportService,
    state::AppState,
    storage::MediaKind,
};

use super::response::{BulkUploadResponse, MediaUploadResponse};

/// Uploaded file part
struct FilePart {
    name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

/// Import assignments from a CSV sheet.
///
/// The whole sheet is rejected on the first invalid row.
pub async fn bulk_upload(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<BulkUploadResponse>)> {
    auth_user.require_admin()?;

    let mut csv_file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart data: {}", e)))?
    {
        if field.name() == Some("csv_file") {
            csv_file = Some(read_file(field).await?);
        }
    }

    let file = csv_file.ok_or_else(|| AppError::Validation("csv_file is required".to_string()))?;
    if !file.name.to_ascii_lowercase().ends_with(".csv") {
        return Err(AppError::Validation("Uploaded file must be a .csv file".to_string()));
    }

    let report = BulkImportService::import(
        state.db(),
        state.storage(),
        state.probe(),
        &file.name,
        &file.bytes,
    )
    .await?;

    info!(
        admin_id = %auth_user.id,
        file = %file.name,
        assignments = report.assignments.len(),
        "Bulk upload imported"
    );

    Ok((StatusCode::CREATED, Json(report.into())))
}

/// Store an image or video for use in blocks and tile images
pub async fn upload_media(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<MediaUploadResponse>)> {
    auth_user.require_admin()?;

    let mut kind = None;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart data: {}", e)))?
    {
        match field.name() {
            Some("kind") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read kind: {}", e)))?;
                kind = Some(MediaKind::from_str(value.trim()).ok_or_else(|| {
                    AppError::Validation(format!("Invalid media kind: {}", value))
                })?);
            }
            Some("file") => upload = Some(read_file(field).await?),
            _ => {}
        }
    }

    let kind = kind.ok_or_else(|| AppError::Validation("kind is required".to_string()))?;
    let file = upload.ok_or_else(|| AppError::Validation("file is required".to_string()))?;

    let content_type = file.content_type.as_deref().unwrap_or_default();
    if !kind.accepts_upload(content_type) {
        return Err(AppError::Validation(format!(
            "Content type {} is not allowed",
            content_type
        )));
    }

    let path = state.storage().save(kind, &file.name, &file.bytes).await?;
    let url = format!("{}{}", state.config().storage.media_url, path);

    info!(admin_id = %auth_user.id, path = %path, "Media uploaded");
    Ok((StatusCode::CREATED, Json(MediaUploadResponse { path, url })))
}

async fn read_file(field: axum::extract::multipart::Field<'_>) -> AppResult<FilePart> {
    let name = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().map(str::to_string);
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read file: {}", e)))?;

    Ok(FilePart {
        name,
        content_type,
        bytes: bytes.to_vec(),
    })
}
