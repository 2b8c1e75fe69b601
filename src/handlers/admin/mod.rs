//! Admin-only upload handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::{
    constants::{MAX_BULK_UPLOAD_SIZE, MAX_MEDIA_UPLOAD_SIZE},
    state::AppState,
};

/// Admin routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bulk-upload",
            post(handler::bulk_upload).layer(DefaultBodyLimit::max(MAX_BULK_UPLOAD_SIZE)),
        )
        .route(
            "/media",
            post(handler::upload_media).layer(DefaultBodyLimit::max(MAX_MEDIA_UPLOAD_SIZE)),
        )
}
