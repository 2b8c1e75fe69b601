//! Discover handler implementations

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::{CompletionService, DiscoverService, QueuedAssignment},
    state::AppState,
};

use super::request::{CompleteRequest, CompleteResponse};

/// The caller's next assignments, lowest priority first
pub async fn get_queue(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<Vec<QueuedAssignment>>> {
    let queue = DiscoverService::queue(state.db(), &auth_user.id).await?;
    Ok(Json(queue))
}

/// Complete an assigned assignment and snapshot it into the playbook
pub async fn complete_assignment(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(assignment_id): Path<Uuid>,
    payload: Result<Json<CompleteRequest>, JsonRejection>,
) -> AppResult<Json<CompleteResponse>> {
    let Ok(Json(CompleteRequest { is_completed: true })) = payload else {
        return Err(AppError::Validation(
            "Expected {\"is_completed\": true}".to_string(),
        ));
    };

    let entry = CompletionService::complete(state.db(), &auth_user.id, &assignment_id).await?;

    Ok(Json(CompleteResponse {
        message: format!("Assignment {} completed", entry.name),
        points: entry.points,
    }))
}
