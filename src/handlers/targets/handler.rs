//! Target handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::categories::PageQuery,
    middleware::auth::AuthenticatedUser,
    models::{Target, TargetRules},
    services::TargetService,
    state::AppState,
    utils::Page,
};

use super::request::TargetRequest;

pub async fn list_targets(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<Target>>> {
    auth_user.require_admin()?;

    let page = Page::new(query.page, query.per_page);
    Ok(Json(TargetService::list(state.db(), page.offset(), page.limit()).await?))
}

pub async fn create_target(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<TargetRequest>,
) -> AppResult<(StatusCode, Json<Target>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let target = TargetService::create(state.db(), &TargetRules::from(payload)).await?;
    Ok((StatusCode::CREATED, Json(target)))
}

pub async fn get_target(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Target>> {
    auth_user.require_admin()?;
    Ok(Json(TargetService::get(state.db(), &id).await?))
}

/// Replace a target's rule; assignments using it are re-evaluated
pub async fn update_target(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TargetRequest>,
) -> AppResult<Json<Target>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let target = TargetService::update(state.db(), &id, &TargetRules::from(payload)).await?;
    Ok(Json(target))
}

pub async fn delete_target(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;
    TargetService::delete(state.db(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
