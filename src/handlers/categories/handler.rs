//! Category handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    middleware::auth::AuthenticatedUser,
    models::Category,
    services::CategoryService,
    state::AppState,
    utils::Page,
};

use super::request::{CategoryRequest, PageQuery};

/// List categories
pub async fn list_categories(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<Category>>> {
    let page = Page::new(query.page, query.per_page);
    let categories = CategoryService::list(state.db(), page.offset(), page.limit()).await?;
    Ok(Json(categories))
}

/// Create a category
pub async fn create_category(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CategoryRequest>,
) -> AppResult<(StatusCode, Json<Category>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let category = CategoryService::create(state.db(), &payload.name).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn get_category(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Category>> {
    Ok(Json(CategoryService::get(state.db(), &id).await?))
}

pub async fn rename_category(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> AppResult<Json<Category>> {
    auth_user.require_admin()?;
    payload.validate()?;

    Ok(Json(CategoryService::rename(state.db(), &id, &payload.name).await?))
}

/// Delete a category no assignment uses
pub async fn delete_category(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;
    CategoryService::delete(state.db(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
