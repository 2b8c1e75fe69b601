//! User handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    middleware::auth::AuthenticatedUser,
    services::UserService,
    state::AppState,
    utils::Page,
};

use super::{
    request::{CreateUserRequest, ListUsersQuery, UpdateOwnProfileRequest, UpdateUserRequest},
    response::{UserProfileResponse, UsersListResponse},
};

/// List all users (paginated)
pub async fn list_users(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListUsersQuery>,
) -> AppResult<Json<UsersListResponse>> {
    auth_user.require_admin()?;

    let page = Page::new(query.page, query.per_page);
    let (users, total) =
        UserService::list_users(state.db(), &page, query.search.as_deref()).await?;

    Ok(Json(UsersListResponse {
        users: users.into_iter().map(Into::into).collect(),
        total,
        page: page.page,
        per_page: page.per_page,
    }))
}

/// Create a user; matching assignments are handed out immediately
pub async fn create_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserProfileResponse>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let fields = payload.profile.into_fields()?;
    let user = UserService::create(state.db(), &fields, &payload.password).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Get a user; non-admins may only read themselves
pub async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserProfileResponse>> {
    if auth_user.id != id && !auth_user.is_admin() {
        return Err(AppError::Forbidden(
            "Cannot view another user's profile".to_string(),
        ));
    }

    let user = UserService::get_user_by_id(state.db(), &id).await?;
    Ok(Json(user.into()))
}

/// Replace a user's profile; their incomplete assignments are re-evaluated
pub async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> AppResult<Json<UserProfileResponse>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let fields = payload.profile.into_fields()?;
    let user = UserService::update(state.db(), &id, &fields, payload.password.as_deref()).await?;

    Ok(Json(user.into()))
}

/// Edit the caller's own profile; the first edit completes onboarding
pub async fn update_own_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<UpdateOwnProfileRequest>,
) -> AppResult<Json<UserProfileResponse>> {
    if auth_user.is_admin() {
        return Err(AppError::Forbidden(
            "Administrators edit accounts through the user management endpoints".to_string(),
        ));
    }
    payload.validate()?;

    let user =
        UserService::update_own_profile(state.db(), &auth_user.id, |profile| payload.apply(profile))
            .await?;

    Ok(Json(user.into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;

    if auth_user.id == id {
        return Err(AppError::Validation("Cannot delete your own account".to_string()));
    }

    UserService::delete(state.db(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
