//! Assignment handler implementations

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
    models::{Assignment, AssignmentBlock, AssignmentTree, BlockContent, BlockOption, OptionFields},
    services::{AssignmentService, BlockService},
    state::AppState,
    utils::{parse_block_kind, Page},
};

use super::request::{
    AssignmentRequest, CreateBlockRequest, ListAssignmentsQuery, OptionRequest, UpdateBlockRequest,
};

pub async fn list_assignments(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<ListAssignmentsQuery>,
) -> AppResult<Json<Vec<Assignment>>> {
    auth_user.require_admin()?;

    let page = Page::new(query.page, query.per_page);
    let assignments = AssignmentService::list(
        state.db(),
        page.offset(),
        page.limit(),
        query.category_id.as_ref(),
    )
    .await?;

    Ok(Json(assignments))
}

/// Create an assignment and hand it to every matching user
pub async fn create_assignment(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<AssignmentRequest>,
) -> AppResult<(StatusCode, Json<Assignment>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let assignment = AssignmentService::create(state.db(), &payload.into()).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

/// Get an assignment with its blocks and options
pub async fn get_assignment(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AssignmentTree>> {
    auth_user.require_admin()?;
    Ok(Json(AssignmentService::get(state.db(), &id).await?))
}

pub async fn update_assignment(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignmentRequest>,
) -> AppResult<Json<Assignment>> {
    auth_user.require_admin()?;
    payload.validate()?;

    Ok(Json(AssignmentService::update(state.db(), &id, &payload.into()).await?))
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;
    AssignmentService::delete(state.db(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_block(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateBlockRequest>,
) -> AppResult<(StatusCode, Json<AssignmentBlock>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let kind = parse_block_kind(&payload.kind)?;
    let content = BlockContent::new(kind, payload.content);
    let block =
        BlockService::add_block(state.db(), &id, kind, payload.name.as_deref(), content).await?;

    Ok((StatusCode::CREATED, Json(block)))
}

pub async fn update_block(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, block_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateBlockRequest>,
) -> AppResult<Json<AssignmentBlock>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let block = BlockService::update_block(
        state.db(),
        &id,
        &block_id,
        payload.name.as_deref(),
        payload.position,
        payload.content,
    )
    .await?;

    Ok(Json(block))
}

pub async fn delete_block(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, block_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;
    BlockService::delete_block(state.db(), &id, &block_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add an option to a question block; at most one may be correct
pub async fn add_option(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, block_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<OptionRequest>,
) -> AppResult<(StatusCode, Json<BlockOption>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let option =
        BlockService::add_option(state.db(), &id, &block_id, &OptionFields::from(payload)).await?;
    Ok((StatusCode::CREATED, Json(option)))
}

pub async fn update_option(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, block_id, option_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(payload): Json<OptionRequest>,
) -> AppResult<Json<BlockOption>> {
    auth_user.require_admin()?;
    payload.validate()?;

    let option = BlockService::update_option(
        state.db(),
        &id,
        &block_id,
        &option_id,
        &OptionFields::from(payload),
    )
    .await?;

    Ok(Json(option))
}

pub async fn delete_option(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((id, block_id, option_id)): Path<(Uuid, Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;
    BlockService::delete_option(state.db(), &id, &block_id, &option_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
