//! Team handler implementations

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
    models::Team,
    services::{TeamService, UserService},
    state::AppState,
    utils::Page,
};

use super::{request::CreateTeamRequest, response::TeamDashboardResponse};

pub async fn list_teams(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Vec<Team>>> {
    auth_user.require_admin()?;

    let page = Page::new(query.page, query.per_page);
    Ok(Json(TeamService::list(state.db(), page.offset(), page.limit()).await?))
}

pub async fn create_team(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CreateTeamRequest>,
) -> AppResult<(StatusCode, Json<Team>)> {
    auth_user.require_admin()?;
    payload.validate()?;

    let team = TeamService::create(
        state.db(),
        &payload.name,
        payload.description.as_deref(),
        payload.logo.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// The caller's team leaderboard
pub async fn team_dashboard(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<TeamDashboardResponse>> {
    let caller = UserService::get_user_by_id(state.db(), &auth_user.id).await?;
    let (team, users) = TeamService::dashboard(state.db(), &caller).await?;

    Ok(Json(TeamDashboardResponse {
        name: team.name,
        description: team.description,
        logo: team.logo,
        users,
    }))
}

/// Delete a team without members
pub async fn delete_team(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_admin()?;
    TeamService::delete(state.db(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
