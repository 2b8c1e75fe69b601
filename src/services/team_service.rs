//! Team service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{TeamRepository, UserRepository},
    error::{AppError, AppResult},
    models::{rank_members, Team, TeamStanding, User},
};

pub struct TeamService;

impl TeamService {
    pub async fn create(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
        logo: Option<&str>,
    ) -> AppResult<Team> {
        let team = TeamRepository::create(pool, name, description, logo).await?;

        info!(team_id = %team.id, name = %team.name, "Team created");
        Ok(team)
    }

    pub async fn list(pool: &PgPool, offset: i64, limit: i64) -> AppResult<Vec<Team>> {
        TeamRepository::list(pool, offset, limit).await
    }

    /// The caller's team with its members ranked by points
    pub async fn dashboard(pool: &PgPool, caller: &User) -> AppResult<(Team, Vec<TeamStanding>)> {
        let team_id = caller
            .team_id
            .ok_or_else(|| AppError::NotFound("User has no team".to_string()))?;

        let team = TeamRepository::find_by_id(pool, &team_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;
        let members = UserRepository::list_team_members(pool, &team_id).await?;

        Ok((team, rank_members(&caller.id, &members)))
    }

    /// Delete a team without members
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        let deleted = TeamRepository::delete(pool, id).await.map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict("Team still has members".to_string()),
            other => other,
        })?;

        if !deleted {
            return Err(AppError::NotFound("Team not found".to_string()));
        }
        Ok(())
    }
}
