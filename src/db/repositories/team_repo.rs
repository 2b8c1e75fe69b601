//! Team repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{error::AppResult, models::Team};

pub struct TeamRepository;

impl TeamRepository {
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
        description: Option<&str>,
        logo: Option<&str>,
    ) -> AppResult<Team> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, description, logo)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(logo)
        .fetch_one(executor)
        .await?;

        Ok(team)
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<Team>> {
        let team = sqlx::query_as::<_, Team>(r#"SELECT * FROM teams WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(team)
    }

    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"SELECT * FROM teams ORDER BY name OFFSET $1 LIMIT $2"#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(teams)
    }

    /// Delete a team; fails with a foreign key violation while users reference it
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM teams WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
