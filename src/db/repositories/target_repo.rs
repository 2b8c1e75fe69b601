//! Target repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Target, TargetRules},
};

/// Repository for target database operations
pub struct TargetRepository;

impl TargetRepository {
    /// Create a new target
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        rules: &TargetRules,
    ) -> AppResult<Target> {
        let target = sqlx::query_as::<_, Target>(
            r#"
            INSERT INTO targets (
                name, min_age, max_age, male, female, non_binary,
                transgender, other, law_explorer
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&rules.name)
        .bind(rules.min_age)
        .bind(rules.max_age)
        .bind(rules.male)
        .bind(rules.female)
        .bind(rules.non_binary)
        .bind(rules.transgender)
        .bind(rules.other)
        .bind(rules.law_explorer)
        .fetch_one(executor)
        .await?;

        Ok(target)
    }

    /// Find target by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<Target>> {
        let target = sqlx::query_as::<_, Target>(r#"SELECT * FROM targets WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(target)
    }

    /// Find target by name
    pub async fn find_by_name<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
    ) -> AppResult<Option<Target>> {
        let target = sqlx::query_as::<_, Target>(r#"SELECT * FROM targets WHERE name = $1"#)
            .bind(name)
            .fetch_optional(executor)
            .await?;

        Ok(target)
    }

    /// Find every target in `ids`
    pub async fn find_by_ids<'e, E: PgExecutor<'e>>(
        executor: E,
        ids: &[Uuid],
    ) -> AppResult<Vec<Target>> {
        let targets = sqlx::query_as::<_, Target>(r#"SELECT * FROM targets WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(executor)
            .await?;

        Ok(targets)
    }

    /// List targets with pagination
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<Target>> {
        let targets = sqlx::query_as::<_, Target>(
            r#"
            SELECT * FROM targets
            ORDER BY name
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(targets)
    }

    /// Replace the rule of a target
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        rules: &TargetRules,
    ) -> AppResult<Option<Target>> {
        let target = sqlx::query_as::<_, Target>(
            r#"
            UPDATE targets
            SET
                name = $2,
                min_age = $3,
                max_age = $4,
                male = $5,
                female = $6,
                non_binary = $7,
                transgender = $8,
                other = $9,
                law_explorer = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&rules.name)
        .bind(rules.min_age)
        .bind(rules.max_age)
        .bind(rules.male)
        .bind(rules.female)
        .bind(rules.non_binary)
        .bind(rules.transgender)
        .bind(rules.other)
        .bind(rules.law_explorer)
        .fetch_optional(executor)
        .await?;

        Ok(target)
    }

    /// Delete a target; fails with a foreign key violation while referenced
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM targets WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
