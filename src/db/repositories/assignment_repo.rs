//! Assignment repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    constants::DEFAULT_ASSIGNMENT_IMAGE,
    error::AppResult,
    models::{Assignment, AssignmentFields},
};

/// Repository for assignment database operations
pub struct AssignmentRepository;

impl AssignmentRepository {
    /// Create a new assignment
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        fields: &AssignmentFields,
    ) -> AppResult<Assignment> {
        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (
                name, description, image, points, time, category_id,
                target_id, priority, dependent_on_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.image.as_deref().unwrap_or(DEFAULT_ASSIGNMENT_IMAGE))
        .bind(fields.points)
        .bind(fields.time)
        .bind(fields.category_id)
        .bind(fields.target_id)
        .bind(fields.priority)
        .bind(fields.dependent_on_id)
        .fetch_one(executor)
        .await?;

        Ok(assignment)
    }

    /// Find assignment by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<Assignment>> {
        let assignment =
            sqlx::query_as::<_, Assignment>(r#"SELECT * FROM assignments WHERE id = $1"#)
                .bind(id)
                .fetch_optional(executor)
                .await?;

        Ok(assignment)
    }

    /// Find assignment by name
    pub async fn find_by_name<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
    ) -> AppResult<Option<Assignment>> {
        let assignment =
            sqlx::query_as::<_, Assignment>(r#"SELECT * FROM assignments WHERE name = $1"#)
                .bind(name)
                .fetch_optional(executor)
                .await?;

        Ok(assignment)
    }

    /// List assignments with pagination, optionally filtered by category
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        offset: i64,
        limit: i64,
        category_id: Option<&Uuid>,
    ) -> AppResult<Vec<Assignment>> {
        let assignments = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT * FROM assignments
            WHERE ($1::uuid IS NULL OR category_id = $1)
            ORDER BY priority, name
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(category_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(assignments)
    }

    /// Every assignment
    pub async fn list_all<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<Vec<Assignment>> {
        let assignments =
            sqlx::query_as::<_, Assignment>(r#"SELECT * FROM assignments ORDER BY priority, name"#)
                .fetch_all(executor)
                .await?;

        Ok(assignments)
    }

    /// Assignments whose target is `target_id`
    pub async fn list_by_target<'e, E: PgExecutor<'e>>(
        executor: E,
        target_id: &Uuid,
    ) -> AppResult<Vec<Assignment>> {
        let assignments = sqlx::query_as::<_, Assignment>(
            r#"SELECT * FROM assignments WHERE target_id = $1 ORDER BY priority, name"#,
        )
        .bind(target_id)
        .fetch_all(executor)
        .await?;

        Ok(assignments)
    }

    /// Replace the writable fields of an assignment
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        fields: &AssignmentFields,
    ) -> AppResult<Option<Assignment>> {
        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE assignments
            SET
                name = $2,
                description = $3,
                image = COALESCE($4, image),
                points = $5,
                time = $6,
                category_id = $7,
                target_id = $8,
                priority = $9,
                dependent_on_id = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.image)
        .bind(fields.points)
        .bind(fields.time)
        .bind(fields.category_id)
        .bind(fields.target_id)
        .bind(fields.priority)
        .bind(fields.dependent_on_id)
        .fetch_optional(executor)
        .await?;

        Ok(assignment)
    }

    /// Delete an assignment together with its blocks, links and dependants
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM assignments WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
