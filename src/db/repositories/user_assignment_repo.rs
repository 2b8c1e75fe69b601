//! User/assignment link repository

use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Assignment, UserAssignment},
};

/// Repository for user/assignment links
pub struct UserAssignmentRepository;

impl UserAssignmentRepository {
    /// Links of the given assignments
    pub async fn list_for_assignments<'e, E: PgExecutor<'e>>(
        executor: E,
        assignment_ids: &[Uuid],
    ) -> AppResult<Vec<UserAssignment>> {
        let links = sqlx::query_as::<_, UserAssignment>(
            r#"SELECT * FROM user_assignments WHERE assignment_id = ANY($1)"#,
        )
        .bind(assignment_ids)
        .fetch_all(executor)
        .await?;

        Ok(links)
    }

    /// Links of a user
    pub async fn list_for_user<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
    ) -> AppResult<Vec<UserAssignment>> {
        let links = sqlx::query_as::<_, UserAssignment>(
            r#"SELECT * FROM user_assignments WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(links)
    }

    /// Delete incomplete links by id; completed links are never deleted
    pub async fn revoke<'e, E: PgExecutor<'e>>(executor: E, ids: &[Uuid]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query(
            r#"DELETE FROM user_assignments WHERE id = ANY($1) AND is_completed = false"#,
        )
        .bind(ids)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Insert links for (user, assignment) pairs, keeping any existing row
    pub async fn grant<'e, E: PgExecutor<'e>>(
        executor: E,
        pairs: &[(Uuid, Uuid)],
    ) -> AppResult<u64> {
        if pairs.is_empty() {
            return Ok(0);
        }

        let (user_ids, assignment_ids): (Vec<Uuid>, Vec<Uuid>) = pairs.iter().copied().unzip();

        let result = sqlx::query(
            r#"
            INSERT INTO user_assignments (user_id, assignment_id)
            SELECT * FROM UNNEST($1::uuid[], $2::uuid[])
            ON CONFLICT (user_id, assignment_id) DO NOTHING
            "#,
        )
        .bind(&user_ids)
        .bind(&assignment_ids)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Fetch and row-lock the link for (user, assignment)
    pub async fn lock(
        conn: &mut PgConnection,
        user_id: &Uuid,
        assignment_id: &Uuid,
    ) -> AppResult<Option<UserAssignment>> {
        let link = sqlx::query_as::<_, UserAssignment>(
            r#"
            SELECT * FROM user_assignments
            WHERE user_id = $1 AND assignment_id = $2
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(assignment_id)
        .fetch_optional(conn)
        .await?;

        Ok(link)
    }

    /// Mark a link completed now
    pub async fn mark_completed<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<UserAssignment> {
        let link = sqlx::query_as::<_, UserAssignment>(
            r#"
            UPDATE user_assignments
            SET is_completed = true, completed = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(executor)
        .await?;

        Ok(link)
    }

    /// Incomplete assignments linked to a user, lowest priority first
    pub async fn pending_assignments<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
        limit: i64,
    ) -> AppResult<Vec<Assignment>> {
        let assignments = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT a.* FROM user_assignments ua
            JOIN assignments a ON a.id = ua.assignment_id
            WHERE ua.user_id = $1 AND ua.is_completed = false
            ORDER BY a.priority, a.name
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(assignments)
    }
}
