//! User repository

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ProfileFields, User, UserFields},
};

/// Repository for user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        fields: &UserFields,
        password_hash: &str,
    ) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (
                email, password_hash, first_name, last_name, age, gender,
                guardian_email, activity, team_id, is_admin
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&fields.email)
        .bind(password_hash)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.age)
        .bind(fields.gender.map(|g| g.as_str()))
        .bind(&fields.guardian_email)
        .bind(fields.activity.map(|a| a.as_str()))
        .bind(fields.team_id)
        .bind(fields.is_admin)
        .fetch_one(executor)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email<'e, E: PgExecutor<'e>>(
        executor: E,
        email: &str,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE email = $1"#)
            .bind(email)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// Every user
    pub async fn list_all<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(r#"SELECT * FROM users ORDER BY created_at"#)
            .fetch_all(executor)
            .await?;

        Ok(users)
    }

    /// List users with pagination
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        search: Option<&str>,
    ) -> AppResult<(Vec<User>, i64)> {
        let search_pattern = search.map(|s| format!("%{}%", s));

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::text IS NULL OR email ILIKE $1 OR first_name ILIKE $1 OR last_name ILIKE $1)
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(&search_pattern)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM users
            WHERE ($1::text IS NULL OR email ILIKE $1 OR first_name ILIKE $1 OR last_name ILIKE $1)
            "#,
        )
        .bind(&search_pattern)
        .fetch_one(pool)
        .await?;

        Ok((users, count))
    }

    /// Replace the profile of a user
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        fields: &UserFields,
        password_hash: Option<&str>,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                email = $2,
                first_name = $3,
                last_name = $4,
                age = $5,
                gender = $6,
                guardian_email = $7,
                activity = $8,
                team_id = $9,
                is_admin = $10,
                password_hash = COALESCE($11, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.email)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.age)
        .bind(fields.gender.map(|g| g.as_str()))
        .bind(&fields.guardian_email)
        .bind(fields.activity.map(|a| a.as_str()))
        .bind(fields.team_id)
        .bind(fields.is_admin)
        .bind(password_hash)
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Add points to a user's total
    pub async fn add_points<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        points: i32,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET total_points = total_points + $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(points)
        .execute(executor)
        .await?;

        Ok(())
    }

    /// Apply a user's own profile edit; the first edit ends onboarding
    pub async fn update_profile<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        profile: &ProfileFields,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                first_name = $2,
                last_name = $3,
                age = $4,
                gender = $5,
                guardian_email = $6,
                activity = $7,
                first_login = false,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.age)
        .bind(profile.gender.map(|g| g.as_str()))
        .bind(&profile.guardian_email)
        .bind(profile.activity.map(|a| a.as_str()))
        .fetch_optional(executor)
        .await?;

        Ok(user)
    }

    /// Team members shown on the dashboard: onboarded non-admins, best first
    pub async fn list_team_members<'e, E: PgExecutor<'e>>(
        executor: E,
        team_id: &Uuid,
    ) -> AppResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE team_id = $1 AND first_login = false AND is_admin = false
            ORDER BY total_points DESC, last_name
            "#,
        )
        .bind(team_id)
        .fetch_all(executor)
        .await?;

        Ok(users)
    }

    /// Record a user's acceptance; false when it was already recorded
    pub async fn accept_terms<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"UPDATE users SET accepted_terms_cond = true WHERE id = $1 AND NOT accepted_terms_cond"#,
        )
        .bind(id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Withdraw every user's acceptance after the terms change
    pub async fn reset_terms_acceptance<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<u64> {
        let result = sqlx::query(
            r#"UPDATE users SET accepted_terms_cond = false WHERE accepted_terms_cond"#,
        )
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete a user; playbook history is kept with the owner cleared
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
