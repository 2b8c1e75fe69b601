//! Category repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{error::AppResult, models::Category};

/// Repository for category database operations
pub struct CategoryRepository;

impl CategoryRepository {
    /// Create a new category
    pub async fn create<'e, E: PgExecutor<'e>>(executor: E, name: &str) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING *
            "#,
        )
        .bind(name)
        .fetch_one(executor)
        .await?;

        Ok(category)
    }

    /// Find category by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(r#"SELECT * FROM categories WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(category)
    }

    /// Find category by name
    pub async fn find_by_name<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
    ) -> AppResult<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>(r#"SELECT * FROM categories WHERE name = $1"#)
                .bind(name)
                .fetch_optional(executor)
                .await?;

        Ok(category)
    }

    /// List categories with pagination
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        offset: i64,
        limit: i64,
    ) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT * FROM categories
            ORDER BY name
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(executor)
        .await?;

        Ok(categories)
    }

    /// Rename a category
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        name: &str,
    ) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(category)
    }

    /// Delete a category; fails with a foreign key violation while referenced
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM categories WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
