//! Category service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::CategoryRepository,
    error::{AppError, AppResult},
    models::Category,
};

pub struct CategoryService;

impl CategoryService {
    pub async fn create(pool: &PgPool, name: &str) -> AppResult<Category> {
        let category = CategoryRepository::create(pool, name).await?;

        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn rename(pool: &PgPool, id: &Uuid, name: &str) -> AppResult<Category> {
        CategoryRepository::update(pool, id, name)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<Category> {
        CategoryRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    pub async fn list(pool: &PgPool, offset: i64, limit: i64) -> AppResult<Vec<Category>> {
        CategoryRepository::list(pool, offset, limit).await
    }

    /// Delete a category that no assignment or playbook entry references
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        let deleted = CategoryRepository::delete(pool, id).await.map_err(|e| match e {
            AppError::Conflict(_) => AppError::Conflict(
                "Category is used by assignments or playbook entries".to_string(),
            ),
            other => other,
        })?;

        if !deleted {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
