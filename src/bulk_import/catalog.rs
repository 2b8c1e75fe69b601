//! Store lookups needed to validate an import

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{AssignmentRepository, CategoryRepository, TargetRepository},
    error::AppResult,
};

/// Name lookups against existing assignments, categories and targets
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportCatalog: Send + Sync {
    async fn assignment_exists(&self, name: &str) -> AppResult<bool>;

    async fn category_id(&self, name: &str) -> AppResult<Option<Uuid>>;

    async fn target_id(&self, name: &str) -> AppResult<Option<Uuid>>;
}

/// `ImportCatalog` backed by the database
#[derive(Debug, Clone)]
pub struct PgImportCatalog {
    pool: PgPool,
}

impl PgImportCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImportCatalog for PgImportCatalog {
    async fn assignment_exists(&self, name: &str) -> AppResult<bool> {
        Ok(AssignmentRepository::find_by_name(&self.pool, name)
            .await?
            .is_some())
    }

    async fn category_id(&self, name: &str) -> AppResult<Option<Uuid>> {
        Ok(CategoryRepository::find_by_name(&self.pool, name)
            .await?
            .map(|c| c.id))
    }

    async fn target_id(&self, name: &str) -> AppResult<Option<Uuid>> {
        Ok(TargetRepository::find_by_name(&self.pool, name)
            .await?
            .map(|t| t.id))
    }
}
