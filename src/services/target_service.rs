//! Target service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::TargetRepository,
    engine::Trigger,
    error::{AppError, AppResult},
    models::{Target, TargetRules},
    services::ReassignmentService,
};

/// Target service
pub struct TargetService;

impl TargetService {
    /// Create a target
    pub async fn create(pool: &PgPool, rules: &TargetRules) -> AppResult<Target> {
        rules
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let target = TargetRepository::create(pool, rules).await?;

        info!(target_id = %target.id, name = %target.name, "Target created");
        Ok(target)
    }

    /// Replace a target's rule and re-evaluate the assignments using it
    pub async fn update(pool: &PgPool, id: &Uuid, rules: &TargetRules) -> AppResult<Target> {
        rules
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let mut tx = pool.begin().await?;

        let target = TargetRepository::update(&mut *tx, id, rules)
            .await?
            .ok_or_else(|| AppError::NotFound("Target not found".to_string()))?;
        ReassignmentService::reevaluate(&mut tx, Trigger::TargetSaved(target.id)).await?;

        tx.commit().await?;

        info!(target_id = %target.id, "Target updated");
        Ok(target)
    }

    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<Target> {
        TargetRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Target not found".to_string()))
    }

    pub async fn list(pool: &PgPool, offset: i64, limit: i64) -> AppResult<Vec<Target>> {
        TargetRepository::list(pool, offset, limit).await
    }

    /// Delete a target that no assignment references
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        let deleted = TargetRepository::delete(pool, id).await.map_err(|e| match e {
            AppError::Conflict(_) => {
                AppError::Conflict("Target is used by one or more assignments".to_string())
            }
            other => other,
        })?;

        if !deleted {
            return Err(AppError::NotFound("Target not found".to_string()));
        }

        info!(target_id = %id, "Target deleted");
        Ok(())
    }
}
