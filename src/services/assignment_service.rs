//! Assignment service

use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{AssignmentRepository, BlockRepository, CategoryRepository, TargetRepository},
    engine::Trigger,
    error::{AppError, AppResult},
    models::{Assignment, AssignmentFields, AssignmentTree},
    services::ReassignmentService,
};

/// Assignment service
pub struct AssignmentService;

impl AssignmentService {
    /// Create an assignment and hand it out to matching users
    pub async fn create(pool: &PgPool, fields: &AssignmentFields) -> AppResult<Assignment> {
        let mut tx = pool.begin().await?;

        Self::check_references(&mut tx, None, fields).await?;
        let assignment = AssignmentRepository::create(&mut *tx, fields).await?;
        ReassignmentService::reevaluate(&mut tx, Trigger::AssignmentSaved(assignment.id)).await?;

        tx.commit().await?;

        info!(assignment_id = %assignment.id, name = %assignment.name, "Assignment created");
        Ok(assignment)
    }

    /// Replace an assignment's fields and re-evaluate its incomplete links
    pub async fn update(pool: &PgPool, id: &Uuid, fields: &AssignmentFields) -> AppResult<Assignment> {
        let mut tx = pool.begin().await?;

        Self::check_references(&mut tx, Some(id), fields).await?;
        let assignment = AssignmentRepository::update(&mut *tx, id, fields)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;
        ReassignmentService::reevaluate(&mut tx, Trigger::AssignmentSaved(assignment.id)).await?;

        tx.commit().await?;

        info!(assignment_id = %assignment.id, "Assignment updated");
        Ok(assignment)
    }

    /// Fetch an assignment with its block tree
    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<AssignmentTree> {
        let mut conn = pool.acquire().await?;
        Self::load_tree(&mut conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))
    }

    /// List assignments
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        category_id: Option<&Uuid>,
    ) -> AppResult<Vec<Assignment>> {
        AssignmentRepository::list(pool, offset, limit, category_id).await
    }

    /// Delete an assignment, its blocks and its links
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !AssignmentRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Assignment not found".to_string()));
        }

        info!(assignment_id = %id, "Assignment deleted");
        Ok(())
    }

    /// Load an assignment tree with one block read and one option read
    pub async fn load_tree(conn: &mut PgConnection, id: &Uuid) -> AppResult<Option<AssignmentTree>> {
        let Some(assignment) = AssignmentRepository::find_by_id(&mut *conn, id).await? else {
            return Ok(None);
        };

        let blocks = BlockRepository::list_for_assignment(&mut *conn, id).await?;
        let options = BlockRepository::list_options_for_assignments(&mut *conn, &[*id]).await?;

        Ok(Some(AssignmentTree::assemble(assignment, blocks, options)))
    }

    /// Resolve the category, target and dependency an assignment points at
    async fn check_references(
        conn: &mut PgConnection,
        id: Option<&Uuid>,
        fields: &AssignmentFields,
    ) -> AppResult<()> {
        if CategoryRepository::find_by_id(&mut *conn, &fields.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        if let Some(target_id) = &fields.target_id {
            if TargetRepository::find_by_id(&mut *conn, target_id).await?.is_none() {
                return Err(AppError::NotFound("Target not found".to_string()));
            }
        }

        if let Some(dependency_id) = &fields.dependent_on_id {
            if Some(dependency_id) == id {
                return Err(AppError::Validation(
                    "An assignment cannot depend on itself".to_string(),
                ));
            }
            if AssignmentRepository::find_by_id(&mut *conn, dependency_id)
                .await?
                .is_none()
            {
                return Err(AppError::NotFound("Dependent assignment not found".to_string()));
            }
        }

        Ok(())
    }
}
