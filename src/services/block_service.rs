//! Block and option service

use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    db::repositories::{AssignmentRepository, BlockRepository},
    error::{AppError, AppResult},
    models::{
        ensure_single_correct, AssignmentBlock, BlockContent, BlockKind, BlockOption, BlockOrigin,
        OptionFields,
    },
};

/// Block and option service
pub struct BlockService;

impl BlockService {
    /// Append a block to an assignment.
    ///
    /// Blocks created here are `manual` and must carry content for their kind.
    pub async fn add_block(
        pool: &PgPool,
        assignment_id: &Uuid,
        kind: BlockKind,
        name: Option<&str>,
        content: Option<BlockContent>,
    ) -> AppResult<AssignmentBlock> {
        let mut tx = pool.begin().await?;

        if AssignmentRepository::find_by_id(&mut *tx, assignment_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("Assignment not found".to_string()));
        }

        let content = Self::matching_content(kind, content)?;
        let block = BlockRepository::create(
            &mut *tx,
            assignment_id,
            kind,
            BlockOrigin::Manual,
            name,
            content.as_ref(),
        )
        .await?;
        Self::guard_empty(&block)?;

        tx.commit().await?;

        info!(assignment_id = %assignment_id, block_id = %block.id, kind = %kind, "Block added");
        Ok(block)
    }

    /// Update a block's name, position and content; the kind is fixed
    pub async fn update_block(
        pool: &PgPool,
        assignment_id: &Uuid,
        block_id: &Uuid,
        name: Option<&str>,
        position: Option<i32>,
        content: Option<String>,
    ) -> AppResult<AssignmentBlock> {
        let mut tx = pool.begin().await?;

        let existing = Self::find_block(&mut tx, assignment_id, block_id).await?;
        let kind = existing
            .kind()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Unknown block kind {}", existing.kind)))?;

        let content = BlockContent::new(kind, content);
        let block = BlockRepository::update(
            &mut *tx,
            block_id,
            name,
            position.unwrap_or(existing.position),
            content.as_ref(),
        )
        .await?;
        Self::guard_empty(&block)?;

        tx.commit().await?;

        debug!(block_id = %block_id, "Block updated");
        Ok(block)
    }

    /// Delete a block and its options
    pub async fn delete_block(pool: &PgPool, assignment_id: &Uuid, block_id: &Uuid) -> AppResult<()> {
        let mut conn = pool.acquire().await?;
        Self::find_block(&mut conn, assignment_id, block_id).await?;
        BlockRepository::delete(&mut *conn, block_id).await?;

        info!(assignment_id = %assignment_id, block_id = %block_id, "Block deleted");
        Ok(())
    }

    /// Add an answer option to a question block
    pub async fn add_option(
        pool: &PgPool,
        assignment_id: &Uuid,
        block_id: &Uuid,
        fields: &OptionFields,
    ) -> AppResult<BlockOption> {
        let mut tx = pool.begin().await?;

        Self::find_question(&mut tx, assignment_id, block_id).await?;
        let existing = BlockRepository::list_options(&mut *tx, block_id).await?;
        ensure_single_correct(&existing, None, fields.is_correct)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let option = BlockRepository::create_option(&mut *tx, block_id, fields)
            .await
            .map_err(Self::single_correct_race)?;

        tx.commit().await?;
        Ok(option)
    }

    /// Update an answer option
    pub async fn update_option(
        pool: &PgPool,
        assignment_id: &Uuid,
        block_id: &Uuid,
        option_id: &Uuid,
        fields: &OptionFields,
    ) -> AppResult<BlockOption> {
        let mut tx = pool.begin().await?;

        Self::find_question(&mut tx, assignment_id, block_id).await?;
        let existing = BlockRepository::list_options(&mut *tx, block_id).await?;
        ensure_single_correct(&existing, Some(*option_id), fields.is_correct)
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let option = BlockRepository::update_option(&mut *tx, block_id, option_id, fields)
            .await
            .map_err(Self::single_correct_race)?
            .ok_or_else(|| AppError::NotFound("Option not found".to_string()))?;

        tx.commit().await?;
        Ok(option)
    }

    /// Delete an answer option
    pub async fn delete_option(
        pool: &PgPool,
        assignment_id: &Uuid,
        block_id: &Uuid,
        option_id: &Uuid,
    ) -> AppResult<()> {
        let mut conn = pool.acquire().await?;
        Self::find_question(&mut conn, assignment_id, block_id).await?;

        if !BlockRepository::delete_option(&mut *conn, block_id, option_id).await? {
            return Err(AppError::NotFound("Option not found".to_string()));
        }
        Ok(())
    }

    fn matching_content(kind: BlockKind, content: Option<BlockContent>) -> AppResult<Option<BlockContent>> {
        match content {
            Some(c) if c.kind() != kind => Err(AppError::Validation(format!(
                "{} content cannot be stored on a {} block",
                c.kind(),
                kind
            ))),
            other => Ok(other),
        }
    }

    /// Refuse to persist a manual block without content
    fn guard_empty(block: &AssignmentBlock) -> AppResult<()> {
        if block.should_discard() {
            return Err(AppError::Validation(format!(
                "{} block has no content",
                block.kind
            )));
        }
        Ok(())
    }

    /// A concurrent save may win the single-correct index
    fn single_correct_race(err: AppError) -> AppError {
        match err {
            AppError::AlreadyExists(_) => {
                AppError::Validation("Only one correct answer per question".to_string())
            }
            other => other,
        }
    }

    async fn find_block(
        conn: &mut PgConnection,
        assignment_id: &Uuid,
        block_id: &Uuid,
    ) -> AppResult<AssignmentBlock> {
        BlockRepository::find_by_id(conn, assignment_id, block_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Block not found".to_string()))
    }

    async fn find_question(
        conn: &mut PgConnection,
        assignment_id: &Uuid,
        block_id: &Uuid,
    ) -> AppResult<AssignmentBlock> {
        let block = Self::find_block(conn, assignment_id, block_id).await?;
        if block.kind() != Some(BlockKind::Question) {
            return Err(AppError::Validation(
                "Options can only be added to question blocks".to_string(),
            ));
        }
        Ok(block)
    }
}
