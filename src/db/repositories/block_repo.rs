//! Assignment block and option repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{AssignmentBlock, BlockContent, BlockKind, BlockOption, BlockOrigin, OptionFields},
};

/// Repository for block and option database operations
pub struct BlockRepository;

impl BlockRepository {
    /// Append a block to an assignment
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        assignment_id: &Uuid,
        kind: BlockKind,
        origin: BlockOrigin,
        name: Option<&str>,
        content: Option<&BlockContent>,
    ) -> AppResult<AssignmentBlock> {
        let (text, image, video, question) = content.map(BlockContent::columns).unwrap_or_default();

        let block = sqlx::query_as::<_, AssignmentBlock>(
            r#"
            INSERT INTO assignment_blocks (
                assignment_id, position, kind, origin, name, text, image, video, question
            )
            VALUES (
                $1,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM assignment_blocks WHERE assignment_id = $1),
                $2, $3, $4, $5, $6, $7, $8
            )
            RETURNING *
            "#,
        )
        .bind(assignment_id)
        .bind(kind.as_str())
        .bind(origin.as_str())
        .bind(name)
        .bind(text)
        .bind(image)
        .bind(video)
        .bind(question)
        .fetch_one(executor)
        .await?;

        Ok(block)
    }

    /// Find a block of an assignment
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        assignment_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<Option<AssignmentBlock>> {
        let block = sqlx::query_as::<_, AssignmentBlock>(
            r#"SELECT * FROM assignment_blocks WHERE id = $1 AND assignment_id = $2"#,
        )
        .bind(id)
        .bind(assignment_id)
        .fetch_optional(executor)
        .await?;

        Ok(block)
    }

    /// Blocks of an assignment in display order
    pub async fn list_for_assignment<'e, E: PgExecutor<'e>>(
        executor: E,
        assignment_id: &Uuid,
    ) -> AppResult<Vec<AssignmentBlock>> {
        let blocks = sqlx::query_as::<_, AssignmentBlock>(
            r#"
            SELECT * FROM assignment_blocks
            WHERE assignment_id = $1
            ORDER BY position, created_at
            "#,
        )
        .bind(assignment_id)
        .fetch_all(executor)
        .await?;

        Ok(blocks)
    }

    /// Blocks of several assignments in display order
    pub async fn list_for_assignments<'e, E: PgExecutor<'e>>(
        executor: E,
        assignment_ids: &[Uuid],
    ) -> AppResult<Vec<AssignmentBlock>> {
        let blocks = sqlx::query_as::<_, AssignmentBlock>(
            r#"
            SELECT * FROM assignment_blocks
            WHERE assignment_id = ANY($1)
            ORDER BY position, created_at
            "#,
        )
        .bind(assignment_ids)
        .fetch_all(executor)
        .await?;

        Ok(blocks)
    }

    /// Update name, position and content of a block
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        name: Option<&str>,
        position: i32,
        content: Option<&BlockContent>,
    ) -> AppResult<AssignmentBlock> {
        let (text, image, video, question) = content.map(BlockContent::columns).unwrap_or_default();

        let block = sqlx::query_as::<_, AssignmentBlock>(
            r#"
            UPDATE assignment_blocks
            SET
                name = $2,
                position = $3,
                text = $4,
                image = $5,
                video = $6,
                question = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(position)
        .bind(text)
        .bind(image)
        .bind(video)
        .bind(question)
        .fetch_one(executor)
        .await?;

        Ok(block)
    }

    /// Delete a block and its options
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM assignment_blocks WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Options of a question block in display order
    pub async fn list_options<'e, E: PgExecutor<'e>>(
        executor: E,
        block_id: &Uuid,
    ) -> AppResult<Vec<BlockOption>> {
        let options = sqlx::query_as::<_, BlockOption>(
            r#"SELECT * FROM options WHERE block_id = $1 ORDER BY position, id"#,
        )
        .bind(block_id)
        .fetch_all(executor)
        .await?;

        Ok(options)
    }

    /// Options of every block of the given assignments
    pub async fn list_options_for_assignments<'e, E: PgExecutor<'e>>(
        executor: E,
        assignment_ids: &[Uuid],
    ) -> AppResult<Vec<BlockOption>> {
        let options = sqlx::query_as::<_, BlockOption>(
            r#"
            SELECT o.* FROM options o
            JOIN assignment_blocks b ON b.id = o.block_id
            WHERE b.assignment_id = ANY($1)
            ORDER BY o.position, o.id
            "#,
        )
        .bind(assignment_ids)
        .fetch_all(executor)
        .await?;

        Ok(options)
    }

    /// Append an option to a question block
    pub async fn create_option<'e, E: PgExecutor<'e>>(
        executor: E,
        block_id: &Uuid,
        fields: &OptionFields,
    ) -> AppResult<BlockOption> {
        let option = sqlx::query_as::<_, BlockOption>(
            r#"
            INSERT INTO options (block_id, position, text, tip, is_correct)
            VALUES (
                $1,
                (SELECT COALESCE(MAX(position) + 1, 0) FROM options WHERE block_id = $1),
                $2, $3, $4
            )
            RETURNING *
            "#,
        )
        .bind(block_id)
        .bind(&fields.text)
        .bind(&fields.tip)
        .bind(fields.is_correct)
        .fetch_one(executor)
        .await?;

        Ok(option)
    }

    /// Update an option of a block
    pub async fn update_option<'e, E: PgExecutor<'e>>(
        executor: E,
        block_id: &Uuid,
        id: &Uuid,
        fields: &OptionFields,
    ) -> AppResult<Option<BlockOption>> {
        let option = sqlx::query_as::<_, BlockOption>(
            r#"
            UPDATE options
            SET text = $3, tip = $4, is_correct = $5
            WHERE id = $1 AND block_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(block_id)
        .bind(&fields.text)
        .bind(&fields.tip)
        .bind(fields.is_correct)
        .fetch_optional(executor)
        .await?;

        Ok(option)
    }

    /// Delete an option of a block
    pub async fn delete_option<'e, E: PgExecutor<'e>>(
        executor: E,
        block_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM options WHERE id = $1 AND block_id = $2"#)
            .bind(id)
            .bind(block_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
