//! Playbook repository

use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::{
    engine::PlaybookDraft,
    error::AppResult,
    models::{PlaybookAssignment, PlaybookBlock, PlaybookOption},
};

/// Repository for playbook history
pub struct PlaybookRepository;

impl PlaybookRepository {
    /// Write a playbook tree: the assignment row, then all blocks and all
    /// options as one batch each
    pub async fn insert_draft(
        conn: &mut PgConnection,
        user_id: Option<&Uuid>,
        draft: &PlaybookDraft,
        dependent_on_id: Option<&Uuid>,
    ) -> AppResult<PlaybookAssignment> {
        let entry = sqlx::query_as::<_, PlaybookAssignment>(
            r#"
            INSERT INTO playbook_assignments (
                user_id, name, description, image, points, time,
                category_id, priority, dependent_on_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.image)
        .bind(draft.points)
        .bind(draft.time)
        .bind(draft.category_id)
        .bind(draft.priority)
        .bind(dependent_on_id)
        .fetch_one(&mut *conn)
        .await?;

        if draft.blocks.is_empty() {
            return Ok(entry);
        }

        // Block ids are chosen here so options can reference them in the
        // same batch.
        let block_ids: Vec<Uuid> = draft.blocks.iter().map(|_| Uuid::new_v4()).collect();

        sqlx::query(
            r#"
            INSERT INTO playbook_blocks (
                id, playbook_assignment_id, position, kind, name, text, image, video, question
            )
            SELECT b.id, $1, b.position, b.kind, b.name, b.text, b.image, b.video, b.question
            FROM UNNEST(
                $2::uuid[], $3::int[], $4::text[], $5::text[],
                $6::text[], $7::text[], $8::text[], $9::text[]
            ) AS b(id, position, kind, name, text, image, video, question)
            "#,
        )
        .bind(entry.id)
        .bind(&block_ids)
        .bind(draft.blocks.iter().map(|b| b.position).collect::<Vec<_>>())
        .bind(draft.blocks.iter().map(|b| b.kind.clone()).collect::<Vec<_>>())
        .bind(draft.blocks.iter().map(|b| b.name.clone()).collect::<Vec<_>>())
        .bind(draft.blocks.iter().map(|b| b.text.clone()).collect::<Vec<_>>())
        .bind(draft.blocks.iter().map(|b| b.image.clone()).collect::<Vec<_>>())
        .bind(draft.blocks.iter().map(|b| b.video.clone()).collect::<Vec<_>>())
        .bind(draft.blocks.iter().map(|b| b.question.clone()).collect::<Vec<_>>())
        .execute(&mut *conn)
        .await?;

        let options: Vec<_> = draft
            .blocks
            .iter()
            .zip(&block_ids)
            .flat_map(|(block, id)| block.options.iter().map(move |o| (*id, o)))
            .collect();

        if !options.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO playbook_options (playbook_block_id, position, text, tip, is_correct)
                SELECT * FROM UNNEST($1::uuid[], $2::int[], $3::text[], $4::text[], $5::bool[])
                "#,
            )
            .bind(options.iter().map(|(id, _)| *id).collect::<Vec<_>>())
            .bind(options.iter().map(|(_, o)| o.position).collect::<Vec<_>>())
            .bind(options.iter().map(|(_, o)| o.text.clone()).collect::<Vec<_>>())
            .bind(options.iter().map(|(_, o)| o.tip.clone()).collect::<Vec<_>>())
            .bind(options.iter().map(|(_, o)| o.is_correct).collect::<Vec<_>>())
            .execute(&mut *conn)
            .await?;
        }

        Ok(entry)
    }

    /// The user's most recently completed playbook entry with this name
    ///
    /// Scoped to `user_id`; a global first match could resolve to another
    /// user's entry.
    pub async fn find_latest_by_name<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
        name: &str,
    ) -> AppResult<Option<PlaybookAssignment>> {
        let entry = sqlx::query_as::<_, PlaybookAssignment>(
            r#"
            SELECT * FROM playbook_assignments
            WHERE user_id = $1 AND name = $2
            ORDER BY completed DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(entry)
    }

    /// The user's playbook, newest first
    pub async fn list_for_user<'e, E: PgExecutor<'e>>(
        executor: E,
        user_id: &Uuid,
    ) -> AppResult<Vec<PlaybookAssignment>> {
        let entries = sqlx::query_as::<_, PlaybookAssignment>(
            r#"
            SELECT * FROM playbook_assignments
            WHERE user_id = $1
            ORDER BY completed DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(executor)
        .await?;

        Ok(entries)
    }

    /// Sum of points over the user's playbook
    pub async fn total_points<'e, E: PgExecutor<'e>>(executor: E, user_id: &Uuid) -> AppResult<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"SELECT COALESCE(SUM(points), 0)::bigint FROM playbook_assignments WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }

    /// Blocks of the given playbook entries in display order
    pub async fn list_blocks<'e, E: PgExecutor<'e>>(
        executor: E,
        entry_ids: &[Uuid],
    ) -> AppResult<Vec<PlaybookBlock>> {
        let blocks = sqlx::query_as::<_, PlaybookBlock>(
            r#"
            SELECT * FROM playbook_blocks
            WHERE playbook_assignment_id = ANY($1)
            ORDER BY position
            "#,
        )
        .bind(entry_ids)
        .fetch_all(executor)
        .await?;

        Ok(blocks)
    }

    /// Options of every block of the given playbook entries
    pub async fn list_options<'e, E: PgExecutor<'e>>(
        executor: E,
        entry_ids: &[Uuid],
    ) -> AppResult<Vec<PlaybookOption>> {
        let options = sqlx::query_as::<_, PlaybookOption>(
            r#"
            SELECT o.* FROM playbook_options o
            JOIN playbook_blocks b ON b.id = o.playbook_block_id
            WHERE b.playbook_assignment_id = ANY($1)
            ORDER BY o.position
            "#,
        )
        .bind(entry_ids)
        .fetch_all(executor)
        .await?;

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::snapshot::{PlaybookBlockDraft, PlaybookOptionDraft},
        test_utils,
    };

    fn block(position: i32, kind: &str, name: &str, options: &[&str]) -> PlaybookBlockDraft {
        PlaybookBlockDraft {
            position,
            kind: kind.to_string(),
            name: Some(name.to_string()),
            text: (kind == "Text").then(|| format!("{name} text")),
            image: None,
            video: None,
            question: (kind == "Question").then(|| format!("{name}?")),
            options: options
                .iter()
                .zip(0..)
                .map(|(text, position)| PlaybookOptionDraft {
                    position,
                    text: text.to_string(),
                    tip: String::new(),
                    is_correct: position == 0,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_insert_draft_writes_blocks_and_options_in_order() {
        let pool = test_utils::test_pool().await;
        let category = test_utils::category(&pool).await;
        let user = test_utils::user(&pool, 15).await;
        let draft = PlaybookDraft {
            name: "Archived".to_string(),
            description: None,
            image: None,
            points: 30,
            time: Some(10),
            category_id: category.id,
            priority: 2,
            dependency_name: None,
            blocks: vec![
                block(0, "Text", "Intro", &[]),
                block(1, "Question", "Q1", &["a", "b", "c"]),
                block(2, "Question", "Q2", &["x", "y"]),
            ],
        };

        let mut conn = pool.acquire().await.unwrap();
        let entry = PlaybookRepository::insert_draft(&mut conn, Some(&user.id), &draft, None)
            .await
            .unwrap();

        let blocks = PlaybookRepository::list_blocks(&pool, &[entry.id]).await.unwrap();
        let names: Vec<_> = blocks.iter().map(|b| b.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["Intro", "Q1", "Q2"]);

        let options = PlaybookRepository::list_options(&pool, &[entry.id]).await.unwrap();
        let q1: Vec<_> = options
            .iter()
            .filter(|o| o.playbook_block_id == blocks[1].id)
            .map(|o| o.text.as_str())
            .collect();
        let q2: Vec<_> = options
            .iter()
            .filter(|o| o.playbook_block_id == blocks[2].id)
            .map(|o| o.text.as_str())
            .collect();
        assert_eq!(q1, vec!["a", "b", "c"]);
        assert_eq!(q2, vec!["x", "y"]);

        assert_eq!(PlaybookRepository::total_points(&pool, &user.id).await.unwrap(), 30);
    }

    #[tokio::test]
    async fn test_find_latest_by_name_ignores_other_users() {
        let pool = test_utils::test_pool().await;
        let category = test_utils::category(&pool).await;
        let owner = test_utils::user(&pool, 15).await;
        let stranger = test_utils::user(&pool, 15).await;
        let draft = PlaybookDraft {
            name: "Shared".to_string(),
            description: None,
            image: None,
            points: 0,
            time: None,
            category_id: category.id,
            priority: 1,
            dependency_name: None,
            blocks: Vec::new(),
        };

        let mut conn = pool.acquire().await.unwrap();
        PlaybookRepository::insert_draft(&mut conn, Some(&stranger.id), &draft, None)
            .await
            .unwrap();

        let found = PlaybookRepository::find_latest_by_name(&pool, &owner.id, "Shared")
            .await
            .unwrap();
        assert!(found.is_none());
    }
}
