//! Completion service
//!
//! Completing an assignment marks the user's link done, freezes the
//! assignment tree into the user's playbook and credits the points, all in
//! one transaction.

use sqlx::{PgConnection, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{
        AssignmentRepository, PlaybookRepository, UserAssignmentRepository, UserRepository,
    },
    engine::snapshot,
    error::{AppError, AppResult},
    models::{AssignmentTree, PlaybookAssignment, UserAssignment},
    services::AssignmentService,
};

/// Completion service
pub struct CompletionService;

impl CompletionService {
    /// Complete `assignment_id` for `user_id`.
    ///
    /// Fails with `NotAssigned` when the user has no link to the assignment
    /// or has already completed it.
    pub async fn complete(
        pool: &PgPool,
        user_id: &Uuid,
        assignment_id: &Uuid,
    ) -> AppResult<PlaybookAssignment> {
        let mut tx = pool.begin().await?;

        let link = UserAssignmentRepository::lock(&mut tx, user_id, assignment_id).await?;
        let link = UserAssignment::ensure_completable(link)?;
        UserAssignmentRepository::mark_completed(&mut *tx, &link.id).await?;

        let tree = AssignmentService::load_tree(&mut tx, assignment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Assignment not found".to_string()))?;

        let entry = Self::write_playbook(&mut tx, Some(user_id), &tree).await?;
        UserRepository::add_points(&mut *tx, user_id, tree.assignment.points).await?;

        tx.commit().await?;

        info!(
            user_id = %user_id,
            assignment_id = %assignment_id,
            playbook_id = %entry.id,
            points = tree.assignment.points,
            "Assignment completed"
        );

        Ok(entry)
    }

    /// Snapshot a tree into a playbook entry without touching the user's
    /// points.
    ///
    /// The entry's dependency is the owner's latest playbook entry named
    /// like the source assignment's dependency, if any. The lookup never
    /// crosses users, so an entry cannot point into someone else's playbook
    /// even when several users completed an assignment of that name;
    /// ownerless entries get no dependency.
    pub async fn write_playbook(
        conn: &mut PgConnection,
        user_id: Option<&Uuid>,
        tree: &AssignmentTree,
    ) -> AppResult<PlaybookAssignment> {
        let dependency_name = match &tree.assignment.dependent_on_id {
            Some(id) => AssignmentRepository::find_by_id(&mut *conn, id)
                .await?
                .map(|a| a.name),
            None => None,
        };

        let draft = snapshot(tree, dependency_name);

        let dependent_on = match (user_id, &draft.dependency_name) {
            (Some(user_id), Some(name)) => {
                PlaybookRepository::find_latest_by_name(&mut *conn, user_id, name)
                    .await?
                    .map(|entry| entry.id)
            }
            _ => None,
        };

        PlaybookRepository::insert_draft(conn, user_id, &draft, dependent_on.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{BlockContent, BlockKind, OptionFields},
        services::{BlockService, UserService},
        test_utils,
    };

    #[tokio::test]
    async fn test_complete_credits_points_and_freezes_tree() {
        let pool = test_utils::test_pool().await;
        let category = test_utils::category(&pool).await;
        let target = test_utils::target(&pool, 13, 99).await;
        let user = test_utils::user(&pool, 15).await;
        let assignment = test_utils::assignment(
            &pool,
            &test_utils::assignment_fields("A", category.id, target.id),
        )
        .await;

        BlockService::add_block(
            &pool,
            &assignment,
            BlockKind::Text,
            Some("Intro"),
            Some(BlockContent::Text("Welcome".to_string())),
        )
        .await
        .unwrap();
        let question = BlockService::add_block(
            &pool,
            &assignment,
            BlockKind::Question,
            Some("Check"),
            Some(BlockContent::Question("Which one?".to_string())),
        )
        .await
        .unwrap();
        for (text, is_correct) in [("First", false), ("Second", true)] {
            let option = OptionFields {
                text: text.to_string(),
                tip: format!("{text} tip"),
                is_correct,
            };
            BlockService::add_option(&pool, &assignment, &question.id, &option)
                .await
                .unwrap();
        }

        let entry = CompletionService::complete(&pool, &user.id, &assignment).await.unwrap();

        assert_eq!(entry.name, "A");
        assert_eq!(entry.points, 50);
        assert_eq!(entry.user_id, Some(user.id));

        let user = UserService::get_user_by_id(&pool, &user.id).await.unwrap();
        assert_eq!(user.total_points, 50);

        let blocks = PlaybookRepository::list_blocks(&pool, &[entry.id]).await.unwrap();
        let names: Vec<_> = blocks.iter().map(|b| b.name.as_deref()).collect();
        assert_eq!(names, vec![Some("Intro"), Some("Check")]);

        let options = PlaybookRepository::list_options(&pool, &[entry.id]).await.unwrap();
        let texts: Vec<_> = options.iter().map(|o| (o.text.as_str(), o.is_correct)).collect();
        assert_eq!(texts, vec![("First", false), ("Second", true)]);
        assert!(options.iter().all(|o| o.playbook_block_id == blocks[1].id));
    }

    #[tokio::test]
    async fn test_second_completion_is_rejected_without_duplicate_entry() {
        let pool = test_utils::test_pool().await;
        let category = test_utils::category(&pool).await;
        let target = test_utils::target(&pool, 13, 99).await;
        let user = test_utils::user(&pool, 15).await;
        let assignment = test_utils::assignment(
            &pool,
            &test_utils::assignment_fields("A", category.id, target.id),
        )
        .await;

        CompletionService::complete(&pool, &user.id, &assignment).await.unwrap();
        let again = CompletionService::complete(&pool, &user.id, &assignment).await;

        assert!(matches!(again, Err(AppError::NotAssigned(_))));
        assert_eq!(PlaybookRepository::list_for_user(&pool, &user.id).await.unwrap().len(), 1);
        assert_eq!(
            UserService::get_user_by_id(&pool, &user.id).await.unwrap().total_points,
            50
        );
    }

    #[tokio::test]
    async fn test_unassigned_completion_writes_nothing() {
        let pool = test_utils::test_pool().await;
        let category = test_utils::category(&pool).await;
        let target = test_utils::target(&pool, 30, 40).await;
        let user = test_utils::user(&pool, 15).await;
        let assignment = test_utils::assignment(
            &pool,
            &test_utils::assignment_fields("A", category.id, target.id),
        )
        .await;

        let result = CompletionService::complete(&pool, &user.id, &assignment).await;

        assert!(matches!(result, Err(AppError::NotAssigned(_))));
        assert!(PlaybookRepository::list_for_user(&pool, &user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dependency_resolves_within_own_playbook() {
        let pool = test_utils::test_pool().await;
        let category = test_utils::category(&pool).await;
        let target = test_utils::target(&pool, 13, 99).await;
        let first = test_utils::user(&pool, 15).await;
        let second = test_utils::user(&pool, 16).await;

        let base = test_utils::assignment(
            &pool,
            &test_utils::assignment_fields("A", category.id, target.id),
        )
        .await;
        let mut follow_up = test_utils::assignment_fields("B", category.id, target.id);
        follow_up.dependent_on_id = Some(base);
        let follow_up = test_utils::assignment(&pool, &follow_up).await;

        let other_entry = CompletionService::complete(&pool, &second.id, &base).await.unwrap();
        let own_entry = CompletionService::complete(&pool, &first.id, &base).await.unwrap();
        let entry = CompletionService::complete(&pool, &first.id, &follow_up).await.unwrap();

        assert_eq!(entry.dependent_on_id, Some(own_entry.id));
        assert_ne!(entry.dependent_on_id, Some(other_entry.id));
    }
}
