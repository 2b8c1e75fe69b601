//! Reassignment service
//!
//! Loads the rows a trigger reaches, plans the link changes and applies them
//! on the caller's connection. Callers run this inside the transaction that
//! performed the mutation.

use std::collections::HashSet;

use sqlx::PgConnection;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::{
        AssignmentRepository, TargetRepository, UserAssignmentRepository, UserRepository,
    },
    engine::{reassignment, ReassignmentPlan, ReassignmentScope, Trigger},
    error::AppResult,
};

/// Reassignment service
pub struct ReassignmentService;

impl ReassignmentService {
    /// Re-evaluate the links affected by `trigger`
    pub async fn reevaluate(conn: &mut PgConnection, trigger: Trigger) -> AppResult<ReassignmentPlan> {
        let scope = Self::load_scope(conn, trigger).await?;
        let plan = reassignment::plan(&scope);

        let revoked = UserAssignmentRepository::revoke(&mut *conn, &plan.revoke).await?;
        let granted = UserAssignmentRepository::grant(&mut *conn, &plan.grant).await?;

        info!(
            trigger = trigger.kind(),
            entity_id = %trigger.entity_id(),
            assignments = scope.assignments.len(),
            users = scope.users.len(),
            revoked,
            granted,
            "Reassignment applied"
        );

        Ok(plan)
    }

    async fn load_scope(conn: &mut PgConnection, trigger: Trigger) -> AppResult<ReassignmentScope> {
        let (assignments, users, links) = match trigger {
            Trigger::AssignmentSaved(id) => {
                let assignments: Vec<_> = AssignmentRepository::find_by_id(&mut *conn, &id)
                    .await?
                    .into_iter()
                    .collect();
                let users = UserRepository::list_all(&mut *conn).await?;
                let links = UserAssignmentRepository::list_for_assignments(&mut *conn, &[id]).await?;
                (assignments, users, links)
            }
            Trigger::UserSaved(id) => {
                let assignments = AssignmentRepository::list_all(&mut *conn).await?;
                let users: Vec<_> = UserRepository::find_by_id(&mut *conn, &id)
                    .await?
                    .into_iter()
                    .collect();
                let links = UserAssignmentRepository::list_for_user(&mut *conn, &id).await?;
                (assignments, users, links)
            }
            Trigger::TargetSaved(id) => {
                let assignments = AssignmentRepository::list_by_target(&mut *conn, &id).await?;
                let ids: Vec<Uuid> = assignments.iter().map(|a| a.id).collect();
                let users = UserRepository::list_all(&mut *conn).await?;
                let links = UserAssignmentRepository::list_for_assignments(&mut *conn, &ids).await?;
                (assignments, users, links)
            }
        };

        let target_ids: Vec<Uuid> = assignments
            .iter()
            .filter_map(|a| a.target_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let targets = TargetRepository::find_by_ids(&mut *conn, &target_ids).await?;

        Ok(ReassignmentScope {
            assignments,
            targets,
            users,
            links,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{AssignmentService, CompletionService, TargetService},
        test_utils,
    };

    fn holders(links: &[crate::models::UserAssignment]) -> Vec<(Uuid, bool)> {
        let mut holders: Vec<_> = links.iter().map(|l| (l.user_id, l.is_completed)).collect();
        holders.sort();
        holders
    }

    #[tokio::test]
    async fn test_target_update_regrants_incomplete_and_keeps_completed_links() {
        let pool = test_utils::test_pool().await;
        let category = test_utils::category(&pool).await;
        let target = test_utils::target(&pool, 13, 99).await;
        let finisher = test_utils::user(&pool, 15).await;
        let learner = test_utils::user(&pool, 16).await;
        let assignment = test_utils::assignment(
            &pool,
            &test_utils::assignment_fields("A", category.id, target.id),
        )
        .await;
        CompletionService::complete(&pool, &finisher.id, &assignment).await.unwrap();

        let mut narrowed = target.rules();
        narrowed.min_age = 30;
        narrowed.max_age = 40;
        TargetService::update(&pool, &target.id, &narrowed).await.unwrap();

        let links = UserAssignmentRepository::list_for_assignments(&pool, &[assignment])
            .await
            .unwrap();
        assert_eq!(holders(&links), vec![(finisher.id, true)]);

        TargetService::update(&pool, &target.id, &target.rules()).await.unwrap();

        let links = UserAssignmentRepository::list_for_assignments(&pool, &[assignment])
            .await
            .unwrap();
        let mut expected = vec![(finisher.id, true), (learner.id, false)];
        expected.sort();
        assert_eq!(holders(&links), expected);
        assert!(links
            .iter()
            .filter(|l| l.is_completed)
            .all(|l| l.completed.is_some()));
    }

    #[tokio::test]
    async fn test_assignment_update_keeps_matching_and_completed_links() {
        let pool = test_utils::test_pool().await;
        let category = test_utils::category(&pool).await;
        let everyone = test_utils::target(&pool, 13, 99).await;
        let adults = test_utils::target(&pool, 18, 99).await;
        let teen = test_utils::user(&pool, 15).await;
        let adult = test_utils::user(&pool, 25).await;

        let mut fields = test_utils::assignment_fields("A", category.id, everyone.id);
        let assignment = test_utils::assignment(&pool, &fields).await;
        CompletionService::complete(&pool, &teen.id, &assignment).await.unwrap();
        let adult_link = UserAssignmentRepository::list_for_user(&pool, &adult.id)
            .await
            .unwrap()
            .remove(0);

        fields.target_id = Some(adults.id);
        fields.points = 80;
        AssignmentService::update(&pool, &assignment, &fields).await.unwrap();

        let links = UserAssignmentRepository::list_for_assignments(&pool, &[assignment])
            .await
            .unwrap();
        let mut expected = vec![(teen.id, true), (adult.id, false)];
        expected.sort();
        assert_eq!(holders(&links), expected);

        let kept = links.iter().find(|l| l.user_id == adult.id).unwrap();
        assert_eq!(kept.id, adult_link.id);
    }
}
