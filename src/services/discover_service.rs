//! Discover queue and playbook reads

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    constants::DISCOVER_QUEUE_SIZE,
    db::repositories::{BlockRepository, PlaybookRepository, UserAssignmentRepository},
    error::AppResult,
    models::{is_locked, AssignmentTree, PlaybookTree, UserAssignment},
};

/// Queued assignment with its lock state
#[derive(Debug, Clone, Serialize)]
pub struct QueuedAssignment {
    #[serde(flatten)]
    pub tree: AssignmentTree,
    pub locked: bool,
}

/// Read-side service for a user's queue and playbook
pub struct DiscoverService;

impl DiscoverService {
    /// The user's next incomplete assignments, lowest priority first
    pub async fn queue(pool: &PgPool, user_id: &Uuid) -> AppResult<Vec<QueuedAssignment>> {
        let assignments =
            UserAssignmentRepository::pending_assignments(pool, user_id, DISCOVER_QUEUE_SIZE).await?;
        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = assignments.iter().map(|a| a.id).collect();
        let (links, blocks, options) = futures::try_join!(
            UserAssignmentRepository::list_for_user(pool, user_id),
            BlockRepository::list_for_assignments(pool, &ids),
            BlockRepository::list_options_for_assignments(pool, &ids),
        )?;

        let queue = AssignmentTree::assemble_all(assignments, blocks, options)
            .into_iter()
            .map(|tree| {
                let locked = Self::locked(&tree, &links);
                QueuedAssignment { tree, locked }
            })
            .collect();

        Ok(queue)
    }

    /// The user's playbook, newest first, with the sum of its points
    pub async fn playbook(pool: &PgPool, user_id: &Uuid) -> AppResult<(Vec<PlaybookTree>, i64)> {
        let (entries, total_points) = futures::try_join!(
            PlaybookRepository::list_for_user(pool, user_id),
            PlaybookRepository::total_points(pool, user_id),
        )?;

        let ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        let (blocks, options) = futures::try_join!(
            PlaybookRepository::list_blocks(pool, &ids),
            PlaybookRepository::list_options(pool, &ids),
        )?;

        Ok((PlaybookTree::assemble_all(entries, blocks, options), total_points))
    }

    fn locked(tree: &AssignmentTree, links: &[UserAssignment]) -> bool {
        let dependency_link = tree
            .assignment
            .dependent_on_id
            .and_then(|dependency| links.iter().find(|l| l.assignment_id == dependency));
        is_locked(dependency_link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{assignment, link};

    #[test]
    fn test_locked_follows_dependency_link() {
        let user_id = Uuid::new_v4();
        let intro = assignment("Intro", None);
        let mut follow_up = assignment("Follow up", None);
        follow_up.dependent_on_id = Some(intro.id);

        let tree = AssignmentTree::assemble(follow_up, vec![], vec![]);

        // No link to the dependency: not locked.
        assert!(!DiscoverService::locked(&tree, &[]));

        let pending = vec![link(user_id, intro.id, false)];
        assert!(DiscoverService::locked(&tree, &pending));

        let done = vec![link(user_id, intro.id, true)];
        assert!(!DiscoverService::locked(&tree, &done));
    }

    #[test]
    fn test_independent_assignment_is_never_locked() {
        let tree = AssignmentTree::assemble(assignment("Solo", None), vec![], vec![]);
        let links = vec![link(Uuid::new_v4(), Uuid::new_v4(), false)];
        assert!(!DiscoverService::locked(&tree, &links));
    }
}
