//! Reassignment planning
//!
//! A mutation of an assignment, user or target invalidates the incomplete
//! links it could affect. The planner compares the links in scope with what
//! targeting says now and returns the difference. Completed links are never
//! part of a plan.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use super::targeting::assignment_matches;
use crate::models::{Assignment, Target, User, UserAssignment};

/// Entity mutation that requires links to be re-evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    AssignmentSaved(Uuid),
    UserSaved(Uuid),
    TargetSaved(Uuid),
}

impl Trigger {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AssignmentSaved(_) => "assignment_saved",
            Self::UserSaved(_) => "user_saved",
            Self::TargetSaved(_) => "target_saved",
        }
    }

    pub fn entity_id(&self) -> Uuid {
        match self {
            Self::AssignmentSaved(id) | Self::UserSaved(id) | Self::TargetSaved(id) => *id,
        }
    }
}

/// Rows a trigger reaches.
///
/// - `AssignmentSaved(a)`: `a`, every user, every link of `a`
/// - `UserSaved(u)`: every assignment, `u`, every link of `u`
/// - `TargetSaved(t)`: assignments targeting `t`, every user, their links
///
/// `targets` holds the targets referenced by `assignments`.
#[derive(Debug, Clone, Default)]
pub struct ReassignmentScope {
    pub assignments: Vec<Assignment>,
    pub targets: Vec<Target>,
    pub users: Vec<User>,
    pub links: Vec<UserAssignment>,
}

/// Link changes produced by the planner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReassignmentPlan {
    /// Incomplete links whose pair no longer matches
    pub revoke: Vec<Uuid>,
    /// (user, assignment) pairs that match and have no link
    pub grant: Vec<(Uuid, Uuid)>,
}

impl ReassignmentPlan {
    pub fn is_empty(&self) -> bool {
        self.revoke.is_empty() && self.grant.is_empty()
    }
}

/// Compute the link changes for a loaded scope.
///
/// Running the plan and then planning again over the result yields an
/// empty plan.
pub fn plan(scope: &ReassignmentScope) -> ReassignmentPlan {
    let targets: HashMap<Uuid, &Target> = scope.targets.iter().map(|t| (t.id, t)).collect();
    let assignment_ids: HashSet<Uuid> = scope.assignments.iter().map(|a| a.id).collect();
    let user_ids: HashSet<Uuid> = scope.users.iter().map(|u| u.id).collect();

    let mut wanted: HashSet<(Uuid, Uuid)> = HashSet::new();
    for assignment in &scope.assignments {
        let target = assignment.target_id.and_then(|id| targets.get(&id).copied());
        for user in &scope.users {
            if assignment_matches(target, user) {
                wanted.insert((user.id, assignment.id));
            }
        }
    }

    let mut linked: HashSet<(Uuid, Uuid)> = HashSet::new();
    let mut revoke = Vec::new();
    for link in &scope.links {
        let pair = (link.user_id, link.assignment_id);
        let in_scope = user_ids.contains(&link.user_id) && assignment_ids.contains(&link.assignment_id);

        if !link.is_completed && in_scope && !wanted.contains(&pair) {
            revoke.push(link.id);
        } else {
            linked.insert(pair);
        }
    }

    // Iterate in scope order so plans are deterministic.
    let grant = scope
        .assignments
        .iter()
        .flat_map(|a| scope.users.iter().map(move |u| (u.id, a.id)))
        .filter(|pair| wanted.contains(pair) && !linked.contains(pair))
        .collect();

    ReassignmentPlan { revoke, grant }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::genders;
    use crate::engine::fixtures::{assignment, link, target, user};

    /// Apply a plan to an in-memory link table
    fn apply(links: &mut Vec<UserAssignment>, plan: &ReassignmentPlan) {
        links.retain(|l| !plan.revoke.contains(&l.id));
        for &(user_id, assignment_id) in &plan.grant {
            if !links
                .iter()
                .any(|l| l.user_id == user_id && l.assignment_id == assignment_id)
            {
                links.push(link(user_id, assignment_id, false));
            }
        }
    }

    fn incomplete_users(links: &[UserAssignment], assignment_id: Uuid) -> HashSet<Uuid> {
        links
            .iter()
            .filter(|l| l.assignment_id == assignment_id && !l.is_completed)
            .map(|l| l.user_id)
            .collect()
    }

    fn teen_girls() -> Target {
        let mut t = target(13, 17);
        t.female = true;
        t
    }

    #[test]
    fn test_assignment_saved_grants_matching_users() {
        let t = teen_girls();
        let a = assignment("Intro", Some(t.id));
        let girl = user(15, Some(genders::FEMALE), None);
        let boy = user(15, Some(genders::MALE), None);

        let scope = ReassignmentScope {
            assignments: vec![a.clone()],
            targets: vec![t],
            users: vec![girl.clone(), boy],
            links: vec![],
        };

        let plan = plan(&scope);
        assert!(plan.revoke.is_empty());
        assert_eq!(plan.grant, vec![(girl.id, a.id)]);
    }

    #[test]
    fn test_untargeted_assignment_grants_nothing() {
        let a = assignment("Loose", None);
        let scope = ReassignmentScope {
            assignments: vec![a],
            targets: vec![],
            users: vec![user(15, Some(genders::FEMALE), None)],
            links: vec![],
        };
        assert!(plan(&scope).is_empty());
    }

    #[test]
    fn test_completed_links_are_untouched() {
        let t = teen_girls();
        let a = assignment("Intro", Some(t.id));
        // No longer matches, but already completed.
        let grown = user(18, Some(genders::FEMALE), None);
        let done = link(grown.id, a.id, true);

        let scope = ReassignmentScope {
            assignments: vec![a],
            targets: vec![t],
            users: vec![grown],
            links: vec![done],
        };
        assert!(plan(&scope).is_empty());
    }

    #[test]
    fn test_completed_link_blocks_regrant() {
        let t = teen_girls();
        let a = assignment("Intro", Some(t.id));
        let girl = user(15, Some(genders::FEMALE), None);
        let done = link(girl.id, a.id, true);

        let scope = ReassignmentScope {
            assignments: vec![a],
            targets: vec![t],
            users: vec![girl],
            links: vec![done],
        };
        assert!(plan(&scope).grant.is_empty());
    }

    #[test]
    fn test_stale_incomplete_links_are_revoked() {
        let t = teen_girls();
        let a = assignment("Intro", Some(t.id));
        let boy = user(15, Some(genders::MALE), None);
        let stale = link(boy.id, a.id, false);
        let stale_id = stale.id;

        let scope = ReassignmentScope {
            assignments: vec![a],
            targets: vec![t],
            users: vec![boy],
            links: vec![stale],
        };
        let plan = plan(&scope);
        assert_eq!(plan.revoke, vec![stale_id]);
        assert!(plan.grant.is_empty());
    }

    #[test]
    fn test_saving_twice_is_idempotent() {
        let t = teen_girls();
        let a = assignment("Intro", Some(t.id));
        let users = vec![
            user(13, Some(genders::FEMALE), None),
            user(17, Some(genders::FEMALE), None),
            user(18, Some(genders::FEMALE), None),
            user(15, None, None),
        ];

        let mut scope = ReassignmentScope {
            assignments: vec![a.clone()],
            targets: vec![t],
            users,
            links: vec![],
        };

        let first = plan(&scope);
        apply(&mut scope.links, &first);
        let before = incomplete_users(&scope.links, a.id);
        assert_eq!(before.len(), 2);

        let second = plan(&scope);
        assert!(second.is_empty());
        apply(&mut scope.links, &second);
        assert_eq!(incomplete_users(&scope.links, a.id), before);
    }

    #[test]
    fn test_retargeting_moves_incomplete_links_only() {
        let teens = teen_girls();
        let mut adults = target(18, 99);
        adults.female = true;

        let mut a = assignment("Intro", Some(teens.id));
        let girl = user(15, Some(genders::FEMALE), None);
        let woman = user(30, Some(genders::FEMALE), None);
        let finished = user(16, Some(genders::FEMALE), None);

        let mut links = vec![
            link(girl.id, a.id, false),
            link(finished.id, a.id, true),
        ];
        let completed_before: Vec<Uuid> =
            links.iter().filter(|l| l.is_completed).map(|l| l.id).collect();

        a.target_id = Some(adults.id);
        let scope = ReassignmentScope {
            assignments: vec![a.clone()],
            targets: vec![adults],
            users: vec![girl.clone(), woman.clone(), finished],
            links: links.clone(),
        };
        apply(&mut links, &plan(&scope));

        assert_eq!(incomplete_users(&links, a.id), HashSet::from([woman.id]));
        let completed_after: Vec<Uuid> =
            links.iter().filter(|l| l.is_completed).map(|l| l.id).collect();
        assert_eq!(completed_before, completed_after);
    }

    #[test]
    fn test_user_saved_spans_all_assignments() {
        let teens = teen_girls();
        let mut adults = target(18, 99);
        adults.female = true;

        let teen_task = assignment("Teen task", Some(teens.id));
        let adult_task = assignment("Adult task", Some(adults.id));

        // The user just turned 18.
        let u = user(18, Some(genders::FEMALE), None);
        let old = link(u.id, teen_task.id, false);
        let old_id = old.id;

        let scope = ReassignmentScope {
            assignments: vec![teen_task, adult_task.clone()],
            targets: vec![teens, adults],
            users: vec![u.clone()],
            links: vec![old],
        };
        let plan = plan(&scope);
        assert_eq!(plan.revoke, vec![old_id]);
        assert_eq!(plan.grant, vec![(u.id, adult_task.id)]);
    }

    #[test]
    fn test_trigger_labels() {
        let id = Uuid::new_v4();
        assert_eq!(Trigger::TargetSaved(id).kind(), "target_saved");
        assert_eq!(Trigger::UserSaved(id).entity_id(), id);
    }
}
