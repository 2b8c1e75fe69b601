//! Assignment engine
//!
//! Pure decision logic over loaded rows: which users an assignment targets,
//! which links a mutation revokes and grants, and how a completed assignment
//! is frozen into a playbook draft. Callers own all I/O.

pub mod reassignment;
pub mod snapshot;
pub mod targeting;

pub use reassignment::{plan, ReassignmentPlan, ReassignmentScope, Trigger};
pub use snapshot::{snapshot, PlaybookDraft};
pub use targeting::{assignment_matches, matches};

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::{Assignment, Target, User, UserAssignment};

    pub fn target(min_age: i16, max_age: i16) -> Target {
        let now = Utc::now();
        Target {
            id: Uuid::new_v4(),
            name: format!("Target {min_age}-{max_age}"),
            min_age,
            max_age,
            male: false,
            female: false,
            non_binary: false,
            transgender: false,
            other: false,
            law_explorer: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn user(age: i16, gender: Option<&str>, activity: Option<&str>) -> User {
        let now = Utc::now();
        let id = Uuid::new_v4();
        User {
            id,
            email: format!("{id}@example.com"),
            password_hash: String::new(),
            first_name: None,
            last_name: None,
            age,
            gender: gender.map(str::to_string),
            guardian_email: None,
            activity: activity.map(str::to_string),
            team_id: None,
            total_points: 0,
            first_login: true,
            accepted_terms_cond: false,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn assignment(name: &str, target_id: Option<Uuid>) -> Assignment {
        let now = Utc::now();
        Assignment {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            image: None,
            points: 50,
            time: None,
            category_id: Uuid::new_v4(),
            target_id,
            priority: 0,
            dependent_on_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn link(user_id: Uuid, assignment_id: Uuid, is_completed: bool) -> UserAssignment {
        UserAssignment {
            id: Uuid::new_v4(),
            user_id,
            assignment_id,
            is_completed,
            completed: is_completed.then(Utc::now),
            created_at: Utc::now(),
        }
    }
}
