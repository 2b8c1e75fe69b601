//! Database repositories
//!
//! Repositories handle all direct database interactions. Single-statement
//! operations accept any `PgExecutor`, so they run on the pool or inside a
//! caller's transaction alike.

pub mod assignment_repo;
pub mod block_repo;
pub mod category_repo;
pub mod playbook_repo;
pub mod target_repo;
pub mod team_repo;
pub mod terms_repo;
pub mod user_assignment_repo;
pub mod user_repo;

pub use assignment_repo::AssignmentRepository;
pub use block_repo::BlockRepository;
pub use category_repo::CategoryRepository;
pub use playbook_repo::PlaybookRepository;
pub use target_repo::TargetRepository;
pub use team_repo::TeamRepository;
pub use terms_repo::TermsRepository;
pub use user_assignment_repo::UserAssignmentRepository;
pub use user_repo::UserRepository;
