//! Business logic services

pub mod assignment_service;
pub mod auth_service;
pub mod block_service;
pub mod bulk_import_service;
pub mod category_service;
pub mod completion_service;
pub mod discover_service;
pub mod reassignment_service;
pub mod seed_service;
pub mod target_service;
pub mod team_service;
pub mod terms_service;
pub mod user_service;

pub use assignment_service::AssignmentService;
pub use auth_service::{AuthService, Claims};
pub use block_service::BlockService;
pub use bulk_import_service::BulkImportService;
pub use category_service::CategoryService;
pub use completion_service::CompletionService;
pub use discover_service::{DiscoverService, QueuedAssignment};
pub use reassignment_service::ReassignmentService;
pub use seed_service::SeedService;
pub use target_service::TargetService;
pub use team_service::TeamService;
pub use terms_service::TermsService;
pub use user_service::UserService;
