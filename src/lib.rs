//! Playbook - Gamified Assignment Platform
//!
//! Admins author assignments made of content blocks and attach demographic
//! targets to them. Users receive the assignments whose target matches
//! them, complete them, and every completion is frozen into the user's
//! playbook.
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic and transactions
//! - **Engine**: Pure targeting, reassignment and snapshot logic
//! - **Repositories**: Database access
//! - **Models**: Domain models
//! - **Bulk import**: CSV validation and batch building

pub mod bulk_import;
pub mod config;
pub mod constants;
pub mod db;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
