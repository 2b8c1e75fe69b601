//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod assignment;
pub mod block;
pub mod category;
pub mod playbook;
pub mod target;
pub mod terms;
pub mod user;
pub mod user_assignment;

pub use assignment::*;
pub use block::*;
pub use category::*;
pub use playbook::*;
pub use target::*;
pub use terms::*;
pub use user::*;
pub use user_assignment::*;
