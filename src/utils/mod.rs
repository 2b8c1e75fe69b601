//! Utility functions

pub mod pagination;
pub mod validation;

pub use pagination::Page;
pub use validation::{parse_activity, parse_block_kind, parse_gender};
