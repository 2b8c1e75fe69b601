//! Bulk CSV import of assignments
//!
//! An upload is parsed into a [`Sheet`], every row is validated against the
//! store and the remote media it links to, and only a fully valid batch is
//! built.

pub mod builder;
pub mod catalog;
pub mod layout;
pub mod probe;
pub mod sheet;
pub mod validator;

use uuid::Uuid;

use crate::models::OptionFields;

pub use builder::{build, ImportReport};
pub use catalog::{ImportCatalog, PgImportCatalog};
pub use probe::{Download, HttpMediaProbe, MediaProbe};
pub use sheet::Sheet;
pub use validator::validate;

/// A validated row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentImport {
    pub row: usize,
    pub name: String,
    pub description: String,
    pub tile_image: String,
    pub points: i32,
    pub priority: i32,
    pub time: Option<i32>,
    pub category_id: Uuid,
    pub target_id: Uuid,
    /// Name of the assignment this one depends on
    pub dependent_on: Option<String>,
    pub blocks: Vec<BlockImport>,
}

/// A validated block; media variants still hold the remote URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockImport {
    Text(String),
    Image(String),
    Video(String),
    Question {
        text: String,
        options: Vec<OptionFields>,
    },
}
