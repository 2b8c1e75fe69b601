//! Assignment request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{constants::MAX_NAME_LENGTH, models::{AssignmentFields, OptionFields}};

/// Create or replace an assignment
#[derive(Debug, Deserialize, Validate)]
pub struct AssignmentRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    pub description: Option<String>,

    /// Stored media path of the tile image; the default image is used when
    /// omitted on create and the current one is kept on update
    pub image: Option<String>,

    #[validate(range(min = 0))]
    pub points: i32,

    /// Time in seconds
    #[validate(range(min = 0))]
    pub time: Option<i32>,

    pub category_id: Uuid,

    pub target_id: Option<Uuid>,

    #[serde(default)]
    pub priority: i32,

    pub dependent_on_id: Option<Uuid>,
}

impl From<AssignmentRequest> for AssignmentFields {
    fn from(r: AssignmentRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            image: r.image,
            points: r.points,
            time: r.time,
            category_id: r.category_id,
            target_id: r.target_id,
            priority: r.priority,
            dependent_on_id: r.dependent_on_id,
        }
    }
}

/// List assignments query parameters
#[derive(Debug, Deserialize)]
pub struct ListAssignmentsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category_id: Option<Uuid>,
}

/// Add a block
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBlockRequest {
    /// One of `Text`, `Image`, `Video`, `Question`
    pub kind: String,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub name: Option<String>,

    /// Text, stored media path or question, depending on the kind
    pub content: Option<String>,
}

/// Edit a block; its kind cannot change
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBlockRequest {
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub name: Option<String>,

    #[validate(range(min = 0))]
    pub position: Option<i32>,

    pub content: Option<String>,
}

/// Create or replace a question option
#[derive(Debug, Deserialize, Validate)]
pub struct OptionRequest {
    #[validate(length(min = 1))]
    pub text: String,

    #[serde(default)]
    pub tip: String,

    #[serde(default)]
    pub is_correct: bool,
}

impl From<OptionRequest> for OptionFields {
    fn from(r: OptionRequest) -> Self {
        Self {
            text: r.text,
            tip: r.tip,
            is_correct: r.is_correct,
        }
    }
}
