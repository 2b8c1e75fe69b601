//! Discover request DTOs

use serde::{Deserialize, Serialize};

/// Completion request; only `{"is_completed": true}` is accepted
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompleteRequest {
    pub is_completed: bool,
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub message: String,
    pub points: i32,
}
