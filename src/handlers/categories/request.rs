//! Category request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

/// Create or rename a category
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,
}

/// Page query shared by list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
