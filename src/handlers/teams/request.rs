//! Team request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    /// Stored media path of the team logo
    pub logo: Option<String>,
}
