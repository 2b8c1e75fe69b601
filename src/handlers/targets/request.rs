//! Target request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::{constants::MAX_NAME_LENGTH, models::TargetRules};

/// Create or replace a target; unset flags default to false
#[derive(Debug, Deserialize, Validate)]
pub struct TargetRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,
    pub min_age: i16,
    pub max_age: i16,
    #[serde(default)]
    pub male: bool,
    #[serde(default)]
    pub female: bool,
    #[serde(default)]
    pub non_binary: bool,
    #[serde(default)]
    pub transgender: bool,
    #[serde(default)]
    pub other: bool,
    #[serde(default)]
    pub law_explorer: bool,
}

impl From<TargetRequest> for TargetRules {
    fn from(r: TargetRequest) -> Self {
        Self {
            name: r.name,
            min_age: r.min_age,
            max_age: r.max_age,
            male: r.male,
            female: r.female,
            non_binary: r.non_binary,
            transgender: r.transgender,
            other: r.other,
            law_explorer: r.law_explorer,
        }
    }
}
