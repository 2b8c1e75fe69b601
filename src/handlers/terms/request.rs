//! Terms and conditions request DTOs

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SaveTermsRequest {
    #[validate(length(min = 1))]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AcceptTermsRequest {
    #[serde(default)]
    pub accepted_terms_cond: bool,
}
