//! Terms and conditions response DTOs

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AcceptTermsResponse {
    pub message: String,
}
