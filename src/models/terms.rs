//! Terms and conditions model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{AppError, AppResult};

/// Current terms and conditions text
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TermsAndConditions {
    pub text: String,
    pub updated_at: DateTime<Utc>,
}

/// Decide whether a user's acceptance request can be recorded.
///
/// Acceptance is one-way until the text changes again.
pub fn ensure_acceptable(already_accepted: bool, accepted: bool) -> AppResult<()> {
    if !accepted {
        return Err(AppError::Validation(
            "To accept the Terms and Conditions send \"accepted_terms_cond\": true".to_string(),
        ));
    }
    if already_accepted {
        return Err(AppError::Validation(
            "Terms and Conditions already accepted".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acceptance_rules() {
        assert!(ensure_acceptable(false, true).is_ok());
        assert!(matches!(
            ensure_acceptable(false, false),
            Err(AppError::Validation(msg)) if msg.contains("accepted_terms_cond")
        ));
        assert!(matches!(
            ensure_acceptable(true, true),
            Err(AppError::Validation(msg)) if msg.contains("already accepted")
        ));
        assert!(matches!(
            ensure_acceptable(true, false),
            Err(AppError::Validation(msg)) if msg.contains("accepted_terms_cond")
        ));
    }
}
