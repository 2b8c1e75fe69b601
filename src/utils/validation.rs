//! Parsing of enumerated request fields

use crate::{
    error::{AppError, AppResult},
    models::{Activity, BlockKind, Gender},
};

/// Parse an optional gender label
pub fn parse_gender(value: Option<&str>) -> AppResult<Option<Gender>> {
    value
        .map(|v| {
            Gender::from_str(v).ok_or_else(|| AppError::Validation(format!("Unknown gender '{v}'")))
        })
        .transpose()
}

/// Parse an optional activity label
pub fn parse_activity(value: Option<&str>) -> AppResult<Option<Activity>> {
    value
        .map(|v| {
            Activity::from_str(v)
                .ok_or_else(|| AppError::Validation(format!("Unknown activity '{v}'")))
        })
        .transpose()
}

/// Parse a block kind
pub fn parse_block_kind(value: &str) -> AppResult<BlockKind> {
    BlockKind::from_str(value)
        .ok_or_else(|| AppError::Validation(format!("Unknown block type '{value}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gender() {
        assert_eq!(parse_gender(None).unwrap(), None);
        assert_eq!(parse_gender(Some("Female")).unwrap(), Some(Gender::Female));
        assert!(parse_gender(Some("female")).is_err());
    }

    #[test]
    fn test_parse_activity() {
        assert_eq!(
            parse_activity(Some("Law Explorers")).unwrap(),
            Some(Activity::LawExplorers)
        );
        assert!(parse_activity(Some("Chess")).is_err());
    }

    #[test]
    fn test_parse_block_kind() {
        assert_eq!(parse_block_kind("Question").unwrap(), BlockKind::Question);
        assert!(matches!(parse_block_kind("Quiz"), Err(AppError::Validation(_))));
    }
}
