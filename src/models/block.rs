//! Assignment block and option models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{block_kinds, block_origins};

/// Assignment block database model.
///
/// The content column that applies depends on `kind`: `text` for Text,
/// `image` for Image, `video` for Video and `question` for Question.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AssignmentBlock {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub position: i32,
    pub kind: String,
    pub origin: String,
    pub name: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub question: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AssignmentBlock {
    pub fn kind(&self) -> Option<BlockKind> {
        BlockKind::from_str(&self.kind)
    }

    pub fn origin(&self) -> BlockOrigin {
        BlockOrigin::from_str(&self.origin).unwrap_or(BlockOrigin::Manual)
    }

    /// Content of the column matching the block kind
    pub fn content(&self) -> Option<&str> {
        let content = match self.kind()? {
            BlockKind::Text => self.text.as_deref(),
            BlockKind::Image => self.image.as_deref(),
            BlockKind::Video => self.video.as_deref(),
            BlockKind::Question => self.question.as_deref(),
        };
        content
    }

    pub fn has_content(&self) -> bool {
        self.content().is_some()
    }

    /// Whether the empty-block guard must remove this block.
    ///
    /// Blocks staged by the bulk importer are exempt while their content is
    /// being attached.
    pub fn should_discard(&self) -> bool {
        !self.has_content() && self.origin() == BlockOrigin::Manual
    }
}

/// Answer option of a question block
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BlockOption {
    pub id: Uuid,
    pub block_id: Uuid,
    pub position: i32,
    pub text: String,
    pub tip: String,
    pub is_correct: bool,
}

/// Block kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Text,
    Image,
    Video,
    Question,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => block_kinds::TEXT,
            Self::Image => block_kinds::IMAGE,
            Self::Video => block_kinds::VIDEO,
            Self::Question => block_kinds::QUESTION,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            block_kinds::TEXT => Some(Self::Text),
            block_kinds::IMAGE => Some(Self::Image),
            block_kinds::VIDEO => Some(Self::Video),
            block_kinds::QUESTION => Some(Self::Question),
            _ => None,
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a block was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockOrigin {
    Manual,
    BulkImport,
}

impl BlockOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => block_origins::MANUAL,
            Self::BulkImport => block_origins::BULK_IMPORT,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            block_origins::MANUAL => Some(Self::Manual),
            block_origins::BULK_IMPORT => Some(Self::BulkImport),
            _ => None,
        }
    }
}

/// Content written into a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Text(String),
    Image(String),
    Video(String),
    Question(String),
}

impl BlockContent {
    /// Pair a kind with its (possibly missing) content
    pub fn new(kind: BlockKind, content: Option<String>) -> Option<Self> {
        let content = content?;
        Some(match kind {
            BlockKind::Text => Self::Text(content),
            BlockKind::Image => Self::Image(content),
            BlockKind::Video => Self::Video(content),
            BlockKind::Question => Self::Question(content),
        })
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Text(_) => BlockKind::Text,
            Self::Image(_) => BlockKind::Image,
            Self::Video(_) => BlockKind::Video,
            Self::Question(_) => BlockKind::Question,
        }
    }

    /// Values for the (text, image, video, question) columns
    pub fn columns(&self) -> (Option<&str>, Option<&str>, Option<&str>, Option<&str>) {
        match self {
            Self::Text(v) => (Some(v), None, None, None),
            Self::Image(v) => (None, Some(v), None, None),
            Self::Video(v) => (None, None, Some(v), None),
            Self::Question(v) => (None, None, None, Some(v)),
        }
    }
}

/// Fields of a new or edited option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionFields {
    pub text: String,
    pub tip: String,
    pub is_correct: bool,
}

/// Enforce at most one correct option per question.
///
/// `editing` is the option being saved when it already exists, so that
/// re-saving the current correct option is allowed.
pub fn ensure_single_correct(
    existing: &[BlockOption],
    editing: Option<Uuid>,
    is_correct: bool,
) -> Result<(), &'static str> {
    if !is_correct {
        return Ok(());
    }

    let other_correct = existing
        .iter()
        .filter(|o| Some(o.id) != editing)
        .any(|o| o.is_correct);

    if other_correct {
        return Err("Only one correct answer per question");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: &str, origin: BlockOrigin, text: Option<&str>) -> AssignmentBlock {
        AssignmentBlock {
            id: Uuid::new_v4(),
            assignment_id: Uuid::new_v4(),
            position: 0,
            kind: kind.to_string(),
            origin: origin.as_str().to_string(),
            name: None,
            text: text.map(str::to_string),
            image: None,
            video: None,
            question: None,
            created_at: Utc::now(),
        }
    }

    fn option(is_correct: bool) -> BlockOption {
        BlockOption {
            id: Uuid::new_v4(),
            block_id: Uuid::new_v4(),
            position: 0,
            text: "A".to_string(),
            tip: String::new(),
            is_correct,
        }
    }

    #[test]
    fn test_empty_manual_block_is_discarded() {
        assert!(block("Text", BlockOrigin::Manual, None).should_discard());
        assert!(!block("Text", BlockOrigin::Manual, Some("hello")).should_discard());
    }

    #[test]
    fn test_bulk_import_block_survives_without_content() {
        assert!(!block("Text", BlockOrigin::BulkImport, None).should_discard());
    }

    #[test]
    fn test_content_must_match_kind() {
        // Text stored on an Image block does not count as content.
        assert!(block("Image", BlockOrigin::Manual, Some("hello")).should_discard());
    }

    #[test]
    fn test_single_correct_option() {
        let correct = option(true);
        let wrong = option(false);
        let existing = vec![correct.clone(), wrong.clone()];

        assert!(ensure_single_correct(&existing, None, false).is_ok());
        assert!(ensure_single_correct(&existing, None, true).is_err());
        assert!(ensure_single_correct(&existing, Some(wrong.id), true).is_err());
        // Re-saving the correct option itself is fine.
        assert!(ensure_single_correct(&existing, Some(correct.id), true).is_ok());
    }

    #[test]
    fn test_block_content_columns() {
        let content = BlockContent::new(BlockKind::Video, Some("v.mp4".into())).unwrap();
        assert_eq!(content.kind(), BlockKind::Video);
        assert_eq!(content.columns(), (None, None, Some("v.mp4"), None));
        assert!(BlockContent::new(BlockKind::Text, None).is_none());
    }
}
