//! Block column layout
//!
//! Block columns come in groups: a `block_type…` column, the content column
//! right after it (its header contains `block`), and for questions any
//! number of option triples (`option_text…`, `option_tip…`,
//! `option_correct…`).

use crate::constants::bulk_import::{BLOCK_MARKER, BLOCK_TYPE_MARKER, OPTION_MARKER};

/// Column indexes of one block group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockColumns {
    pub type_column: usize,
    pub content_column: usize,
    pub options: Vec<OptionColumns>,
}

/// Column indexes of one option triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionColumns {
    pub text: usize,
    pub tip: usize,
    pub correct: usize,
}

/// Header that does not start a well-formed group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteHeader(pub String);

/// Find every block group in header order
pub fn block_groups(headers: &[String]) -> Result<Vec<BlockColumns>, IncompleteHeader> {
    let mut groups = Vec::new();

    for (index, header) in headers.iter().enumerate() {
        if !header.contains(BLOCK_TYPE_MARKER) {
            continue;
        }

        let content_column = index + 1;
        match headers.get(content_column) {
            Some(next) if next.contains(BLOCK_MARKER) && !next.contains(BLOCK_TYPE_MARKER) => {}
            _ => return Err(IncompleteHeader(header.clone())),
        }

        let mut options = Vec::new();
        let mut cursor = content_column + 1;
        while headers
            .get(cursor)
            .is_some_and(|h| h.contains(OPTION_MARKER))
        {
            let triple = (
                headers.get(cursor),
                headers.get(cursor + 1),
                headers.get(cursor + 2),
            );
            match triple {
                (Some(text), Some(tip), Some(correct))
                    if text.contains("option_text")
                        && tip.contains("option_tip")
                        && correct.contains("option_correct") =>
                {
                    options.push(OptionColumns {
                        text: cursor,
                        tip: cursor + 1,
                        correct: cursor + 2,
                    });
                }
                _ => return Err(IncompleteHeader(headers[cursor].clone())),
            }
            cursor += 3;
        }

        groups.push(BlockColumns {
            type_column: index,
            content_column,
            options,
        });
    }

    Ok(groups)
}
