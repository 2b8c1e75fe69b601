//! Playbook models
//!
//! Frozen copies of assignment trees written when a user completes an
//! assignment. Rows are never updated after insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Completed assignment snapshot
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlaybookAssignment {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub points: i32,
    pub time: Option<i32>,
    pub category_id: Uuid,
    pub priority: i32,
    pub dependent_on_id: Option<Uuid>,
    pub completed: DateTime<Utc>,
}

/// Snapshot of an assignment block
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlaybookBlock {
    pub id: Uuid,
    pub playbook_assignment_id: Uuid,
    pub position: i32,
    pub kind: String,
    pub name: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub question: Option<String>,
}

/// Snapshot of a question option
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlaybookOption {
    pub id: Uuid,
    pub playbook_block_id: Uuid,
    pub position: i32,
    pub text: String,
    pub tip: String,
    pub is_correct: bool,
}

/// Playbook block with its options
#[derive(Debug, Clone, Serialize)]
pub struct PlaybookBlockNode {
    #[serde(flatten)]
    pub block: PlaybookBlock,
    pub options: Vec<PlaybookOption>,
}

/// Completed assignment with its frozen block tree
#[derive(Debug, Clone, Serialize)]
pub struct PlaybookTree {
    #[serde(flatten)]
    pub assignment: PlaybookAssignment,
    pub blocks: Vec<PlaybookBlockNode>,
}

impl PlaybookTree {
    /// Group flat block and option reads under their playbook assignments,
    /// keeping the order of `assignments`, `blocks` and `options`
    pub fn assemble_all(
        assignments: Vec<PlaybookAssignment>,
        blocks: Vec<PlaybookBlock>,
        options: Vec<PlaybookOption>,
    ) -> Vec<Self> {
        let mut trees: Vec<Self> = assignments
            .into_iter()
            .map(|assignment| Self {
                assignment,
                blocks: Vec::new(),
            })
            .collect();

        for block in blocks {
            if let Some(tree) = trees
                .iter_mut()
                .find(|t| t.assignment.id == block.playbook_assignment_id)
            {
                tree.blocks.push(PlaybookBlockNode {
                    block,
                    options: Vec::new(),
                });
            }
        }

        for option in options {
            let node = trees
                .iter_mut()
                .flat_map(|t| t.blocks.iter_mut())
                .find(|n| n.block.id == option.playbook_block_id);
            if let Some(node) = node {
                node.options.push(option);
            }
        }

        trees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> PlaybookAssignment {
        PlaybookAssignment {
            id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            name: name.to_string(),
            description: None,
            image: None,
            points: 10,
            time: None,
            category_id: Uuid::new_v4(),
            priority: 0,
            dependent_on_id: None,
            completed: Utc::now(),
        }
    }

    fn block(playbook_assignment_id: Uuid, position: i32) -> PlaybookBlock {
        PlaybookBlock {
            id: Uuid::new_v4(),
            playbook_assignment_id,
            position,
            kind: "Question".to_string(),
            name: None,
            text: None,
            image: None,
            video: None,
            question: Some("Why?".to_string()),
        }
    }

    #[test]
    fn test_assemble_all_groups_by_owner() {
        let newest = entry("Second");
        let oldest = entry("First");
        let b1 = block(oldest.id, 0);
        let b2 = block(newest.id, 0);
        let option = PlaybookOption {
            id: Uuid::new_v4(),
            playbook_block_id: b2.id,
            position: 0,
            text: "Because".to_string(),
            tip: String::new(),
            is_correct: true,
        };

        let trees = PlaybookTree::assemble_all(
            vec![newest.clone(), oldest.clone()],
            vec![b1, b2],
            vec![option],
        );

        assert_eq!(trees[0].assignment.name, "Second");
        assert_eq!(trees[0].blocks.len(), 1);
        assert_eq!(trees[0].blocks[0].options.len(), 1);
        assert_eq!(trees[1].blocks[0].options.len(), 0);
    }
}
