//! Assignment model

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::block::{AssignmentBlock, BlockOption};

/// Assignment database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub points: i32,
    /// Time in seconds
    pub time: Option<i32>,
    pub category_id: Uuid,
    pub target_id: Option<Uuid>,
    pub priority: i32,
    pub dependent_on_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable fields of an assignment
#[derive(Debug, Clone)]
pub struct AssignmentFields {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub points: i32,
    pub time: Option<i32>,
    pub category_id: Uuid,
    pub target_id: Option<Uuid>,
    pub priority: i32,
    pub dependent_on_id: Option<Uuid>,
}

/// A question or content block together with its options
#[derive(Debug, Clone, Serialize)]
pub struct BlockNode {
    #[serde(flatten)]
    pub block: AssignmentBlock,
    pub options: Vec<BlockOption>,
}

/// An assignment with its full, ordered block tree
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentTree {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub blocks: Vec<BlockNode>,
}

impl AssignmentTree {
    /// Assemble a tree from flat block and option reads.
    ///
    /// Blocks keep the order they are given in; options are attached to
    /// their block in the order they are given in.
    pub fn assemble(
        assignment: Assignment,
        blocks: Vec<AssignmentBlock>,
        options: Vec<BlockOption>,
    ) -> Self {
        let mut nodes: Vec<BlockNode> = blocks
            .into_iter()
            .map(|block| BlockNode {
                block,
                options: Vec::new(),
            })
            .collect();

        for option in options {
            if let Some(node) = nodes.iter_mut().find(|n| n.block.id == option.block_id) {
                node.options.push(option);
            }
        }

        Self {
            assignment,
            blocks: nodes,
        }
    }

    /// Assemble trees for several assignments, keeping the order of
    /// `assignments`
    pub fn assemble_all(
        assignments: Vec<Assignment>,
        blocks: Vec<AssignmentBlock>,
        options: Vec<BlockOption>,
    ) -> Vec<Self> {
        let mut blocks_by_owner: HashMap<Uuid, Vec<AssignmentBlock>> = HashMap::new();
        for block in blocks {
            blocks_by_owner.entry(block.assignment_id).or_default().push(block);
        }

        let mut options_by_block: HashMap<Uuid, Vec<BlockOption>> = HashMap::new();
        for option in options {
            options_by_block.entry(option.block_id).or_default().push(option);
        }

        assignments
            .into_iter()
            .map(|assignment| {
                let blocks = blocks_by_owner.remove(&assignment.id).unwrap_or_default();
                let options = blocks
                    .iter()
                    .flat_map(|b| options_by_block.remove(&b.id).unwrap_or_default())
                    .collect();
                Self::assemble(assignment, blocks, options)
            })
            .collect()
    }
}
