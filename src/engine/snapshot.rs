//! Playbook snapshots
//!
//! Freezes an assignment tree into a draft that the playbook repository
//! writes in one batch. Content is copied as is; media stays referenced by
//! its stored path.

use uuid::Uuid;

use crate::models::{AssignmentTree, BlockNode};

/// Playbook assignment ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybookDraft {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub points: i32,
    pub time: Option<i32>,
    pub category_id: Uuid,
    pub priority: i32,
    /// Name of the source assignment's dependency, resolved against the
    /// user's playbook at write time
    pub dependency_name: Option<String>,
    pub blocks: Vec<PlaybookBlockDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybookBlockDraft {
    pub position: i32,
    pub kind: String,
    pub name: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub video: Option<String>,
    pub question: Option<String>,
    pub options: Vec<PlaybookOptionDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybookOptionDraft {
    pub position: i32,
    pub text: String,
    pub tip: String,
    pub is_correct: bool,
}

/// Deep-copy an assignment tree, keeping block and option order
pub fn snapshot(tree: &AssignmentTree, dependency_name: Option<String>) -> PlaybookDraft {
    let assignment = &tree.assignment;

    PlaybookDraft {
        name: assignment.name.clone(),
        description: assignment.description.clone(),
        image: assignment.image.clone(),
        points: assignment.points,
        time: assignment.time,
        category_id: assignment.category_id,
        priority: assignment.priority,
        dependency_name,
        blocks: tree.blocks.iter().map(copy_block).collect(),
    }
}

fn copy_block(node: &BlockNode) -> PlaybookBlockDraft {
    let block = &node.block;
    PlaybookBlockDraft {
        position: block.position,
        kind: block.kind.clone(),
        name: block.name.clone(),
        text: block.text.clone(),
        image: block.image.clone(),
        video: block.video.clone(),
        question: block.question.clone(),
        options: node
            .options
            .iter()
            .map(|o| PlaybookOptionDraft {
                position: o.position,
                text: o.text.clone(),
                tip: o.tip.clone(),
                is_correct: o.is_correct,
            })
            .collect(),
    }
}
