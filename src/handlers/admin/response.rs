//! Admin response DTOs

use serde::Serialize;
use uuid::Uuid;

use crate::bulk_import::ImportReport;

/// Assignment created by a bulk upload
#[derive(Debug, Serialize)]
pub struct ImportedAssignment {
    pub id: Uuid,
    pub name: String,
}

/// Bulk upload summary
#[derive(Debug, Serialize)]
pub struct BulkUploadResponse {
    pub message: String,
    pub assignments: Vec<ImportedAssignment>,
    pub blocks: usize,
    pub options: usize,
    pub media_files: usize,
}

impl From<ImportReport> for BulkUploadResponse {
    fn from(report: ImportReport) -> Self {
        Self {
            message: format!("Imported {} assignments", report.assignments.len()),
            assignments: report
                .assignments
                .into_iter()
                .map(|a| ImportedAssignment { id: a.id, name: a.name })
                .collect(),
            blocks: report.blocks,
            options: report.options,
            media_files: report.media_files,
        }
    }
}

/// Stored media upload
#[derive(Debug, Serialize)]
pub struct MediaUploadResponse {
    /// Path relative to the media root; store this in blocks and tile images
    pub path: String,
    pub url: String,
}
