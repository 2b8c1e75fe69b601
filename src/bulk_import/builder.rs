//! Building a validated batch
//!
//! Media is downloaded and stored first, outside any transaction. The
//! assignments, blocks and options are then written in a single
//! transaction; if it fails, the stored media of the batch is removed.

use sqlx::PgPool;
use tracing::{info, warn};

use super::{probe::MediaProbe, AssignmentImport, BlockImport};
use crate::{
    db::repositories::{AssignmentRepository, BlockRepository},
    engine::Trigger,
    error::AppResult,
    models::{Assignment, AssignmentFields, BlockContent, BlockOrigin, OptionFields},
    services::ReassignmentService,
    storage::{MediaKind, MediaStorage},
};

/// Outcome of a committed batch
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub assignments: Vec<Assignment>,
    pub blocks: usize,
    pub options: usize,
    pub media_files: usize,
}

/// Row with its media replaced by stored paths
#[derive(Debug, Clone)]
struct StagedAssignment {
    fields: AssignmentFields,
    dependent_on: Option<String>,
    blocks: Vec<StagedBlock>,
}

#[derive(Debug, Clone)]
struct StagedBlock {
    content: BlockContent,
    options: Vec<OptionFields>,
}

/// Build a validated batch, all or nothing
pub async fn build(
    pool: &PgPool,
    storage: &MediaStorage,
    probe: &dyn MediaProbe,
    imports: Vec<AssignmentImport>,
) -> AppResult<ImportReport> {
    let mut stored = Vec::new();
    let staged = match stage(storage, probe, imports, &mut stored).await {
        Ok(staged) => staged,
        Err(e) => {
            discard(storage, &stored).await;
            return Err(e);
        }
    };

    match persist(pool, staged).await {
        Ok(mut report) => {
            report.media_files = stored.len();
            info!(
                assignments = report.assignments.len(),
                blocks = report.blocks,
                options = report.options,
                media_files = report.media_files,
                "Bulk import committed"
            );
            Ok(report)
        }
        Err(e) => {
            discard(storage, &stored).await;
            Err(e)
        }
    }
}

/// Download and store every media URL of the batch.
///
/// Paths are pushed to `stored` as they are written so the caller can clean
/// up after a partial failure.
async fn stage(
    storage: &MediaStorage,
    probe: &dyn MediaProbe,
    imports: Vec<AssignmentImport>,
    stored: &mut Vec<String>,
) -> AppResult<Vec<StagedAssignment>> {
    let mut staged = Vec::with_capacity(imports.len());

    for import in imports {
        let tile_image = fetch(storage, probe, MediaKind::Image, &import.tile_image, stored).await?;

        let mut blocks = Vec::with_capacity(import.blocks.len());
        for block in import.blocks {
            let block = match block {
                BlockImport::Text(text) => StagedBlock {
                    content: BlockContent::Text(text),
                    options: Vec::new(),
                },
                BlockImport::Image(url) => StagedBlock {
                    content: BlockContent::Image(
                        fetch(storage, probe, MediaKind::Image, &url, stored).await?,
                    ),
                    options: Vec::new(),
                },
                BlockImport::Video(url) => StagedBlock {
                    content: BlockContent::Video(
                        fetch(storage, probe, MediaKind::Video, &url, stored).await?,
                    ),
                    options: Vec::new(),
                },
                BlockImport::Question { text, options } => StagedBlock {
                    content: BlockContent::Question(text),
                    options,
                },
            };
            blocks.push(block);
        }

        staged.push(StagedAssignment {
            fields: AssignmentFields {
                name: import.name,
                description: Some(import.description),
                image: Some(tile_image),
                points: import.points,
                time: import.time,
                category_id: import.category_id,
                target_id: Some(import.target_id),
                priority: import.priority,
                dependent_on_id: None,
            },
            dependent_on: import.dependent_on,
            blocks,
        });
    }

    Ok(staged)
}

async fn fetch(
    storage: &MediaStorage,
    probe: &dyn MediaProbe,
    kind: MediaKind,
    url: &str,
    stored: &mut Vec<String>,
) -> AppResult<String> {
    let download = probe.download(url).await?;
    let name = remote_file_name(url, download.content_type.as_deref());
    let path = storage.save(kind, &name, &download.bytes).await?;
    stored.push(path.clone());
    Ok(path)
}

async fn persist(pool: &PgPool, staged: Vec<StagedAssignment>) -> AppResult<ImportReport> {
    let mut tx = pool.begin().await?;
    let mut report = ImportReport {
        assignments: Vec::with_capacity(staged.len()),
        blocks: 0,
        options: 0,
        media_files: 0,
    };

    for StagedAssignment {
        mut fields,
        dependent_on,
        blocks,
    } in staged
    {
        if let Some(dependency) = dependent_on {
            fields.dependent_on_id = AssignmentRepository::find_by_name(&mut *tx, &dependency)
                .await?
                .map(|a| a.id);
            if fields.dependent_on_id.is_none() {
                warn!(
                    assignment = %fields.name,
                    dependency = %dependency,
                    "Dependency not found, importing without it"
                );
            }
        }

        let assignment = AssignmentRepository::create(&mut *tx, &fields).await?;

        for StagedBlock { content, options } in blocks {
            let block = BlockRepository::create(
                &mut *tx,
                &assignment.id,
                content.kind(),
                BlockOrigin::BulkImport,
                None,
                Some(&content),
            )
            .await?;
            report.blocks += 1;

            for option in &options {
                BlockRepository::create_option(&mut *tx, &block.id, option).await?;
                report.options += 1;
            }
        }

        ReassignmentService::reevaluate(&mut tx, Trigger::AssignmentSaved(assignment.id)).await?;
        report.assignments.push(assignment);
    }

    tx.commit().await?;
    Ok(report)
}

async fn discard(storage: &MediaStorage, stored: &[String]) {
    for path in stored {
        if let Err(e) = storage.remove(path).await {
            warn!(path = %path, error = %e, "Failed to remove imported media");
        }
    }
}

/// File name for downloaded media: the URL's last path segment when it
/// carries an extension, otherwise one derived from the content type
fn remote_file_name(url: &str, content_type: Option<&str>) -> String {
    let segment = reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.path_segments()?.last().map(str::to_string))
        .unwrap_or_default();

    if segment.contains('.') && !segment.ends_with('.') {
        return segment;
    }

    let extension = content_type
        .and_then(|ct| ct.split('/').nth(1))
        .map(|subtype| subtype.split('+').next().unwrap_or(subtype))
        .filter(|ext| !ext.is_empty())
        .unwrap_or("bin");

    format!("media.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk_import::probe::{Download, MockMediaProbe};
    use crate::error::AppError;
    use uuid::Uuid;

    #[test]
    fn test_remote_file_name() {
        assert_eq!(
            remote_file_name("https://cdn.test/img/tile.png?v=2", Some("image/png")),
            "tile.png"
        );
        assert_eq!(
            remote_file_name("https://cdn.test/render", Some("image/svg+xml")),
            "media.svg"
        );
        assert_eq!(remote_file_name("https://cdn.test/", None), "media.bin");
    }

    fn import(blocks: Vec<BlockImport>) -> AssignmentImport {
        AssignmentImport {
            row: 1,
            name: "Intro".to_string(),
            description: "Say hi".to_string(),
            tile_image: "https://cdn.test/tile.png".to_string(),
            points: 10,
            priority: 1,
            time: None,
            category_id: Uuid::new_v4(),
            target_id: Uuid::new_v4(),
            dependent_on: Some("Basics".to_string()),
            blocks,
        }
    }

    #[tokio::test]
    async fn test_stage_stores_media_and_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let mut probe = MockMediaProbe::new();
        probe.expect_download().times(3).returning(|url| {
            Ok(Download {
                bytes: url.as_bytes().to_vec(),
                content_type: None,
            })
        });

        let blocks = vec![
            BlockImport::Text("Welcome".to_string()),
            BlockImport::Image("https://cdn.test/a.png".to_string()),
            BlockImport::Video("https://cdn.test/b.mp4".to_string()),
            BlockImport::Question {
                text: "Ready?".to_string(),
                options: vec![OptionFields {
                    text: "Yes".to_string(),
                    tip: String::new(),
                    is_correct: true,
                }],
            },
        ];

        let mut stored = Vec::new();
        let staged = stage(&storage, &probe, vec![import(blocks)], &mut stored)
            .await
            .unwrap();

        assert_eq!(stored.len(), 3);
        let staged = &staged[0];
        assert_eq!(staged.fields.image.as_deref(), Some(stored[0].as_str()));
        assert_eq!(staged.dependent_on.as_deref(), Some("Basics"));
        assert_eq!(staged.fields.dependent_on_id, None);

        let kinds: Vec<_> = staged.blocks.iter().map(|b| b.content.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                crate::models::BlockKind::Text,
                crate::models::BlockKind::Image,
                crate::models::BlockKind::Video,
                crate::models::BlockKind::Question,
            ]
        );
        assert_eq!(staged.blocks[2].content, BlockContent::Video(stored[2].clone()));
        assert!(stored[2].starts_with("assignments/videos/"));
        assert_eq!(staged.blocks[3].options.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_download_leaves_earlier_paths_for_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let storage = MediaStorage::new(dir.path());

        let mut probe = MockMediaProbe::new();
        probe.expect_download().returning(|url| {
            if url.ends_with("tile.png") {
                Ok(Download {
                    bytes: b"tile".to_vec(),
                    content_type: Some("image/png".to_string()),
                })
            } else {
                Err(AppError::ExternalFetch(format!("GET {url} failed")))
            }
        });

        let blocks = vec![BlockImport::Image("https://cdn.test/gone.png".to_string())];
        let mut stored = Vec::new();
        let err = stage(&storage, &probe, vec![import(blocks)], &mut stored)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ExternalFetch(_)));
        assert_eq!(stored.len(), 1);

        discard(&storage, &stored).await;
        assert!(!storage.resolve(&stored[0]).unwrap().exists());
    }
}
