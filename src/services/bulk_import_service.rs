//! Bulk import service

use sqlx::PgPool;
use tracing::info;

use crate::{
    bulk_import::{self, ImportReport, MediaProbe, PgImportCatalog, Sheet},
    error::AppResult,
    storage::MediaStorage,
};

/// Bulk import service
pub struct BulkImportService;

impl BulkImportService {
    /// Parse, validate and build a CSV upload.
    ///
    /// Nothing is written unless every row validates.
    pub async fn import(
        pool: &PgPool,
        storage: &MediaStorage,
        probe: &dyn MediaProbe,
        file_name: &str,
        bytes: &[u8],
    ) -> AppResult<ImportReport> {
        let sheet = Sheet::parse(bytes)?;
        info!(file = %file_name, rows = sheet.rows().len(), "Bulk import started");

        let catalog = PgImportCatalog::new(pool.clone());
        let imports = bulk_import::validate(&sheet, &catalog, probe).await?;

        bulk_import::build(pool, storage, probe, imports).await
    }
}
