//! Row validation
//!
//! Rows are checked in file order and each row stops at its first failure.
//! A batch only validates when every row does.

use std::collections::HashSet;

use super::{
    catalog::ImportCatalog,
    layout::{block_groups, BlockColumns, IncompleteHeader},
    probe::MediaProbe,
    sheet::{Sheet, SheetRow},
    AssignmentImport, BlockImport,
};
use crate::{
    constants::bulk_import::{
        IMAGE_CONTENT_TYPES, MANDATORY_FIELDS, OPTION_CORRECT_VALUE, VIDEO_CONTENT_TYPES,
    },
    error::{AppError, AppResult},
    models::{BlockKind, OptionFields},
};

/// Message shown for a failing row
pub fn row_error(row: usize, detail: &str) -> String {
    format!("Row {row} has an error. {detail} Please check your csv file.")
}

/// Validate every row of `sheet` and return the typed rows
pub async fn validate(
    sheet: &Sheet,
    catalog: &dyn ImportCatalog,
    probe: &dyn MediaProbe,
) -> AppResult<Vec<AssignmentImport>> {
    if sheet.rows().is_empty() {
        return Err(AppError::Validation(
            "The csv file contains no assignments".to_string(),
        ));
    }

    let groups = block_groups(sheet.headers());
    let mut seen = HashSet::new();
    let mut imports = Vec::with_capacity(sheet.rows().len());

    for row in sheet.rows() {
        let validator = RowValidator {
            sheet,
            row,
            catalog,
            probe,
        };
        let import = validator.validate(&groups, &seen).await?;
        seen.insert(import.name.clone());
        imports.push(import);
    }

    Ok(imports)
}

struct RowValidator<'a> {
    sheet: &'a Sheet,
    row: &'a SheetRow,
    catalog: &'a dyn ImportCatalog,
    probe: &'a dyn MediaProbe,
}

impl RowValidator<'_> {
    async fn validate(
        &self,
        groups: &Result<Vec<BlockColumns>, IncompleteHeader>,
        seen: &HashSet<String>,
    ) -> AppResult<AssignmentImport> {
        for field in MANDATORY_FIELDS {
            if self.field(field).is_empty() {
                return Err(self.invalid(&format!("Missing {field} field.")));
            }
        }

        let name = self.field("name");
        if seen.contains(name) || self.catalog.assignment_exists(name).await? {
            return Err(self.invalid(&format!("Assignment {name} already exists.")));
        }

        let tile_image = self.field("tile_image");
        self.check_link(tile_image, "tile_image", BlockKind::Image).await?;

        let category = self.field("category");
        let category_id = self
            .catalog
            .category_id(category)
            .await?
            .ok_or_else(|| self.invalid(&format!("Category {category} does not exist.")))?;

        let target = self.field("target");
        let target_id = self
            .catalog
            .target_id(target)
            .await?
            .ok_or_else(|| self.invalid(&format!("Assignment target {target} does not exist.")))?;

        let points = self.whole_number("points")?;
        let priority = self.whole_number("priority")?;
        let time = match self.field("time") {
            "" => None,
            _ => Some(self.whole_number("time")?),
        };

        let dependent_on = match self.field("dependent_on") {
            "" => None,
            dependency if dependency == name => {
                return Err(self.invalid("Assignment cannot be dependent on itself."));
            }
            dependency => Some(dependency.to_string()),
        };

        let groups = groups
            .as_ref()
            .map_err(|IncompleteHeader(header)| {
                self.invalid(&format!("Block header {header} is incomplete."))
            })?;

        let mut blocks = Vec::new();
        for group in groups {
            if let Some(block) = self.block(group).await? {
                blocks.push(block);
            }
        }

        Ok(AssignmentImport {
            row: self.row.number,
            name: name.to_string(),
            description: self.field("description").to_string(),
            tile_image: tile_image.to_string(),
            points,
            priority,
            time,
            category_id,
            target_id,
            dependent_on,
            blocks,
        })
    }

    /// One block group; `None` when this row leaves the group empty
    async fn block(&self, group: &BlockColumns) -> AppResult<Option<BlockImport>> {
        let block_type = self.row.cell(group.type_column);
        if block_type.is_empty() {
            return Ok(None);
        }

        let kind = BlockKind::from_str(block_type).ok_or_else(|| {
            self.invalid(&format!(
                "Block type {block_type} in {} is not supported.",
                self.header(group.type_column)
            ))
        })?;

        let content = self.row.cell(group.content_column);
        let content_header = self.header(group.content_column);

        let block = match kind {
            BlockKind::Text => BlockImport::Text(content.to_string()),
            BlockKind::Image => {
                self.check_link(content, content_header, BlockKind::Image).await?;
                BlockImport::Image(content.to_string())
            }
            BlockKind::Video => {
                self.check_link(content, content_header, BlockKind::Video).await?;
                BlockImport::Video(content.to_string())
            }
            BlockKind::Question => {
                let marked_correct = group
                    .options
                    .iter()
                    .filter(|o| is_correct(self.row.cell(o.correct)))
                    .count();
                if marked_correct > 1 {
                    return Err(self.invalid("More than one option is correct."));
                }

                let options = group
                    .options
                    .iter()
                    .filter(|o| !self.row.cell(o.text).is_empty())
                    .map(|o| OptionFields {
                        text: self.row.cell(o.text).to_string(),
                        tip: self.row.cell(o.tip).to_string(),
                        is_correct: is_correct(self.row.cell(o.correct)),
                    })
                    .collect();

                BlockImport::Question {
                    text: content.to_string(),
                    options,
                }
            }
        };

        Ok(Some(block))
    }

    /// The URL must answer HEAD with a content type accepted for `kind`
    async fn check_link(&self, url: &str, header: &str, kind: BlockKind) -> AppResult<()> {
        let (accepted, label) = match kind {
            BlockKind::Video => (VIDEO_CONTENT_TYPES, "Video"),
            _ => (IMAGE_CONTENT_TYPES, "Image"),
        };

        let content_type = if url.is_empty() {
            None
        } else {
            self.probe.content_type(url).await.ok().flatten()
        };

        match content_type {
            Some(ct) if accepted.contains(&ct.as_str()) => Ok(()),
            _ => Err(AppError::ExternalFetch(row_error(
                self.row.number,
                &format!("{label} link in {header} is not correct."),
            ))),
        }
    }

    fn whole_number(&self, field: &str) -> AppResult<i32> {
        let value = self.field(field);
        let digits = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
        digits
            .then(|| value.parse::<i32>().ok())
            .flatten()
            .ok_or_else(|| self.invalid(&format!("Field {field} must be whole number.")))
    }

    fn field(&self, name: &str) -> &str {
        self.sheet
            .column(name)
            .map(|index| self.row.cell(index))
            .unwrap_or("")
    }

    fn header(&self, index: usize) -> &str {
        self.sheet.headers().get(index).map(String::as_str).unwrap_or("")
    }

    fn invalid(&self, detail: &str) -> AppError {
        AppError::Validation(row_error(self.row.number, detail))
    }
}

fn is_correct(cell: &str) -> bool {
    cell.eq_ignore_ascii_case(OPTION_CORRECT_VALUE)
}
