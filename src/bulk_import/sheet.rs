//! CSV sheet reading

use crate::error::{AppError, AppResult};

/// A parsed CSV upload: the header row and the data rows in file order
#[derive(Debug, Clone)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<SheetRow>,
}

/// One data row. `number` is 1-based and does not count the header row.
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub number: usize,
    cells: Vec<String>,
}

impl Sheet {
    /// Parse a CSV document with a header row.
    ///
    /// Rows may be shorter than the header; missing cells read as empty.
    pub fn parse(bytes: &[u8]) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| AppError::Validation(format!("Could not read csv header: {e}")))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                AppError::Validation(format!("Row {} could not be read: {e}", index + 1))
            })?;
            rows.push(SheetRow {
                number: index + 1,
                cells: record.iter().map(str::to_string).collect(),
            });
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[SheetRow] {
        &self.rows
    }

    /// Index of the column named exactly `name`
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

impl SheetRow {
    /// Cell at `index`, empty when the row is short
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_header_order_and_numbers_rows() {
        let csv = "name,points,block_type_1,block_1\nIntro,10,Text,Hello\nSecond,5\n";
        let sheet = Sheet::parse(csv.as_bytes()).unwrap();

        assert_eq!(sheet.headers(), ["name", "points", "block_type_1", "block_1"]);
        assert_eq!(sheet.column("points"), Some(1));
        assert_eq!(sheet.column("time"), None);

        let rows = sheet.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].cell(3), "Hello");
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[1].cell(2), "");
    }

    #[test]
    fn test_cells_are_trimmed() {
        let sheet = Sheet::parse(b"name , points\n  Intro  , 10 \n").unwrap();
        assert_eq!(sheet.column("name"), Some(0));
        assert_eq!(sheet.rows()[0].cell(0), "Intro");
        assert_eq!(sheet.rows()[0].cell(1), "10");
    }
}
