use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::DataFrame;

use crate::config::ParserConfig;
use crate::errors::ParserError;

use super::frame::clean_cell;
use super::{build_text_frame, SourceFormat, TableLoader};

/// XLS, XLSX and ODS workbooks. Reads the configured sheet, or the first one.
pub struct SpreadsheetLoader;

impl Default for SpreadsheetLoader {
    fn default() -> Self {
        Self
    }
}

impl SpreadsheetLoader {
    const NAME: &'static str = "SPREADSHEET";

    fn error(message: impl Into<String>) -> ParserError {
        ParserError::Spreadsheet {
            loader: Self::NAME,
            message: message.into(),
        }
    }

    fn cell_text(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            Data::String(text) => clean_cell(text),
            Data::Float(value) => Some(value.to_string()),
            Data::Int(value) => Some(value.to_string()),
            Data::Bool(value) => Some(value.to_string()),
            other => clean_cell(&other.to_string()),
        }
    }
}

impl TableLoader for SpreadsheetLoader {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supports(&self, format: SourceFormat) -> bool {
        format.is_spreadsheet()
    }

    fn load(&self, path: &Path, config: &ParserConfig) -> Result<DataFrame, ParserError> {
        let mut workbook = open_workbook_auto(path)
            .map_err(|err| Self::error(format!("failed to open {}: {err}", path.display())))?;

        let sheet_names = workbook.sheet_names();
        let sheet = match config.sheet.as_deref() {
            Some(wanted) => sheet_names
                .iter()
                .find(|name| name.as_str() == wanted)
                .cloned()
                .ok_or_else(|| {
                    Self::error(format!(
                        "sheet '{wanted}' not found; available sheets: {}",
                        sheet_names.join(", ")
                    ))
                })?,
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| Self::error("workbook contains no worksheets"))?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|err| Self::error(format!("failed to read sheet '{sheet}': {err}")))?;

        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| Self::cell_text(cell).unwrap_or_default())
                .collect(),
            None => Vec::new(),
        };
        let rows: Vec<Vec<Option<String>>> = rows
            .map(|row| row.iter().map(Self::cell_text).collect())
            .collect();

        tracing::debug!(
            loader = Self::NAME,
            sheet = %sheet,
            columns = headers.len(),
            rows = rows.len(),
            "read worksheet"
        );

        build_text_frame(Self::NAME, &headers, &rows)
    }
}
