mod csv_table;
mod frame;
mod spreadsheet;

use std::fmt;
use std::path::Path;

use polars::prelude::DataFrame;
use serde::Serialize;

use crate::config::ParserConfig;
use crate::errors::ParserError;

pub use csv_table::CsvTableLoader;
pub use spreadsheet::SpreadsheetLoader;

pub(crate) use frame::{build_text_frame, frame_headers, text_column};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Csv,
    Xls,
    Xlsx,
    Ods,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::Csv,
        SourceFormat::Xls,
        SourceFormat::Xlsx,
        SourceFormat::Ods,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Xls => "xls",
            SourceFormat::Xlsx => "xlsx",
            SourceFormat::Ods => "ods",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        let lower = extension.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == lower)
    }

    pub fn from_path(path: &Path) -> Result<Self, ParserError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension).ok_or_else(|| ParserError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: format!(".{extension}"),
        })
    }

    pub fn is_spreadsheet(&self) -> bool {
        !matches!(self, SourceFormat::Csv)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// Reads one tabular file into a frame of nullable text columns.
pub trait TableLoader {
    fn name(&self) -> &'static str;
    fn supports(&self, format: SourceFormat) -> bool;
    fn load(&self, path: &Path, config: &ParserConfig) -> Result<DataFrame, ParserError>;
}

pub fn load_table(
    path: &Path,
    format: SourceFormat,
    config: &ParserConfig,
) -> Result<DataFrame, ParserError> {
    let csv = CsvTableLoader;
    let spreadsheet = SpreadsheetLoader;
    let loaders: [&dyn TableLoader; 2] = [&csv, &spreadsheet];
    load_with_loaders(path, format, config, &loaders)
}

pub fn load_with_loaders(
    path: &Path,
    format: SourceFormat,
    config: &ParserConfig,
    loaders: &[&dyn TableLoader],
) -> Result<DataFrame, ParserError> {
    if !path.exists() {
        return Err(ParserError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let loader = loaders
        .iter()
        .find(|loader| loader.supports(format))
        .ok_or_else(|| ParserError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: format.to_string(),
        })?;

    tracing::debug!(loader = loader.name(), path = %path.display(), "loading table");
    loader.load(path, config)
}
