use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("input file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error(
        "Unsupported file format '{extension}' for {}; expected one of csv, xls, xlsx, ods",
        path.display()
    )]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("{loader} failed to read {}: {source}", path.display())]
    Io {
        loader: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{loader} CSV error: {source}")]
    Csv {
        loader: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{loader} spreadsheet error: {message}")]
    Spreadsheet {
        loader: &'static str,
        message: String,
    },

    #[error("failed to build table frame: {0}")]
    Frame(#[from] PolarsError),

    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl ParserError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ParserError::FileNotFound { .. })
    }

    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ParserError::UnsupportedFormat { .. })
    }
}
