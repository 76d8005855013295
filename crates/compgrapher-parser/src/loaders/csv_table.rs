use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use csv::ReaderBuilder;
use polars::prelude::DataFrame;

use crate::config::ParserConfig;
use crate::errors::ParserError;

use super::frame::clean_cell;
use super::{build_text_frame, SourceFormat, TableLoader};

pub struct CsvTableLoader;

impl Default for CsvTableLoader {
    fn default() -> Self {
        Self
    }
}

impl CsvTableLoader {
    const NAME: &'static str = "CSV";

    fn csv_error(source: csv::Error) -> ParserError {
        ParserError::Csv {
            loader: Self::NAME,
            source,
        }
    }
}

impl TableLoader for CsvTableLoader {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn supports(&self, format: SourceFormat) -> bool {
        matches!(format, SourceFormat::Csv)
    }

    fn load(&self, path: &Path, _config: &ParserConfig) -> Result<DataFrame, ParserError> {
        let file = File::open(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ParserError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ParserError::Io {
                loader: Self::NAME,
                path: path.to_path_buf(),
                source: err,
            },
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(Self::csv_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(Self::csv_error)?;
            rows.push(record.iter().map(clean_cell).collect::<Vec<_>>());
        }

        tracing::debug!(
            loader = Self::NAME,
            columns = headers.len(),
            rows = rows.len(),
            "read CSV table"
        );

        build_text_frame(Self::NAME, &headers, &rows)
    }
}
