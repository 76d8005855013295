use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::clean::{clean_table, CleanTable};
use crate::config::ParserConfig;
use crate::errors::ParserError;
use crate::loaders::{load_table, SourceFormat};
use crate::model::Dataset;
use crate::parse::parse_clean_table;
use crate::validation;

/// Loads, cleans, parses and validates one compensation survey file.
#[derive(Debug, Clone)]
pub struct CompensationDataParser {
    path: PathBuf,
    format: SourceFormat,
    config: ParserConfig,
}

impl CompensationDataParser {
    pub const SUPPORTED_FORMATS: [SourceFormat; 4] = SourceFormat::ALL;

    pub fn new(path: impl AsRef<Path>) -> Result<Self, ParserError> {
        Self::with_config(path, ParserConfig::default())
    }

    /// Fails with `FileNotFound` before checking the extension.
    pub fn with_config(path: impl AsRef<Path>, config: ParserConfig) -> Result<Self, ParserError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ParserError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = SourceFormat::from_path(path)?;
        config.validate()?;

        Ok(Self {
            path: path.to_path_buf(),
            format,
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn load_data(&self) -> Result<DataFrame, ParserError> {
        load_table(&self.path, self.format, &self.config)
    }

    pub fn clean_data(&self, frame: &DataFrame) -> Result<CleanTable, ParserError> {
        clean_table(frame, &self.config)
    }

    pub fn parse_compensation_data(&self, table: &CleanTable) -> Result<Dataset, ParserError> {
        parse_clean_table(table)
    }

    pub fn validate_data(dataset: &Dataset) -> Vec<String> {
        validation::validate_data(dataset)
    }

    /// Load, clean and parse; warnings are empty unless `validate` is set.
    pub fn process(&self, validate: bool) -> Result<(Dataset, Vec<String>), ParserError> {
        let frame = self.load_data()?;
        let table = self.clean_data(&frame)?;
        let dataset = self.parse_compensation_data(&table)?;

        let warnings = if validate {
            Self::validate_data(&dataset)
        } else {
            Vec::new()
        };

        tracing::info!(
            path = %self.path.display(),
            format = %self.format,
            positions = dataset.len(),
            employers = dataset.employers().len(),
            dropped_columns = table.dropped_columns.len(),
            warnings = warnings.len(),
            "processed compensation survey"
        );

        Ok((dataset, warnings))
    }
}
