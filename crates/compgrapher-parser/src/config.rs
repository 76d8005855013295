use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ParserError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    #[default]
    Exact,
    Prefix,
}

/// A header label that marks a summary column rather than an employer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataColumnRule {
    pub label: String,
    #[serde(rename = "match", default)]
    pub kind: MatchKind,
}

impl MetadataColumnRule {
    pub fn exact(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: MatchKind::Exact,
        }
    }

    pub fn prefix(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: MatchKind::Prefix,
        }
    }

    /// Case-insensitive comparison against the trimmed header. Prefix labels keep
    /// trailing whitespace, so `"Comp "` does not match `"Compton"`.
    pub fn matches(&self, header: &str) -> bool {
        let header = header.trim().to_lowercase();
        let label = self.label.to_lowercase();
        match self.kind {
            MatchKind::Exact => header == label.trim(),
            MatchKind::Prefix => header.starts_with(label.trim_start()),
        }
    }
}

pub fn default_metadata_columns() -> Vec<MetadataColumnRule> {
    vec![
        MetadataColumnRule::exact("ERI"),
        MetadataColumnRule::exact("Comp Average"),
        MetadataColumnRule::exact("Comp Data Points"),
        MetadataColumnRule::exact("60th Percentile"),
        MetadataColumnRule::prefix("Comp "),
        MetadataColumnRule::prefix("Unnamed:"),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub metadata_columns: Vec<MetadataColumnRule>,
    /// Treat an untitled row directly below a titled row as the low end of its ranges.
    pub pair_floor_rows: bool,
    /// Worksheet to read from spreadsheet inputs; the first sheet when unset.
    pub sheet: Option<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            metadata_columns: default_metadata_columns(),
            pair_floor_rows: true,
            sheet: None,
        }
    }
}

impl ParserConfig {
    pub fn is_metadata_column(&self, header: &str) -> bool {
        self.metadata_columns.iter().any(|rule| rule.matches(header))
    }

    pub fn validate(&self) -> Result<(), ParserError> {
        if let Some(rule) = self
            .metadata_columns
            .iter()
            .find(|rule| rule.label.trim().is_empty())
        {
            return Err(ParserError::Config {
                message: format!("metadata column rule with empty label ({:?})", rule.kind),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub excluded_positions: Vec<String>,
    pub drop_highest_paid: usize,
    pub min_employers: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            excluded_positions: Vec::new(),
            drop_highest_paid: 2,
            min_employers: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parser: ParserConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ParserError> {
        let config: Config = toml::from_str(content).map_err(|err| ParserError::Config {
            message: err.to_string(),
        })?;
        config.parser.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ParserError> {
        let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => ParserError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ParserError::Io {
                loader: "config",
                path: path.to_path_buf(),
                source: err,
            },
        })?;
        Self::from_toml_str(&content)
    }
}
