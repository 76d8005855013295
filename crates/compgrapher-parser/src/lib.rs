pub mod analysis;
pub mod clean;
pub mod config;
pub mod errors;
pub mod loaders;
pub mod model;
mod parse;
mod parser;
pub mod validation;
mod value;

pub use clean::CleanTable;
pub use config::{AnalysisConfig, Config, MatchKind, MetadataColumnRule, ParserConfig};
pub use errors::ParserError;
pub use loaders::{load_table, SourceFormat, TableLoader};
pub use model::{format_currency, CompensationValue, Dataset, EmployerValue, PositionRecord};
pub use parse::{combine_cells, parse_clean_table};
pub use parser::CompensationDataParser;
pub use validation::{collect_warnings, validate_data, DataWarning};
pub use value::parse_compensation_value;
