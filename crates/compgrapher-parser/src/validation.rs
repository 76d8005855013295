use std::fmt;

use serde::Serialize;

use crate::model::{CompensationValue, Dataset};

/// Advisory data-quality finding. Never blocks further use of the data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataWarning {
    EmptyPosition {
        position: String,
    },
    NegativeValue {
        position: String,
        employer: String,
        value: f64,
    },
    InvertedRange {
        position: String,
        employer: String,
        low: f64,
        high: f64,
    },
    NonFiniteValue {
        position: String,
        employer: String,
    },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::EmptyPosition { position } => {
                write!(f, "Position '{position}' has no compensation data")
            }
            DataWarning::NegativeValue {
                position,
                employer,
                value,
            } => write!(
                f,
                "Negative compensation value {value} for '{position}' at {employer}"
            ),
            DataWarning::InvertedRange {
                position,
                employer,
                low,
                high,
            } => write!(
                f,
                "Low value {low} exceeds high value {high} for '{position}' at {employer}"
            ),
            DataWarning::NonFiniteValue { position, employer } => {
                write!(f, "Non-finite compensation value for '{position}' at {employer}")
            }
        }
    }
}

pub fn collect_warnings(dataset: &Dataset) -> Vec<DataWarning> {
    let mut warnings = Vec::new();

    for record in dataset.positions() {
        if record.is_empty() {
            warnings.push(DataWarning::EmptyPosition {
                position: record.title.clone(),
            });
            continue;
        }

        for entry in &record.values {
            let bounds = entry.value.bounds();

            if bounds.iter().any(|bound| !bound.is_finite()) {
                warnings.push(DataWarning::NonFiniteValue {
                    position: record.title.clone(),
                    employer: entry.employer.clone(),
                });
                continue;
            }

            if let Some(negative) = bounds.iter().copied().find(|bound| *bound < 0.0) {
                warnings.push(DataWarning::NegativeValue {
                    position: record.title.clone(),
                    employer: entry.employer.clone(),
                    value: negative,
                });
            }

            if let CompensationValue::Range { low, high } = entry.value {
                if low > high {
                    warnings.push(DataWarning::InvertedRange {
                        position: record.title.clone(),
                        employer: entry.employer.clone(),
                        low,
                        high,
                    });
                }
            }
        }
    }

    warnings
}

/// Human-readable warnings in dataset order.
pub fn validate_data(dataset: &Dataset) -> Vec<String> {
    collect_warnings(dataset)
        .iter()
        .map(ToString::to_string)
        .collect()
}
