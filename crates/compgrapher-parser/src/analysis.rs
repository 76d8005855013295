use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::model::Dataset;

pub fn exclude_positions(dataset: &Dataset, excluded: &[String]) -> Dataset {
    if excluded.is_empty() {
        return dataset.clone();
    }
    let excluded: HashSet<&str> = excluded.iter().map(String::as_str).collect();
    dataset.filter_positions(|record| !excluded.contains(record.title.as_str()))
}

/// Removes the `count` positions with the highest mean amount. Positions without
/// data are not ranked. Nothing is removed when fewer than `count` are ranked.
pub fn drop_highest_paid(dataset: &Dataset, count: usize) -> Dataset {
    let mut averages: Vec<(&str, f64)> = dataset
        .positions()
        .iter()
        .filter_map(|record| {
            record
                .average_amount()
                .map(|avg| (record.title.as_str(), avg))
        })
        .collect();

    if count == 0 || averages.len() < count {
        return dataset.clone();
    }

    averages.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    let dropped: HashSet<String> = averages
        .iter()
        .take(count)
        .map(|(title, _)| title.to_string())
        .collect();

    tracing::debug!(positions = ?dropped, "dropped highest paid positions");
    dataset.filter_positions(|record| !dropped.contains(&record.title))
}

pub fn retain_min_employers(dataset: &Dataset, min_employers: usize) -> Dataset {
    dataset.filter_positions(|record| record.len() >= min_employers)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub position: String,
    /// One entry per dataset employer, in column order; `None` where no figure exists.
    pub amounts: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    pub position: String,
    pub employer: String,
    pub baseline_amount: f64,
    pub other_amount: f64,
    pub difference: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineComparison {
    pub baseline: String,
    pub employers: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    pub differences: Vec<Difference>,
    pub complete_positions: usize,
}

/// Compares every employer against the first one. `None` when the dataset has
/// no employers.
pub fn compare_to_baseline(dataset: &Dataset) -> Option<BaselineComparison> {
    let baseline = dataset.baseline_employer()?.to_string();
    let employers = dataset.employers().to_vec();

    let mut positions: Vec<(&str, f64)> = dataset
        .positions()
        .iter()
        .filter_map(|record| {
            record
                .get(&baseline)
                .map(|value| (record.title.as_str(), value.amount()))
        })
        .collect();
    positions.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let mut rows = Vec::with_capacity(positions.len());
    let mut differences = Vec::new();
    let mut complete_positions = 0;

    for (title, baseline_amount) in positions {
        let Some(record) = dataset.position(title) else {
            continue;
        };

        let amounts: Vec<Option<f64>> = employers
            .iter()
            .map(|employer| record.get(employer).map(|value| value.amount()))
            .collect();
        if amounts.iter().all(Option::is_some) {
            complete_positions += 1;
        }

        if baseline_amount > 0.0 {
            for (employer, amount) in employers.iter().zip(&amounts) {
                if *employer == baseline {
                    continue;
                }
                let Some(other_amount) = amount.filter(|value| *value > 0.0) else {
                    continue;
                };
                let difference = other_amount - baseline_amount;
                differences.push(Difference {
                    position: title.to_string(),
                    employer: employer.clone(),
                    baseline_amount,
                    other_amount,
                    difference,
                    percentage: difference / baseline_amount * 100.0,
                });
            }
        }

        rows.push(ComparisonRow {
            position: title.to_string(),
            amounts,
        });
    }

    Some(BaselineComparison {
        baseline,
        employers,
        rows,
        differences,
        complete_positions,
    })
}

/// Exclusions, highest-paid trimming and the employer minimum, then the comparison.
pub fn prepare_comparison(dataset: &Dataset, config: &AnalysisConfig) -> Option<BaselineComparison> {
    let filtered = exclude_positions(dataset, &config.excluded_positions);
    let filtered = drop_highest_paid(&filtered, config.drop_highest_paid);
    let filtered = retain_min_employers(&filtered, config.min_employers);
    tracing::debug!(
        before = dataset.len(),
        after = filtered.len(),
        "filtered positions for comparison"
    );
    compare_to_baseline(&filtered)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub position: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployerSeries {
    pub employer: String,
    pub points: Vec<SeriesPoint>,
}

/// One employer's figures after exclusions, minus the top `drop_highest_paid`
/// amounts, sorted ascending.
pub fn employer_series(dataset: &Dataset, employer: &str, config: &AnalysisConfig) -> EmployerSeries {
    let excluded: HashSet<&str> = config
        .excluded_positions
        .iter()
        .map(String::as_str)
        .collect();

    let mut points: Vec<SeriesPoint> = dataset
        .positions()
        .iter()
        .filter(|record| !excluded.contains(record.title.as_str()))
        .filter_map(|record| {
            record.get(employer).map(|value| SeriesPoint {
                position: record.title.clone(),
                amount: value.amount(),
            })
        })
        .collect();

    points.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    if points.len() > config.drop_highest_paid {
        points.drain(..config.drop_highest_paid);
    }
    points.sort_by(|a, b| a.amount.partial_cmp(&b.amount).unwrap_or(Ordering::Equal));

    EmployerSeries {
        employer: employer.to_string(),
        points,
    }
}

pub fn all_employer_series(dataset: &Dataset, config: &AnalysisConfig) -> Vec<EmployerSeries> {
    dataset
        .employers()
        .iter()
        .map(|employer| employer_series(dataset, employer, config))
        .collect()
}
