use std::path::Path;

use chrono::{DateTime, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use compgrapher_parser::analysis::{BaselineComparison, EmployerSeries};
use compgrapher_parser::{format_currency, Dataset};
use serde::Serialize;

const MISSING: &str = "-";

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table
}

pub fn dataset_table(dataset: &Dataset) -> Table {
    let mut table = new_table();
    let mut header = vec!["Position".to_string()];
    header.extend(dataset.employers().iter().cloned());
    table.set_header(header);

    for record in dataset.positions() {
        let mut row = vec![record.title.clone()];
        row.extend(dataset.employers().iter().map(|employer| {
            record
                .get(employer)
                .map(ToString::to_string)
                .unwrap_or_else(|| MISSING.to_string())
        }));
        table.add_row(row);
    }

    table
}

pub fn comparison_table(comparison: &BaselineComparison) -> Table {
    let mut table = new_table();
    let mut header = vec!["Position".to_string()];
    header.extend(comparison.employers.iter().cloned());
    table.set_header(header);

    for row in &comparison.rows {
        let mut cells = vec![row.position.clone()];
        cells.extend(row.amounts.iter().map(|amount| {
            amount
                .map(format_currency)
                .unwrap_or_else(|| MISSING.to_string())
        }));
        table.add_row(cells);
    }

    table
}

pub fn difference_table(comparison: &BaselineComparison) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "Position".to_string(),
        "Employer".to_string(),
        comparison.baseline.clone(),
        "Other Employer".to_string(),
        "Difference".to_string(),
        "% Diff".to_string(),
    ]);

    for diff in &comparison.differences {
        table.add_row(vec![
            diff.position.clone(),
            diff.employer.clone(),
            format_currency(diff.baseline_amount),
            format_currency(diff.other_amount),
            format_currency(diff.difference),
            format!("{:+.1}%", diff.percentage),
        ]);
    }

    table
}

pub fn series_table(series: &EmployerSeries) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Position".to_string(), series.employer.clone()]);
    for point in &series.points {
        table.add_row(vec![point.position.clone(), format_currency(point.amount)]);
    }
    table
}

pub fn warnings_block(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return "No data-quality warnings.".to_string();
    }
    let mut block = format!("{} data-quality warning(s):", warnings.len());
    for warning in warnings {
        block.push_str("\n  - ");
        block.push_str(warning);
    }
    block
}

/// JSON document written by `--json`.
#[derive(Debug, Serialize)]
pub struct Report<'a, T: Serialize> {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub report: &'a str,
    pub data: T,
}

impl<'a, T: Serialize> Report<'a, T> {
    pub fn new(source: &Path, report: &'a str, data: T) -> Self {
        Self {
            generated_at: Utc::now(),
            source: source.display().to_string(),
            report,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InspectData<'a> {
    pub dataset: &'a Dataset,
    pub warnings: &'a [String],
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use compgrapher_parser::analysis::compare_to_baseline;
    use compgrapher_parser::{CompensationValue, Dataset, PositionRecord};

    use super::*;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            PositionRecord::new("Clerk")
                .with_value("Dartmouth", CompensationValue::range(40_000.0, 50_000.0))
                .with_value("Fairhaven", CompensationValue::single(55_000.0)),
            PositionRecord::new("Planner")
                .with_value("Dartmouth", CompensationValue::single(1_234.5)),
        ])
    }

    #[test]
    fn dataset_table_marks_missing_cells() {
        let rendered = dataset_table(&sample()).to_string();
        assert!(rendered.contains("$40,000.00 - $50,000.00"));
        assert!(rendered.contains("$1,234.50"));
        assert!(rendered.contains(MISSING));
    }

    #[test]
    fn difference_table_shows_signed_percentages() {
        let comparison = compare_to_baseline(&sample()).expect("comparison");
        let rendered = difference_table(&comparison).to_string();
        assert!(rendered.contains("+10.0%"));
        assert!(rendered.contains("$5,000.00"));
    }

    #[test]
    fn warnings_block_lists_each_warning() {
        assert_eq!(warnings_block(&[]), "No data-quality warnings.");
        let block = warnings_block(&["first".to_string(), "second".to_string()]);
        assert!(block.starts_with("2 data-quality warning(s):"));
        assert!(block.ends_with("  - second"));
    }

    #[test]
    fn json_report_carries_source_and_payload() {
        let dataset = sample();
        let warnings: Vec<String> = Vec::new();
        let report = Report::new(
            Path::new("survey.csv"),
            "inspect",
            InspectData {
                dataset: &dataset,
                warnings: &warnings,
            },
        );

        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["source"], "survey.csv");
        assert_eq!(value["report"], "inspect");
        assert_eq!(value["data"]["dataset"]["employers"][1], "Fairhaven");
        assert_eq!(
            value["data"]["dataset"]["positions"][0]["values"][0]["value"]["kind"],
            "range"
        );
        assert!(value["generated_at"].is_string());
    }
}
