use std::path::PathBuf;

use compgrapher_parser::analysis::{
    all_employer_series, compare_to_baseline, drop_highest_paid, employer_series,
    exclude_positions, prepare_comparison, retain_min_employers,
};
use compgrapher_parser::{
    AnalysisConfig, CompensationDataParser, CompensationValue, Dataset, PositionRecord,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

fn schedule_dataset() -> Dataset {
    let parser = CompensationDataParser::new(fixture_path("schedule_e.csv")).expect("parser");
    let (dataset, _) = parser.process(false).expect("process");
    dataset
}

fn titles(dataset: &Dataset) -> Vec<&str> {
    dataset
        .positions()
        .iter()
        .map(|record| record.title.as_str())
        .collect()
}

#[test]
fn exclusions_remove_named_positions_only() {
    let dataset = schedule_dataset();
    let filtered = exclude_positions(
        &dataset,
        &["Alternate Building Inspector".to_string(), "Not A Position".to_string()],
    );

    assert_eq!(filtered.len(), dataset.len() - 1);
    assert!(!filtered.contains_position("Alternate Building Inspector"));
    assert_eq!(filtered.employers(), dataset.employers());
}

#[test]
fn highest_paid_positions_are_dropped_by_average() {
    let dataset = schedule_dataset();
    let filtered = drop_highest_paid(&dataset, 2);

    assert!(!filtered.contains_position("Town Administrator"));
    assert!(!filtered.contains_position("Building Commissioner"));
    assert!(filtered.contains_position("Treasurer/Collector"));
    assert_eq!(filtered.len(), dataset.len() - 2);
}

#[test]
fn nothing_is_dropped_when_too_few_positions_are_ranked() {
    let dataset = Dataset::from_records(vec![
        PositionRecord::new("Clerk").with_value("Town A", CompensationValue::single(50_000.0)),
        PositionRecord::new("Vacant"),
    ]);

    let filtered = drop_highest_paid(&dataset, 2);
    assert_eq!(titles(&filtered), ["Clerk", "Vacant"]);
}

#[test]
fn min_employers_keeps_compared_positions() {
    let dataset = Dataset::from_records(vec![
        PositionRecord::new("Clerk")
            .with_value("Town A", CompensationValue::single(50_000.0))
            .with_value("Town B", CompensationValue::single(52_000.0)),
        PositionRecord::new("Planner").with_value("Town A", CompensationValue::single(70_000.0)),
    ]);

    assert_eq!(titles(&retain_min_employers(&dataset, 2)), ["Clerk"]);
}

#[test]
fn baseline_comparison_sorts_by_first_employer() {
    let dataset = Dataset::from_records(vec![
        PositionRecord::new("Planner")
            .with_value("Dartmouth", CompensationValue::single(80_000.0))
            .with_value("Fairhaven", CompensationValue::single(88_000.0)),
        PositionRecord::new("Clerk")
            .with_value("Dartmouth", CompensationValue::range(40_000.0, 50_000.0))
            .with_value("Fairhaven", CompensationValue::single(45_000.0))
            .with_value("Westport", CompensationValue::single(55_000.0)),
        PositionRecord::new("Custodian")
            .with_value("Fairhaven", CompensationValue::single(38_000.0)),
    ]);

    let comparison = compare_to_baseline(&dataset).expect("comparison");
    assert_eq!(comparison.baseline, "Dartmouth");
    assert_eq!(comparison.employers, ["Dartmouth", "Fairhaven", "Westport"]);

    let rows: Vec<&str> = comparison.rows.iter().map(|row| row.position.as_str()).collect();
    assert_eq!(rows, ["Clerk", "Planner"]);
    assert_eq!(comparison.rows[1].amounts, [Some(80_000.0), Some(88_000.0), None]);
    assert_eq!(comparison.complete_positions, 1);

    assert_eq!(comparison.differences.len(), 3);
    let clerk_fairhaven = &comparison.differences[0];
    assert_eq!(clerk_fairhaven.employer, "Fairhaven");
    assert_eq!(clerk_fairhaven.baseline_amount, 50_000.0);
    assert_eq!(clerk_fairhaven.difference, -5_000.0);
    assert!((clerk_fairhaven.percentage + 10.0).abs() < 1e-9);

    let planner = &comparison.differences[2];
    assert_eq!(planner.position, "Planner");
    assert!((planner.percentage - 10.0).abs() < 1e-9);
}

#[test]
fn comparison_needs_an_employer() {
    assert!(compare_to_baseline(&Dataset::default()).is_none());
}

#[test]
fn prepared_comparison_applies_every_filter() {
    let dataset = schedule_dataset();
    let config = AnalysisConfig {
        excluded_positions: vec!["Alternate Building Inspector".to_string()],
        ..AnalysisConfig::default()
    };

    let comparison = prepare_comparison(&dataset, &config).expect("comparison");
    let rows: Vec<&str> = comparison.rows.iter().map(|row| row.position.as_str()).collect();
    assert_eq!(
        rows,
        [
            "Recreation Coordinator",
            "Council on Aging Director",
            "Library Director",
            "Treasurer/Collector",
        ]
    );
    assert_eq!(comparison.complete_positions, 1);
    assert!(comparison
        .differences
        .iter()
        .all(|diff| diff.employer != "Dartmouth"));
}

#[test]
fn employer_series_trims_top_amounts_and_sorts_ascending() {
    let dataset = schedule_dataset();
    let config = AnalysisConfig {
        excluded_positions: vec!["Alternate Building Inspector".to_string()],
        ..AnalysisConfig::default()
    };

    let series = employer_series(&dataset, "Fairhaven", &config);
    let positions: Vec<&str> = series
        .points
        .iter()
        .map(|point| point.position.as_str())
        .collect();
    assert_eq!(
        positions,
        ["Recreation Coordinator", "Library Director", "Treasurer/Collector"]
    );
    assert_eq!(series.points[0].amount, 58_000.0);
}

#[test]
fn all_series_follow_employer_order() {
    let dataset = schedule_dataset();
    let series = all_employer_series(&dataset, &AnalysisConfig::default());

    let employers: Vec<&str> = series.iter().map(|s| s.employer.as_str()).collect();
    assert_eq!(employers, ["Dartmouth", "Fairhaven", "Westport", "Somerset"]);
}
