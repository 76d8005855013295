use crate::clean::CleanTable;
use crate::errors::ParserError;
use crate::loaders::text_column;
use crate::model::{CompensationValue, Dataset, PositionRecord};
use crate::value::parse_compensation_value;

/// Combines a titled cell and its floor cell. Unparseable cells are omitted.
pub fn combine_cells(titled: Option<&str>, floor: Option<&str>) -> Option<CompensationValue> {
    let high = titled.and_then(parse_compensation_value);
    let low = floor.and_then(parse_compensation_value);
    match (low, high) {
        (Some(low), Some(high)) => Some(CompensationValue::range(low, high)),
        (None, Some(high)) => Some(CompensationValue::single(high)),
        (Some(low), None) => Some(CompensationValue::single(low)),
        (None, None) => None,
    }
}

pub fn parse_clean_table(table: &CleanTable) -> Result<Dataset, ParserError> {
    let Some(title_column) = table.title_column() else {
        return Ok(Dataset::default());
    };
    let employers = table.employer_columns();

    let titles = text_column(&table.frame, &title_column)?;
    let mut titled_columns = Vec::with_capacity(employers.len());
    let mut floor_columns = Vec::with_capacity(employers.len());
    for employer in &employers {
        titled_columns.push(text_column(&table.frame, employer)?);
        floor_columns.push(text_column(&table.floors, employer)?);
    }

    let mut dataset = Dataset::new(employers.clone());
    let mut omitted = 0usize;

    for (row_idx, title) in titles.iter().enumerate() {
        let Some(title) = title.as_deref() else {
            continue;
        };

        let mut record = PositionRecord::new(title);
        for (col_idx, employer) in employers.iter().enumerate() {
            let titled = titled_columns[col_idx][row_idx].as_deref();
            let floor = floor_columns[col_idx][row_idx].as_deref();
            match combine_cells(titled, floor) {
                Some(value) => record.insert(employer.as_str(), value),
                None => {
                    if titled.is_some() || floor.is_some() {
                        omitted += 1;
                    }
                }
            }
        }

        if dataset.insert_record(record) {
            tracing::warn!(position = title, "duplicate position title; later row replaces earlier");
        }
    }

    if omitted > 0 {
        tracing::debug!(cells = omitted, "omitted unparseable compensation cells");
    }
    tracing::debug!(
        positions = dataset.len(),
        employers = dataset.employers().len(),
        "parsed compensation data"
    );

    Ok(dataset)
}
