use std::collections::{HashMap, HashSet};

use polars::prelude::*;

use crate::errors::ParserError;

/// Trims headers, strips a leading BOM, names blank headers `Unnamed: <index>`
/// and suffixes repeats with `.<n>` so every column name is unique.
pub(crate) fn normalize_headers(loader: &'static str, raw: &[String]) -> Vec<String> {
    let bases: Vec<String> = raw
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let trimmed = header.trim_start_matches('\u{feff}').trim();
            if trimmed.is_empty() {
                format!("Unnamed: {idx}")
            } else {
                trimmed.to_string()
            }
        })
        .collect();

    let mut taken: HashSet<String> = HashSet::with_capacity(bases.len());
    let mut repeats: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::with_capacity(bases.len());

    for base in bases {
        if taken.insert(base.clone()) {
            headers.push(base);
            continue;
        }

        // Skip suffixes already used by a literal header such as `Town A.1`.
        let count = repeats.entry(base.clone()).or_insert(0);
        let name = loop {
            *count += 1;
            let candidate = format!("{base}.{count}");
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        tracing::warn!(loader, header = %base, renamed = %name, "duplicate column header renamed");
        taken.insert(name.clone());
        headers.push(name);
    }

    headers
}

pub(crate) fn clean_cell(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Builds a frame of nullable UTF-8 columns. Short rows are padded with nulls and
/// cells beyond the header width are ignored.
pub(crate) fn build_text_frame(
    loader: &'static str,
    raw_headers: &[String],
    rows: &[Vec<Option<String>>],
) -> Result<DataFrame, ParserError> {
    let headers = normalize_headers(loader, raw_headers);
    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());

    for (idx, header) in headers.iter().enumerate() {
        let values: Vec<Option<&str>> = rows
            .iter()
            .map(|row| row.get(idx).and_then(|cell| cell.as_deref()))
            .collect();
        columns.push(Series::new(header.as_str().into(), values).into());
    }

    let surplus = rows
        .iter()
        .filter(|row| row.len() > headers.len())
        .count();
    if surplus > 0 {
        tracing::debug!(loader, rows = surplus, "ignored cells beyond the header width");
    }

    Ok(DataFrame::new(columns)?)
}

pub(crate) fn frame_headers(frame: &DataFrame) -> Vec<String> {
    frame
        .get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

pub(crate) fn text_column(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ParserError> {
    let column = frame.column(name)?;
    let values = column.str()?;
    Ok((0..values.len())
        .map(|idx| values.get(idx).map(str::to_string))
        .collect())
}
