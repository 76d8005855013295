use polars::prelude::DataFrame;

use crate::config::ParserConfig;
use crate::errors::ParserError;
use crate::loaders::{build_text_frame, frame_headers, text_column};

const LOADER: &str = "CLEAN";

/// A survey table with metadata columns and untitled rows removed.
///
/// `frame` holds one row per titled position: the title column followed by the
/// employer columns. `floors` has the same shape; row `i` carries the untitled
/// row found directly below position `i` (the low end of its ranges), or nulls
/// when there was none.
#[derive(Debug, Clone)]
pub struct CleanTable {
    pub frame: DataFrame,
    pub floors: DataFrame,
    pub dropped_columns: Vec<String>,
    pub dropped_rows: usize,
}

impl CleanTable {
    pub fn title_column(&self) -> Option<String> {
        frame_headers(&self.frame).into_iter().next()
    }

    pub fn employer_columns(&self) -> Vec<String> {
        frame_headers(&self.frame).into_iter().skip(1).collect()
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }
}

struct PositionRows {
    titled: Vec<Option<String>>,
    floor: Option<Vec<Option<String>>>,
}

pub fn clean_table(frame: &DataFrame, config: &ParserConfig) -> Result<CleanTable, ParserError> {
    let headers = frame_headers(frame);
    let Some((title_header, candidates)) = headers.split_first() else {
        return Ok(CleanTable {
            frame: DataFrame::empty(),
            floors: DataFrame::empty(),
            dropped_columns: Vec::new(),
            dropped_rows: 0,
        });
    };

    let mut kept_headers = vec![title_header.clone()];
    let mut dropped_columns = Vec::new();
    for header in candidates {
        if config.is_metadata_column(header) {
            dropped_columns.push(header.clone());
        } else {
            kept_headers.push(header.clone());
        }
    }
    if !dropped_columns.is_empty() {
        tracing::debug!(columns = ?dropped_columns, "dropped metadata columns");
    }

    let columns: Vec<Vec<Option<String>>> = kept_headers
        .iter()
        .map(|header| text_column(frame, header))
        .collect::<Result<_, _>>()?;

    let mut positions: Vec<PositionRows> = Vec::new();
    let mut dropped_rows = 0;

    for row_idx in 0..frame.height() {
        let row: Vec<Option<String>> = columns.iter().map(|col| col[row_idx].clone()).collect();
        let has_title = row[0]
            .as_deref()
            .map(|title| !title.trim().is_empty())
            .unwrap_or(false);

        if has_title {
            positions.push(PositionRows {
                titled: row,
                floor: None,
            });
            continue;
        }

        let has_values = row[1..].iter().any(Option::is_some);
        match positions.last_mut() {
            Some(last) if config.pair_floor_rows && has_values && last.floor.is_none() => {
                let mut floor = row;
                floor[0] = last.titled[0].clone();
                last.floor = Some(floor);
            }
            _ => dropped_rows += 1,
        }
    }

    if dropped_rows > 0 {
        tracing::debug!(rows = dropped_rows, "dropped rows without a position title");
    }

    let titled_rows: Vec<Vec<Option<String>>> = positions
        .iter()
        .map(|position| position.titled.clone())
        .collect();
    let floor_rows: Vec<Vec<Option<String>>> = positions
        .iter()
        .map(|position| {
            position.floor.clone().unwrap_or_else(|| {
                let mut blank = vec![None; kept_headers.len()];
                blank[0] = position.titled[0].clone();
                blank
            })
        })
        .collect();

    Ok(CleanTable {
        frame: build_text_frame(LOADER, &kept_headers, &titled_rows)?,
        floors: build_text_frame(LOADER, &kept_headers, &floor_rows)?,
        dropped_columns,
        dropped_rows,
    })
}
