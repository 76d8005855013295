use std::fmt;

use serde::Serialize;

/// A parsed figure for one (position, employer) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CompensationValue {
    Single { amount: f64 },
    Range { low: f64, high: f64 },
}

impl CompensationValue {
    pub fn single(amount: f64) -> Self {
        CompensationValue::Single { amount }
    }

    pub fn range(low: f64, high: f64) -> Self {
        CompensationValue::Range { low, high }
    }

    /// The figure from the titled row: the top of a range.
    pub fn amount(&self) -> f64 {
        match self {
            CompensationValue::Single { amount } => *amount,
            CompensationValue::Range { high, .. } => *high,
        }
    }

    pub fn low(&self) -> f64 {
        match self {
            CompensationValue::Single { amount } => *amount,
            CompensationValue::Range { low, .. } => *low,
        }
    }

    pub fn high(&self) -> f64 {
        self.amount()
    }

    pub fn is_range(&self) -> bool {
        matches!(self, CompensationValue::Range { .. })
    }

    pub(crate) fn bounds(&self) -> [f64; 2] {
        [self.low(), self.high()]
    }
}

impl fmt::Display for CompensationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompensationValue::Single { amount } => write!(f, "{}", format_currency(*amount)),
            CompensationValue::Range { low, high } => {
                write!(f, "{} - {}", format_currency(*low), format_currency(*high))
            }
        }
    }
}

/// `$1,234.50` style rendering with two decimals and thousands separators.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{cents}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployerValue {
    pub employer: String,
    pub value: CompensationValue,
}

/// All parsed figures for one position, in employer column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionRecord {
    pub title: String,
    pub values: Vec<EmployerValue>,
}

impl PositionRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            values: Vec::new(),
        }
    }

    pub fn get(&self, employer: &str) -> Option<&CompensationValue> {
        self.values
            .iter()
            .find(|entry| entry.employer == employer)
            .map(|entry| &entry.value)
    }

    /// Inserts or replaces the figure for `employer`.
    pub fn insert(&mut self, employer: impl Into<String>, value: CompensationValue) {
        let employer = employer.into();
        match self.values.iter_mut().find(|entry| entry.employer == employer) {
            Some(entry) => entry.value = value,
            None => self.values.push(EmployerValue { employer, value }),
        }
    }

    pub fn with_value(mut self, employer: impl Into<String>, value: CompensationValue) -> Self {
        self.insert(employer, value);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn employers(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|entry| entry.employer.as_str())
    }

    /// Mean of [`CompensationValue::amount`] across employers.
    pub fn average_amount(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let total: f64 = self.values.iter().map(|entry| entry.value.amount()).sum();
        Some(total / self.values.len() as f64)
    }
}

/// Position title → employer → figure, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    employers: Vec<String>,
    positions: Vec<PositionRecord>,
}

impl Dataset {
    pub fn new(employers: Vec<String>) -> Self {
        Self {
            employers,
            positions: Vec::new(),
        }
    }

    /// Builds a dataset from records; employers are collected in first-seen order.
    pub fn from_records(records: Vec<PositionRecord>) -> Self {
        let mut dataset = Dataset::default();
        for record in records {
            for employer in record.employers() {
                if !dataset.employers.iter().any(|known| known == employer) {
                    dataset.employers.push(employer.to_string());
                }
            }
            dataset.insert_record(record);
        }
        dataset
    }

    /// Employer columns in source order; the first one is the baseline.
    pub fn employers(&self) -> &[String] {
        &self.employers
    }

    pub fn baseline_employer(&self) -> Option<&str> {
        self.employers.first().map(String::as_str)
    }

    pub fn positions(&self) -> &[PositionRecord] {
        &self.positions
    }

    pub fn position(&self, title: &str) -> Option<&PositionRecord> {
        self.positions.iter().find(|record| record.title == title)
    }

    pub fn contains_position(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn value(&self, title: &str, employer: &str) -> Option<&CompensationValue> {
        self.position(title).and_then(|record| record.get(employer))
    }

    /// Inserts a record, replacing an existing one with the same title in place.
    /// Returns `true` when a record was replaced.
    pub fn insert_record(&mut self, record: PositionRecord) -> bool {
        match self
            .positions
            .iter_mut()
            .find(|existing| existing.title == record.title)
        {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.positions.push(record);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// New dataset with the same employers and only the positions `keep` accepts.
    pub fn filter_positions<F>(&self, mut keep: F) -> Dataset
    where
        F: FnMut(&PositionRecord) -> bool,
    {
        Dataset {
            employers: self.employers.clone(),
            positions: self
                .positions
                .iter()
                .filter(|record| keep(record))
                .cloned()
                .collect(),
        }
    }
}
