use std::cmp::Ordering;

use serde::Serialize;

use crate::error::{SymbolError, SymbolResult};

pub mod reader;
pub mod writer;

/// Marker left in place of a row label that could not be resolved.
pub const NA_LABEL: &str = "<NA>";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub label: String,
    pub values: Vec<String>,
}

impl Row {
    pub fn new(label: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// One uploaded table: rows keyed by gene label, cells kept as text.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub index_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, index_name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            index_name: index_name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, label: impl Into<String>, values: Vec<String>) -> SymbolResult<()> {
        let label = label.into();
        if values.len() != self.columns.len() {
            return Err(SymbolError::RaggedRow {
                label,
                got: values.len(),
                expected: self.columns.len(),
            });
        }
        self.rows.push(Row { label, values });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.label.as_str())
    }

    pub fn numeric_column(&self, idx: usize) -> Vec<f64> {
        self.rows
            .iter()
            .map(|r| r.values.get(idx).map(|v| parse_value(v)).unwrap_or(f64::NAN))
            .collect()
    }

    /// Upper-cases and trims every row label.
    pub fn normalize_labels(&mut self) {
        for row in &mut self.rows {
            row.label = row.label.trim().to_uppercase();
        }
    }

    /// Stable alphabetical sort on the row label; unresolved labels go last.
    pub fn sort_by_label(&mut self) {
        self.rows.sort_by(|a, b| compare_labels(&a.label, &b.label));
    }
}

pub fn compare_labels(a: &str, b: &str) -> Ordering {
    match (a == NA_LABEL, b == NA_LABEL) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

/// Parses a numeric cell; blanks and NA markers become NaN.
pub fn parse_value(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "na" | "nan" | "n/a" | "null" | "<na>" => f64::NAN,
        "inf" | "+inf" => f64::INFINITY,
        "-inf" => f64::NEG_INFINITY,
        _ => trimmed.parse::<f64>().unwrap_or(f64::NAN),
    }
}
