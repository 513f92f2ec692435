use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SymbolError;
use crate::symbols::patterns::is_numeric_date;
use crate::table::{Dataset, NA_LABEL};

/// Field order of a numeric date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    #[serde(rename = "yyyy-dd-mm")]
    YyyyDdMm,
    #[serde(rename = "yyyy-mm-dd")]
    YyyyMmDd,
    #[serde(rename = "dd-mm-yyyy")]
    DdMmYyyy,
    #[serde(rename = "mm-dd-yyyy")]
    MmDdYyyy,
}

impl DateFormat {
    pub const ALL: [DateFormat; 4] = [
        Self::YyyyDdMm,
        Self::YyyyMmDd,
        Self::DdMmYyyy,
        Self::MmDdYyyy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::YyyyDdMm => "yyyy-dd-mm",
            Self::YyyyMmDd => "yyyy-mm-dd",
            Self::DdMmYyyy => "dd-mm-yyyy",
            Self::MmDdYyyy => "mm-dd-yyyy",
        }
    }

    /// Returns (year, month, day) from three fields in this order.
    fn arrange(self, f: [u32; 3]) -> (u32, u32, u32) {
        match self {
            Self::YyyyDdMm => (f[0], f[2], f[1]),
            Self::YyyyMmDd => (f[0], f[1], f[2]),
            Self::DdMmYyyy => (f[2], f[1], f[0]),
            Self::MmDdYyyy => (f[2], f[0], f[1]),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SymbolError::InvalidChoice {
                key: "date_format".to_string(),
                value: s.to_string(),
                expected: "yyyy-dd-mm, yyyy-mm-dd, dd-mm-yyyy, mm-dd-yyyy".to_string(),
            })
    }
}

/// Which two date parts carry the original gene label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Granularity {
    #[serde(rename = "month-year")]
    MonthYear,
    #[serde(rename = "month-day")]
    MonthDay,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MonthYear => "month-year",
            Self::MonthDay => "month-day",
        }
    }

    fn strftime(self) -> &'static str {
        match self {
            Self::MonthYear => "%b-%y",
            Self::MonthDay => "%b-%d",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month-year" => Ok(Self::MonthYear),
            "month-day" => Ok(Self::MonthDay),
            _ => Err(SymbolError::InvalidChoice {
                key: "granularity".to_string(),
                value: s.to_string(),
                expected: "month-year, month-day".to_string(),
            }),
        }
    }
}

/// Reformats a numeric date label into a `Mon-DD` / `Mon-YY` token.
///
/// A trailing time component (`2001-03-09 00:00:00`) is ignored. Returns
/// `None` when the label does not parse under `format`.
pub fn reformat_numeric_date(label: &str, format: DateFormat, granularity: Granularity) -> Option<String> {
    let date_part = label.split_whitespace().next()?;
    let date_part = date_part.split('T').next()?;
    let fields: Vec<&str> = date_part.split(['-', '/', '.']).collect();
    if fields.len() != 3 {
        return None;
    }
    let mut parsed = [0u32; 3];
    for (slot, field) in parsed.iter_mut().zip(&fields) {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = field.parse().ok()?;
    }
    let (year, month, day) = format.arrange(parsed);
    let year = i32::try_from(year).ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format(granularity.strftime()).to_string())
}

#[derive(Debug, Clone)]
pub struct NumericConversion {
    pub dataset: Dataset,
    pub converted: Vec<(String, String)>,
    pub failures: Vec<String>,
}

/// Rewrites every numeric-date label in `dataset`.
///
/// Labels that fail to parse are replaced by [`NA_LABEL`] so the gap stays
/// visible in the cleaned table.
pub fn interpret_numeric_dates(dataset: &Dataset, format: DateFormat, granularity: Granularity) -> NumericConversion {
    let mut out = dataset.clone();
    let mut converted = Vec::new();
    let mut failures = Vec::new();

    for row in &mut out.rows {
        if !is_numeric_date(&row.label) {
            continue;
        }
        match reformat_numeric_date(&row.label, format, granularity) {
            Some(token) => {
                debug!(label = %row.label, token = %token, "numeric date reformatted");
                converted.push((row.label.clone(), token.clone()));
                row.label = token;
            }
            None => {
                failures.push(row.label.clone());
                row.label = NA_LABEL.to_string();
            }
        }
    }

    NumericConversion {
        dataset: out,
        converted,
        failures,
    }
}
