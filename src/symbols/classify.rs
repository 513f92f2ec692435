use serde::{Deserialize, Serialize};

use crate::symbols::patterns::{is_named_date, is_numeric_date};
use crate::symbols::reference::ReferenceSymbolTable;
use crate::table::Dataset;

/// Per-label category, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawSymbolKind {
    DateCorruptedNamed,
    DeprecatedSymbol,
    DateCorruptedNumeric,
    Clean,
}

pub fn classify_symbol(label: &str, reference: &ReferenceSymbolTable) -> RawSymbolKind {
    if is_named_date(label) {
        RawSymbolKind::DateCorruptedNamed
    } else if reference.is_deprecated(label) {
        RawSymbolKind::DeprecatedSymbol
    } else if is_numeric_date(label) {
        RawSymbolKind::DateCorruptedNumeric
    } else {
        RawSymbolKind::Clean
    }
}

/// The single resolution path a dataset takes, with the labels that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QcPath {
    DateSymbols { labels: Vec<String> },
    LegacySymbols { labels: Vec<String> },
    NumericDates { labels: Vec<String> },
    Clean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QcPathKind {
    DateSymbols,
    LegacySymbols,
    NumericDates,
    Clean,
}

impl QcPathKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DateSymbols => "date_symbols",
            Self::LegacySymbols => "legacy_symbols",
            Self::NumericDates => "numeric_dates",
            Self::Clean => "clean",
        }
    }
}

impl QcPath {
    pub fn kind(&self) -> QcPathKind {
        match self {
            Self::DateSymbols { .. } => QcPathKind::DateSymbols,
            Self::LegacySymbols { .. } => QcPathKind::LegacySymbols,
            Self::NumericDates { .. } => QcPathKind::NumericDates,
            Self::Clean => QcPathKind::Clean,
        }
    }

    pub fn labels(&self) -> &[String] {
        match self {
            Self::DateSymbols { labels }
            | Self::LegacySymbols { labels }
            | Self::NumericDates { labels } => labels,
            Self::Clean => &[],
        }
    }
}

/// Picks one path for the whole dataset.
///
/// Named dates win over deprecated symbols even when both are present; in
/// that case legacy substitution is skipped for the dataset.
pub fn classify_dataset(dataset: &Dataset, reference: &ReferenceSymbolTable) -> QcPath {
    let collect = |pred: &dyn Fn(&str) -> bool| -> Vec<String> {
        dataset
            .labels()
            .filter(|l| pred(l))
            .map(|l| l.to_string())
            .collect()
    };

    let named = collect(&is_named_date);
    if !named.is_empty() {
        return QcPath::DateSymbols { labels: named };
    }

    let mut legacy = collect(&|l| reference.is_deprecated(l));
    if !legacy.is_empty() {
        legacy.sort();
        legacy.dedup();
        return QcPath::LegacySymbols { labels: legacy };
    }

    let numeric = collect(&is_numeric_date);
    if !numeric.is_empty() {
        return QcPath::NumericDates { labels: numeric };
    }

    QcPath::Clean
}
