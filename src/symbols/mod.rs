pub mod classify;
pub mod corrections;
pub mod date_resolver;
pub mod legacy;
pub mod numeric_date;
pub mod patterns;
pub mod reference;

use serde::Serialize;
use tracing::info;

use crate::error::SymbolResult;
use crate::session::{DecisionKey, Session};
use crate::table::{Dataset, Row};

pub use classify::{QcPath, QcPathKind, RawSymbolKind, classify_dataset, classify_symbol};
pub use date_resolver::{DateOutcome, DateResolution, resolve_date_symbols};
pub use legacy::{LegacyConversion, convert_legacy_symbols};
pub use numeric_date::{DateFormat, Granularity, interpret_numeric_dates, reformat_numeric_date};
pub use reference::ReferenceSymbolTable;

/// A choice the user has to make before a dataset can be finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingDecision {
    pub dataset: String,
    pub key: DecisionKey,
    pub prompt: String,
    pub options: Vec<String>,
    /// Rows to inspect while choosing, labelled as the resolver sees them.
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone)]
pub struct CleanedDataset {
    pub dataset: Dataset,
    pub renamed: Vec<(String, String)>,
    pub audit: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum Resolution {
    Cleaned(CleanedDataset),
    Pending(Vec<PendingDecision>),
}

/// Runs the resolver selected by `path` over `dataset`.
pub fn resolve_dataset(
    dataset: &Dataset,
    path: &QcPath,
    session: &Session,
    reference: &ReferenceSymbolTable,
) -> SymbolResult<Resolution> {
    match path {
        QcPath::Clean => Ok(Resolution::Cleaned(CleanedDataset {
            dataset: dataset.clone(),
            renamed: Vec::new(),
            audit: String::new(),
            warnings: Vec::new(),
        })),
        QcPath::LegacySymbols { labels } => {
            let conversion = convert_legacy_symbols(dataset, reference);
            info!(
                dataset = %dataset.name,
                renamed = conversion.renamed.len(),
                "legacy symbols converted"
            );
            Ok(Resolution::Cleaned(CleanedDataset {
                dataset: conversion.dataset,
                renamed: conversion.renamed,
                audit: labels.join(";"),
                warnings: Vec::new(),
            }))
        }
        QcPath::DateSymbols { .. } => Ok(from_date_outcome(resolve_date_symbols(dataset, session)?)),
        QcPath::NumericDates { .. } => resolve_numeric(dataset, session),
    }
}

fn resolve_numeric(dataset: &Dataset, session: &Session) -> SymbolResult<Resolution> {
    let format = session.date_format(&dataset.name)?;
    let granularity = session.granularity(&dataset.name)?;
    let (format, granularity) = match (format, granularity) {
        (Some(f), Some(g)) => (f, g),
        (format, granularity) => {
            let mut pending = Vec::new();
            if format.is_none() {
                pending.push(numeric_decision(dataset, DecisionKey::DateFormat));
            }
            if granularity.is_none() {
                pending.push(numeric_decision(dataset, DecisionKey::Granularity));
            }
            return Ok(Resolution::Pending(pending));
        }
    };

    let conversion = interpret_numeric_dates(dataset, format, granularity);
    let mut warnings: Vec<String> = conversion
        .failures
        .iter()
        .map(|l| format!("'{}' does not parse as {}; marked as missing", l, format))
        .collect();
    let audit = conversion
        .converted
        .iter()
        .map(|(from, _)| from.as_str())
        .chain(conversion.failures.iter().map(|s| s.as_str()))
        .collect::<Vec<_>>()
        .join(";");

    if !conversion.dataset.labels().any(patterns::is_named_date) {
        return Ok(Resolution::Cleaned(CleanedDataset {
            dataset: conversion.dataset,
            renamed: conversion.converted,
            audit,
            warnings,
        }));
    }

    // Reformatted tokens may themselves be date-corrupted symbols.
    match resolve_date_symbols(&conversion.dataset, session)? {
        DateOutcome::Pending(p) => Ok(Resolution::Pending(p)),
        DateOutcome::Resolved(resolved) => {
            let renamed = chain_renames(&conversion.converted, &resolved.renamed);
            warnings.extend(resolved.warnings);
            Ok(Resolution::Cleaned(CleanedDataset {
                dataset: resolved.dataset,
                renamed,
                audit,
                warnings,
            }))
        }
    }
}

fn from_date_outcome(outcome: DateOutcome) -> Resolution {
    match outcome {
        DateOutcome::Pending(p) => Resolution::Pending(p),
        DateOutcome::Resolved(r) => Resolution::Cleaned(CleanedDataset {
            dataset: r.dataset,
            renamed: r.renamed,
            audit: r.audit,
            warnings: r.warnings,
        }),
    }
}

/// Composes numeric-date renames with the date-symbol renames that followed.
fn chain_renames(first: &[(String, String)], second: &[(String, String)]) -> Vec<(String, String)> {
    let mut remaining: Vec<&(String, String)> = second.iter().collect();
    let mut out = Vec::with_capacity(first.len());
    for (original, token) in first {
        match remaining.iter().position(|(from, _)| from == token) {
            Some(pos) => {
                let (_, to) = remaining.remove(pos);
                out.push((original.clone(), to.clone()));
            }
            None => out.push((original.clone(), token.clone())),
        }
    }
    out
}

fn numeric_decision(dataset: &Dataset, key: DecisionKey) -> PendingDecision {
    let (prompt, options) = match key {
        DecisionKey::DateFormat => (
            format!("Select the date format that the {} dataset is in", dataset.name),
            DateFormat::ALL.iter().map(|f| f.as_str().to_string()).collect(),
        ),
        _ => (
            format!(
                "Select how the {} dataset's dates should be read to derive gene names \
                 (e.g. 2001-03-09 as yyyy-mm-dd is Mar-01 for month-year, Mar-09 for month-day)",
                dataset.name
            ),
            vec![
                Granularity::MonthYear.as_str().to_string(),
                Granularity::MonthDay.as_str().to_string(),
            ],
        ),
    };
    PendingDecision {
        dataset: dataset.name.clone(),
        key,
        prompt,
        options,
        columns: dataset.columns.clone(),
        rows: dataset
            .rows
            .iter()
            .filter(|r| patterns::is_numeric_date(&r.label))
            .cloned()
            .collect(),
    }
}
