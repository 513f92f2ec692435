use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::error::SymbolResult;
use crate::session::{DecisionKey, Session};
use crate::symbols::corrections::{
    AmbiguousFamily, DateLabel, FamilyChoice, Month, corrected_symbol, ordinal,
};
use crate::symbols::patterns::{is_named_date, is_occurrence_key};
use crate::symbols::PendingDecision;
use crate::table::{Dataset, Row};

#[derive(Debug, Clone)]
pub struct DateResolution {
    pub dataset: Dataset,
    /// (original label, new label) for every rewritten row.
    pub renamed: Vec<(String, String)>,
    /// Original date-like labels, `;`-joined, for display.
    pub audit: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum DateOutcome {
    Resolved(DateResolution),
    Pending(Vec<PendingDecision>),
}

#[derive(Debug, Clone)]
struct CorruptedEntry {
    original: String,
    parsed: DateLabel,
    occurrence: usize,
    values: Vec<String>,
}

impl CorruptedEntry {
    fn key(&self) -> String {
        format!("{}_{}", self.parsed.formatted(), ordinal(self.occurrence))
    }
}

/// Rebuilds gene symbols for every date-like label in `dataset`.
///
/// Occurrences of the same date are numbered in row order; the `1st`/`2nd`
/// numbering is what a family choice refers to. If an ambiguous family is
/// present and `session` holds no choice for it, nothing is rewritten and the
/// missing decisions are returned instead.
///
/// Labels that already carry an occurrence suffix (`SEP-03_1st`, `MAR-01_3rd`)
/// are keys from an earlier pass: they are looked up as they stand and never
/// renumbered.
pub fn resolve_date_symbols(dataset: &Dataset, session: &Session) -> SymbolResult<DateOutcome> {
    let mut kept: Vec<Row> = Vec::with_capacity(dataset.len());
    let mut warnings = Vec::new();
    let mut audit = Vec::new();
    let mut entries: Vec<CorruptedEntry> = Vec::new();
    let mut seen: HashSet<(String, Vec<String>)> = HashSet::new();
    let mut occurrences: HashMap<(Month, u32), usize> = HashMap::new();
    let mut renamed = Vec::new();

    for row in &dataset.rows {
        if !is_named_date(&row.label) {
            kept.push(row.clone());
            continue;
        }
        if is_occurrence_key(&row.label) {
            match corrected_symbol(&row.label) {
                Some(symbol) => {
                    audit.push(row.label.clone());
                    renamed.push((row.label.clone(), symbol.to_string()));
                    kept.push(Row::new(symbol, row.values.clone()));
                }
                None => {
                    debug!(dataset = %dataset.name, label = %row.label, "occurrence key kept");
                    kept.push(row.clone());
                }
            }
            continue;
        }
        let parsed = match DateLabel::parse(&row.label) {
            Ok(p) => p,
            Err(err) => {
                warn!(dataset = %dataset.name, error = %err, "date-like label left unchanged");
                warnings.push(err.to_string());
                kept.push(row.clone());
                continue;
            }
        };
        audit.push(row.label.clone());

        let dup_key = (parsed.formatted().to_uppercase(), row.values.clone());
        if !seen.insert(dup_key) {
            debug!(dataset = %dataset.name, label = %row.label, "exact duplicate row dropped");
            warnings.push(format!("dropped exact duplicate row '{}'", row.label));
            continue;
        }

        let counter = occurrences.entry((parsed.month, parsed.day)).or_insert(0);
        *counter += 1;
        entries.push(CorruptedEntry {
            original: row.label.clone(),
            parsed,
            occurrence: *counter,
            values: row.values.clone(),
        });
    }

    let mut choices: HashMap<AmbiguousFamily, FamilyChoice> = HashMap::new();
    let mut pending = Vec::new();
    for family in [AmbiguousFamily::Mar01, AmbiguousFamily::Mar02] {
        let members: Vec<&CorruptedEntry> = entries
            .iter()
            .filter(|e| e.parsed.family() == Some(family))
            .collect();
        if members.is_empty() {
            continue;
        }
        match session.family_choice(&dataset.name, family)? {
            Some(choice) => {
                choices.insert(family, choice);
            }
            None => pending.push(family_decision(dataset, family, &members)),
        }
    }
    if !pending.is_empty() {
        info!(
            dataset = %dataset.name,
            decisions = pending.len(),
            "date symbols awaiting disambiguation"
        );
        return Ok(DateOutcome::Pending(pending));
    }

    for entry in entries {
        let key = entry.key();
        let symbol = match entry.parsed.family() {
            Some(family) => {
                let first = choices[&family];
                match entry.occurrence {
                    1 => Some(first.symbol()),
                    2 => Some(first.other().symbol()),
                    _ => None,
                }
            }
            None => corrected_symbol(&key),
        };
        let label = match symbol {
            Some(s) => s.to_string(),
            None => {
                warnings.push(format!(
                    "no canonical symbol for '{}' (from '{}'); label kept",
                    key, entry.original
                ));
                key
            }
        };
        renamed.push((entry.original, label.clone()));
        kept.push(Row::new(label, entry.values));
    }

    let mut cleaned = Dataset {
        name: dataset.name.clone(),
        index_name: dataset.index_name.clone(),
        columns: dataset.columns.clone(),
        rows: kept,
    };
    cleaned.sort_by_label();

    info!(
        dataset = %dataset.name,
        renamed = renamed.len(),
        "date symbols resolved"
    );
    Ok(DateOutcome::Resolved(DateResolution {
        dataset: cleaned,
        renamed,
        audit: audit.join(";"),
        warnings,
    }))
}

fn family_decision(dataset: &Dataset, family: AmbiguousFamily, members: &[&CorruptedEntry]) -> PendingDecision {
    let first_key = members
        .first()
        .map(|e| e.key())
        .unwrap_or_else(|| family.label().to_string());
    PendingDecision {
        dataset: dataset.name.clone(),
        key: DecisionKey::for_family(family),
        prompt: format!(
            "{} genes such as MARCHF{n} and MTARC{n} are both corrected to {} by spreadsheets; \
             select the symbol that {} corresponds to for the {} dataset",
            family.label(),
            family.label(),
            first_key,
            dataset.name,
            n = match family {
                AmbiguousFamily::Mar01 => 1,
                AmbiguousFamily::Mar02 => 2,
            }
        ),
        options: family
            .options()
            .iter()
            .map(|c| format!("{}: {}", c.symbol(), c.description()))
            .collect(),
        columns: dataset.columns.clone(),
        rows: members
            .iter()
            .map(|e| Row::new(e.key(), e.values.clone()))
            .collect(),
    }
}
