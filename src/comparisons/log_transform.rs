use std::collections::HashSet;

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{debug, warn};

use crate::comparisons::columns::ComparisonGroup;
use crate::table::{Dataset, NA_LABEL};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogTransformOptions {
    pub use_adjusted_pval: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogColumn {
    pub name: String,
    pub values: Vec<f64>,
}

/// Derived log2FC / -log10(p) table for one dataset, one row per unique gene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogTable {
    pub dataset: String,
    pub index_name: String,
    pub genes: Vec<String>,
    pub columns: Vec<LogColumn>,
    pub warnings: Vec<String>,
}

impl LogTable {
    pub fn column(&self, name: &str) -> Option<&LogColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn value(&self, gene: &str, column: &str) -> Option<f64> {
        let row = self.genes.iter().position(|g| g == gene)?;
        self.column(column).map(|c| c.values[row])
    }
}

pub fn log2_fold_change(ratio: f64) -> f64 {
    ratio.log2()
}

pub fn negative_log10(pval: f64) -> f64 {
    -pval.log10()
}

/// Builds the log table for `dataset` from its comparison groups.
///
/// Per group: `log2FC_<cmp>` from the ratio column (or the existing log2FC
/// column when no ratio is present), `negative_log_pval_<cmp>` (or
/// `negative_log_adj_pval_<cmp>`) and the p-value column itself. Groups
/// without a usable fold change or p-value are skipped with a warning.
/// Duplicate gene labels keep their first row.
pub fn log_transform(
    dataset: &Dataset,
    groups: &[ComparisonGroup],
    opts: LogTransformOptions,
) -> Result<LogTable> {
    let mut warnings = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut keep = Vec::with_capacity(dataset.len());
    let mut unlabelled = 0usize;
    for (i, row) in dataset.rows.iter().enumerate() {
        if row.label == NA_LABEL {
            unlabelled += 1;
            continue;
        }
        if seen.insert(row.label.as_str()) {
            keep.push(i);
        } else {
            debug!(dataset = %dataset.name, gene = %row.label, "duplicate gene dropped");
            warnings.push(format!("duplicate gene '{}' in {}; first row kept", row.label, dataset.name));
        }
    }
    if unlabelled > 0 {
        warnings.push(format!(
            "{} rows of {} have no gene label and were left out",
            unlabelled, dataset.name
        ));
    }

    let pick = |idx: usize| -> Vec<f64> {
        let full = dataset.numeric_column(idx);
        keep.iter().map(|&i| full[i]).collect()
    };

    let neg_prefix = if opts.use_adjusted_pval {
        "negative_log_adj_pval"
    } else {
        "negative_log_pval"
    };

    let mut columns: Vec<LogColumn> = Vec::new();
    for group in groups {
        let pval_idx = if opts.use_adjusted_pval { group.adj_pval } else { group.pval };
        let Some(pval_idx) = pval_idx else {
            warn!(dataset = %dataset.name, comparison = %group.comparison, "no p-value column");
            warnings.push(format!(
                "{} has no {} column for {}; comparison skipped",
                dataset.name,
                if opts.use_adjusted_pval { "adjusted p-value" } else { "p-value" },
                group.comparison
            ));
            continue;
        };
        let fold: Vec<f64> = match (group.ratio, group.log2fc) {
            (Some(ratio), _) => pick(ratio).into_iter().map(log2_fold_change).collect(),
            (None, Some(log2fc)) => pick(log2fc),
            (None, None) => {
                warnings.push(format!(
                    "{} has no ratio or log2FC column for {}; comparison skipped",
                    dataset.name, group.comparison
                ));
                continue;
            }
        };
        let pvals = pick(pval_idx);
        columns.push(LogColumn {
            name: format!("log2FC_{}", group.comparison),
            values: fold,
        });
        columns.push(LogColumn {
            name: format!("{}_{}", neg_prefix, group.comparison),
            values: pvals.iter().copied().map(negative_log10).collect(),
        });
        columns.push(LogColumn {
            name: dataset.columns[pval_idx].clone(),
            values: pvals,
        });
    }

    let mut names: HashSet<String> = HashSet::new();
    for col in &columns {
        if !names.insert(col.name.to_ascii_lowercase()) {
            bail!(
                "derived column '{}' occurs twice in {}; rename one of the source columns so their comparison suffixes differ",
                col.name,
                dataset.name
            );
        }
    }

    Ok(LogTable {
        dataset: dataset.name.clone(),
        index_name: dataset.index_name.clone(),
        genes: keep.iter().map(|&i| dataset.rows[i].label.clone()).collect(),
        columns,
        warnings,
    })
}
