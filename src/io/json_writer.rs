use std::path::Path;

use anyhow::{Context, Result};

use crate::comparisons::ComparisonGroup;
use crate::ctx::{Ctx, DatasetQc};
use crate::schema::v1::{
    ComparisonColumns, Comparisons, DatasetReport, DatasetStatus, PendingReport, PendingRow,
    RenamedLabel, StagesQcV1,
};
use crate::symbols::PendingDecision;

pub fn build_report(ctx: &Ctx) -> Result<StagesQcV1> {
    let mut report = StagesQcV1::empty(env!("CARGO_PKG_VERSION"), ctx.options.use_adjusted_pval);
    report.options.inputs = ctx.inputs.iter().map(|p| p.display().to_string()).collect();
    report.reference = ctx.report.reference.clone();

    report.datasets = ctx
        .qc
        .iter()
        .map(|entry| dataset_report(ctx, entry))
        .collect::<Result<Vec<_>>>()?;

    if let Some(tokens) = &ctx.tokens {
        report.comparisons = Comparisons {
            tokens: tokens.tokens.clone(),
            is_time_series: tokens.is_time_series,
        };
    }

    report.pending = ctx.pending.iter().map(pending_report).collect();
    report.warnings = ctx.warnings.clone();
    Ok(report)
}

fn dataset_report(ctx: &Ctx, entry: &DatasetQc) -> Result<DatasetReport> {
    let source = ctx
        .datasets
        .iter()
        .find(|d| d.name == entry.name)
        .with_context(|| format!("dataset {} missing from context", entry.name))?;
    let columns = entry
        .cleaned
        .as_ref()
        .map(|d| d.columns.as_slice())
        .unwrap_or(source.columns.as_slice());
    let rows = entry.cleaned.as_ref().map(|d| d.len()).unwrap_or(source.len());

    let log_table = ctx.log_table_for(&entry.name);
    let write_tsv = ctx.options.write_tsv && entry.status != DatasetStatus::Pending;
    Ok(DatasetReport {
        name: entry.name.clone(),
        rows: rows as u64,
        qc_path: entry.path.kind(),
        status: entry.status,
        audit: entry.audit.clone(),
        renamed: entry
            .renamed
            .iter()
            .map(|(from, to)| RenamedLabel {
                from: from.clone(),
                to: to.clone(),
            })
            .collect(),
        comparisons: entry
            .groups
            .iter()
            .map(|g| comparison_columns(g, columns))
            .collect(),
        log_columns: log_table
            .map(|t| t.columns.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default(),
        log_table_tsv_path: (write_tsv && log_table.is_some()).then(|| file_name(&ctx.output.log_tsv(&entry.name))),
        cleaned_tsv_path: write_tsv.then(|| file_name(&ctx.output.cleaned_tsv(&entry.name))),
        warnings: entry.warnings.clone(),
    })
}

fn comparison_columns(group: &ComparisonGroup, columns: &[String]) -> ComparisonColumns {
    let name = |idx: Option<usize>| idx.and_then(|i| columns.get(i)).cloned();
    ComparisonColumns {
        comparison: group.comparison.clone(),
        token: group.token.clone(),
        ratio: name(group.ratio),
        log2fc: name(group.log2fc),
        pval: name(group.pval),
        adj_pval: name(group.adj_pval),
    }
}

fn pending_report(decision: &PendingDecision) -> PendingReport {
    PendingReport {
        dataset: decision.dataset.clone(),
        key: decision.key.as_str().to_string(),
        flag: decision.key.flag().to_string(),
        prompt: decision.prompt.clone(),
        options: decision.options.clone(),
        columns: decision.columns.clone(),
        rows: decision
            .rows
            .iter()
            .map(|r| PendingRow {
                label: r.label.clone(),
                values: r.values.clone(),
            })
            .collect(),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

pub fn write_json(path: &Path, report: &StagesQcV1) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}
