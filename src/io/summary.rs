use std::fmt::Write;

use anyhow::Result;

use crate::ctx::Ctx;
use crate::schema::v1::DatasetStatus;
use crate::symbols::QcPathKind;

/// How many renamed pairs to list per dataset before eliding.
const RENAMED_PREVIEW: usize = 12;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let mut out = String::new();
    writeln!(out, "kira-stagesqc v{}", version)?;
    if let Some(reference) = &ctx.reference {
        writeln!(out, "Reference: {} ({} entries)", reference.source, reference.len())?;
    }

    for entry in &ctx.qc {
        writeln!(
            out,
            "{}: {} [{}]",
            entry.name,
            entry.path.kind().as_str(),
            entry.status.as_str()
        )?;
        match (entry.path.kind(), entry.status) {
            (QcPathKind::Clean, DatasetStatus::Unchanged) if entry.warnings.is_empty() => {
                writeln!(out, "  No errors detected for {} dataset", entry.name)?;
            }
            (_, DatasetStatus::Pending) => {
                writeln!(out, "  Flagged: {}", entry.audit)?;
            }
            _ => {
                if !entry.audit.is_empty() {
                    writeln!(out, "  Flagged: {}", entry.audit)?;
                }
            }
        }
        for (from, to) in entry.renamed.iter().take(RENAMED_PREVIEW) {
            writeln!(out, "  {} -> {}", from, to)?;
        }
        if entry.renamed.len() > RENAMED_PREVIEW {
            writeln!(out, "  ... {} more", entry.renamed.len() - RENAMED_PREVIEW)?;
        }
        for warning in &entry.warnings {
            writeln!(out, "  warning: {}", warning)?;
        }
    }

    if let Some(tokens) = &ctx.tokens {
        let tokens_line = if tokens.tokens.is_empty() {
            "none".to_string()
        } else {
            tokens.tokens.join(", ")
        };
        writeln!(out, "Comparisons: {}", tokens_line)?;
        writeln!(out, "Time series: {}", if ctx.is_time_series() { "yes" } else { "no" })?;
    }

    if !ctx.pending.is_empty() {
        writeln!(out, "Decisions needed:")?;
        for decision in &ctx.pending {
            writeln!(out, "- {} ({})", decision.prompt, decision.key.flag())?;
            writeln!(out, "  options: {}", decision.options.join(" | "))?;
            for row in &decision.rows {
                writeln!(out, "  {}\t{}", row.label, row.values.join("\t"))?;
            }
        }
    }

    Ok(out)
}

/// Classification-only summary for `validate`.
pub fn format_validate_summary(ctx: &Ctx) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "kira-stagesqc validate ok")?;
    for (dataset, path) in ctx.datasets.iter().zip(&ctx.classified) {
        writeln!(
            out,
            "{}\t{} rows\t{} columns\t{}",
            dataset.name,
            dataset.len(),
            dataset.columns.len(),
            path.kind().as_str()
        )?;
        if !path.labels().is_empty() {
            writeln!(out, "  flagged: {}", path.labels().join(";"))?;
        }
    }
    Ok(out)
}
