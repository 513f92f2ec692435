use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::comparisons::LogTable;
use crate::ctx::Ctx;
use crate::table::writer::write_dataset_tsv;

/// Writes `<name>.cleaned.tsv` and, where one exists, `<name>.log2fc.tsv`
/// for every dataset that is not waiting on a decision.
pub fn write_tables(ctx: &Ctx) -> Result<()> {
    for entry in &ctx.qc {
        let Some(cleaned) = &entry.cleaned else {
            continue;
        };
        let path = ctx.output.cleaned_tsv(&entry.name);
        write_dataset_tsv(&path, cleaned)?;
        info!(dataset = %entry.name, path = %path.display(), "cleaned_tsv_written");

        if let Some(table) = ctx.log_table_for(&entry.name) {
            let path = ctx.output.log_tsv(&entry.name);
            write_log_table(&path, table)?;
            info!(dataset = %entry.name, path = %path.display(), "log_tsv_written");
        }
    }
    Ok(())
}

pub fn write_log_table(path: &Path, table: &LogTable) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    for col in &table.columns {
        ensure_len(col.values.len(), table.genes.len(), &col.name)?;
    }

    write!(w, "{}", table.index_name)?;
    for col in &table.columns {
        write!(w, "\t{}", col.name)?;
    }
    writeln!(w)?;

    for (i, gene) in table.genes.iter().enumerate() {
        write!(w, "{}", gene)?;
        for col in &table.columns {
            write!(w, "\t{}", format_value(col.values[i]))?;
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NA".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else {
        format!("{:.6}", v)
    }
}

fn ensure_len(got: usize, expected: usize, name: &str) -> Result<()> {
    if got != expected {
        bail!("{} length mismatch: {} != {}", name, got, expected);
    }
    Ok(())
}
