use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::table::Dataset;

pub fn write_dataset_tsv(path: &Path, dataset: &Dataset) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    write!(w, "{}", dataset.index_name)?;
    for col in &dataset.columns {
        write!(w, "\t{}", col)?;
    }
    writeln!(w)?;

    for row in &dataset.rows {
        write!(w, "{}", row.label)?;
        for v in &row.values {
            write!(w, "\t{}", v)?;
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}
