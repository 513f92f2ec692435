use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::io::open_maybe_gz;
use crate::table::Dataset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
}

impl TableFormat {
    /// Detects the delimiter from the file name, looking through a `.gz` suffix.
    pub fn detect(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".csv") {
            Ok(Self::Csv)
        } else if name.ends_with(".tsv") || name.ends_with(".txt") {
            Ok(Self::Tsv)
        } else if name.ends_with(".xlsx") || name.ends_with(".xls") {
            bail!(
                "{}: spreadsheet input is not supported; export each sheet as CSV or TSV",
                path.display()
            )
        } else {
            bail!(
                "{}: unrecognised table extension (expected .csv, .tsv or .txt)",
                path.display()
            )
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }
}

/// Dataset name: the file name up to its first `.`.
pub fn dataset_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    match file_name.split_once('.') {
        Some((head, _)) if !head.is_empty() => head.to_string(),
        _ => file_name.to_string(),
    }
}

pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let format = TableFormat::detect(path)?;
    let source = open_maybe_gz(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse_dataset(source, format, &dataset_name(path))
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_dataset<R: Read>(source: R, format: TableFormat, name: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let header = reader.headers()?.clone();
    if header.len() < 2 {
        bail!("header needs an index column and at least one data column");
    }
    let index_name = header.get(0).unwrap_or_default().trim().to_string();
    let columns: Vec<String> = header.iter().skip(1).map(|c| c.trim().to_string()).collect();

    let mut dataset = Dataset::new(name, index_name, columns);
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let label = record.get(0).unwrap_or_default().to_string();
        let values: Vec<String> = record.iter().skip(1).map(|v| v.to_string()).collect();
        dataset
            .push_row(label, values)
            .with_context(|| format!("data line {}", i + 2))?;
    }

    if dataset.is_empty() {
        bail!("no data rows");
    }
    Ok(dataset)
}
