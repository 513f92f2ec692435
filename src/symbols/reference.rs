use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Deprecated gene symbol → current HGNC-approved symbol.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSymbolTable {
    pub source: String,
    map: BTreeMap<String, String>,
}

impl ReferenceSymbolTable {
    pub fn builtin() -> Result<Self> {
        let content = include_str!("../../assets/reference/hgnc_symbol_check.csv");
        parse_reference_csv(content, "built-in reference")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read reference table {}", path.display()))?;
        parse_reference_csv(&content, &path.display().to_string())
    }

    pub fn from_pairs<I, K, V>(source: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self {
            source: source.to_string(),
            map: BTreeMap::new(),
        };
        for (previous, current) in pairs {
            table.insert(previous.into(), current.into());
        }
        table
    }

    pub fn current_symbol(&self, symbol: &str) -> Option<&str> {
        self.map
            .get(&symbol.trim().to_uppercase())
            .map(|s| s.as_str())
    }

    pub fn is_deprecated(&self, symbol: &str) -> bool {
        self.current_symbol(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlays `user` on top of `self`; user entries win.
    pub fn merge(mut self, user: ReferenceSymbolTable) -> Self {
        if user.is_empty() {
            return self;
        }
        for (previous, current) in user.map {
            self.map.insert(previous, current);
        }
        self.source = format!("{} + {}", self.source, user.source);
        self
    }

    fn insert(&mut self, previous: String, current: String) -> bool {
        let previous = previous.trim().to_uppercase();
        let current = current.trim().to_string();
        if previous.is_empty() || current.is_empty() || previous == current.to_uppercase() {
            return false;
        }
        if self.map.contains_key(&previous) {
            return false;
        }
        self.map.insert(previous, current);
        true
    }
}

/// Parses an HGNC symbol-checker export.
///
/// The first line is a banner and is discarded; the second line carries the
/// real column labels (`Input`, `Match type`, `Approved symbol`, ...).
fn parse_reference_csv(content: &str, source: &str) -> Result<ReferenceSymbolTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());
    let mut records = reader.records();

    match records.next() {
        Some(banner) => {
            banner.with_context(|| format!("{}: unreadable banner line", source))?;
        }
        None => bail!("{}: empty reference table", source),
    }
    let header = match records.next() {
        Some(h) => h.with_context(|| format!("{}: unreadable header line", source))?,
        None => bail!("{}: missing header line", source),
    };

    let labels: Vec<String> = header.iter().map(|h| h.trim().to_ascii_lowercase()).collect();
    let input_col = labels.iter().position(|h| h == "input").unwrap_or(0);
    let approved_col = labels
        .iter()
        .position(|h| h == "approved symbol")
        .or_else(|| {
            labels
                .iter()
                .enumerate()
                .position(|(i, h)| i != input_col && h != "match type")
        })
        .with_context(|| format!("{}: no approved-symbol column", source))?;

    let mut table = ReferenceSymbolTable {
        source: source.to_string(),
        map: BTreeMap::new(),
    };
    for (idx, record) in records.enumerate() {
        let line_no = idx + 3;
        let record = record.with_context(|| format!("{}:{} malformed row", source, line_no))?;
        let previous = record.get(input_col).unwrap_or_default();
        let current = record.get(approved_col).unwrap_or_default();
        table.insert(previous.to_string(), current.to_string());
    }
    Ok(table)
}
