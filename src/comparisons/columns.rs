use serde::Serialize;

use crate::symbols::patterns::{adj_pval_column, log2fc_column, pval_column, ratio_column};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Ratio,
    Log2Fc,
    PValue,
    AdjPValue,
}

/// Kind of a comparison column and the byte offset where its suffix starts.
pub fn column_kind(header: &str) -> Option<(ColumnKind, usize)> {
    let checks = [
        (adj_pval_column(), ColumnKind::AdjPValue),
        (pval_column(), ColumnKind::PValue),
        (ratio_column(), ColumnKind::Ratio),
        (log2fc_column(), ColumnKind::Log2Fc),
    ];
    for (re, kind) in checks {
        if let Some(m) = re.find(header) {
            return Some((kind, m.end()));
        }
    }
    None
}

/// Columns of one dataset that describe the same contrast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonGroup {
    /// Header text after the kind prefix, e.g. `hr6_vs_0`; names the derived columns.
    pub comparison: String,
    /// The comparison token this group was matched to.
    pub token: String,
    pub ratio: Option<usize>,
    pub log2fc: Option<usize>,
    pub pval: Option<usize>,
    pub adj_pval: Option<usize>,
}

impl ComparisonGroup {
    fn new(comparison: String, token: String) -> Self {
        Self {
            comparison,
            token,
            ratio: None,
            log2fc: None,
            pval: None,
            adj_pval: None,
        }
    }

    fn slot(&mut self, kind: ColumnKind) -> &mut Option<usize> {
        match kind {
            ColumnKind::Ratio => &mut self.ratio,
            ColumnKind::Log2Fc => &mut self.log2fc,
            ColumnKind::PValue => &mut self.pval,
            ColumnKind::AdjPValue => &mut self.adj_pval,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupScan {
    pub groups: Vec<ComparisonGroup>,
    pub warnings: Vec<String>,
}

/// Pairs ratio / log2FC / p-value columns by the comparison token they embed.
///
/// A column joins a group only if its header embeds one of `tokens`; the
/// leftmost embedded token wins, so extra descriptive text in a header does
/// not split a comparison. Groups keep first-seen column order, and a second
/// column of the same kind for the same token is ignored. The group's
/// comparison suffix comes from its ratio column, else its log2FC column,
/// else the first column seen.
pub fn find_groups(columns: &[String], tokens: &[String]) -> GroupScan {
    let mut scan = GroupScan::default();
    for (idx, header) in columns.iter().enumerate() {
        let Some((kind, start)) = column_kind(header) else {
            continue;
        };
        let comparison = &header[start..];
        if comparison.is_empty() {
            continue;
        }
        let Some(token) = owning_token(header, tokens) else {
            scan.warnings
                .push(format!("column '{}' matches no comparison token; ignored", header));
            continue;
        };

        let pos = match scan.groups.iter().position(|g| g.token == token) {
            Some(pos) => pos,
            None => {
                scan.groups
                    .push(ComparisonGroup::new(comparison.to_string(), token.to_string()));
                scan.groups.len() - 1
            }
        };
        let slot = scan.groups[pos].slot(kind);
        match *slot {
            Some(first) => scan.warnings.push(format!(
                "column '{}' repeats '{}'; first one kept",
                header, columns[first]
            )),
            None => *slot = Some(idx),
        }
    }

    for group in &mut scan.groups {
        if let Some(suffix) = group
            .ratio
            .or(group.log2fc)
            .and_then(|i| column_suffix(&columns[i]))
        {
            group.comparison = suffix.to_string();
        }
    }
    scan
}

fn column_suffix(header: &str) -> Option<&str> {
    column_kind(header).map(|(_, start)| &header[start..])
}

fn owning_token<'a>(header: &str, tokens: &'a [String]) -> Option<&'a str> {
    tokens
        .iter()
        .filter_map(|t| token_position(header, t).map(|p| (p, t.as_str())))
        .min_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())))
        .map(|(_, t)| t)
}

pub fn header_contains_token(header: &str, token: &str) -> bool {
    token_position(header, token).is_some()
}

/// Case-insensitive position of `token` in `header`, bounded by non-alphanumerics.
fn token_position(header: &str, token: &str) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    let hay = header.to_ascii_lowercase();
    let needle = token.to_ascii_lowercase();
    let bytes = hay.as_bytes();
    let mut from = 0;
    while let Some(rel) = hay[from..].find(&needle) {
        let start = from + rel;
        let end = start + needle.len();
        let left_ok = start == 0 || !bytes[start - 1].is_ascii_alphanumeric();
        let right_ok = end == bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if left_ok && right_ok {
            return Some(start);
        }
        from = start + 1;
        while !hay.is_char_boundary(from) {
            from += 1;
        }
    }
    None
}
