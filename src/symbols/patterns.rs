use std::sync::OnceLock;

use regex::Regex;

/// `MAR-01`, `Sept_3`, `01-Dec` and friends.
pub fn named_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:MAR|APR|SEPT|SEP|OCT|DEC)[-_]\d+|^\d+[-_](?:MAR|APR|SEPT|SEP|OCT|DEC)")
            .expect("valid regex")
    })
}

/// Leading digits followed by a date separator, e.g. `3/1/2019`, `2001-03-09`.
pub fn numeric_date() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+[-/.]").expect("valid regex"))
}

/// First duration token in a column header, bounded by separators or the header edges.
pub fn duration() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?:^|[-_\s.])(min\d*\.?\d+|\d*\.?\d+min|hr\d*\.?\d+|\d*\.?\d+hr?|d(?:ay)?\d*\.?\d+|\d*\.?\d+d(?:ay)?)(?:$|[-_\s.])",
        )
        .expect("valid regex")
    })
}

/// `<sep>X<sep>vs<sep>Y`, anchored at the start of the haystack.
pub fn versus() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[-_\s]\w*\d*[-_\s]vs[-_\s]\w*\d*").expect("valid regex"))
}

pub fn ratio_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^ratio[-_\s.]").expect("valid regex"))
}

pub fn log2fc_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^log2(?:fold[-_\s]?changes?|fc)[-_\s.]").expect("valid regex"))
}

pub fn pval_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^p[-_.]?val(?:ue)?[-_\s.]").expect("valid regex"))
}

pub fn adj_pval_column() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^adj[-_\s.]?p[-_.]?val(?:ue)?[-_\s.]").expect("valid regex"))
}

/// Trailing occurrence suffix added by the date resolver, e.g. `_2nd`.
pub fn occurrence_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)_\d+(?:st|nd|rd|th)$").expect("valid regex"))
}

pub fn is_named_date(label: &str) -> bool {
    named_date().is_match(label)
}

pub fn is_numeric_date(label: &str) -> bool {
    numeric_date().is_match(label)
}

/// A named date that already carries its occurrence suffix.
pub fn is_occurrence_key(label: &str) -> bool {
    is_named_date(label) && occurrence_suffix().is_match(label)
}
