use serde::{Deserialize, Serialize};

use crate::symbols::patterns::{duration, versus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTokens {
    pub tokens: Vec<String>,
    pub is_time_series: bool,
}

/// Folds column headers of datasets, in upload order, into one token list.
///
/// The comparison ("X vs Y") scan only runs for a dataset when no token of
/// any kind has been found so far; the first time that happens the session is
/// marked as not time-series, and that is never undone.
#[derive(Debug, Clone)]
pub struct TokenScanner {
    tokens: Vec<String>,
    is_time_series: bool,
}

impl Default for TokenScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenScanner {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            is_time_series: true,
        }
    }

    pub fn scan<S: AsRef<str>>(&mut self, columns: &[S]) {
        for col in columns {
            if let Some(token) = duration_token(col.as_ref()) {
                self.push(token);
            }
        }
        if !self.tokens.is_empty() {
            return;
        }

        self.is_time_series = false;
        for col in columns {
            for token in versus_tokens(col.as_ref()) {
                self.push(token);
            }
        }
    }

    pub fn is_time_series(&self) -> bool {
        self.is_time_series
    }

    pub fn finish(self) -> ComparisonTokens {
        ComparisonTokens {
            tokens: self.tokens,
            is_time_series: self.is_time_series,
        }
    }

    fn push(&mut self, token: String) {
        if !self.tokens.contains(&token) {
            self.tokens.push(token);
        }
    }
}

pub fn extract_tokens<'a, I>(column_sets: I) -> ComparisonTokens
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut scanner = TokenScanner::new();
    for columns in column_sets {
        scanner.scan(columns);
    }
    scanner.finish()
}

/// First duration token (`hr6`, `30min`, `D1`, `2day`, ...) in a header.
pub fn duration_token(header: &str) -> Option<String> {
    duration()
        .captures(header)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Every `X_vs_Y` contrast in a header, without its leading separator.
///
/// A separator directly preceded by `adj` is not a valid start, so
/// `adj_pval_A_vs_B` yields `A_vs_B` and never `pval_A_vs_B`.
pub fn versus_tokens(header: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < header.len() {
        let Some(c) = header[pos..].chars().next() else {
            break;
        };
        let is_sep = c == '-' || c == '_' || c.is_whitespace();
        if is_sep && !preceded_by_adj(header, pos) {
            if let Some(m) = versus().find(&header[pos..]) {
                let matched = m.as_str();
                let sep_len = c.len_utf8();
                out.push(matched[sep_len..].to_string());
                pos += m.end().max(sep_len);
                continue;
            }
        }
        pos += c.len_utf8();
    }
    out
}

fn preceded_by_adj(header: &str, pos: usize) -> bool {
    pos >= 3
        && header.is_char_boundary(pos - 3)
        && header[pos - 3..pos].eq_ignore_ascii_case("adj")
}
