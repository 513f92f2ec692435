//! Comparison tokens, column groups and the log2FC / -log10(p) transform.

pub mod columns;
pub mod log_transform;
pub mod tokens;

pub use columns::{ColumnKind, ComparisonGroup, GroupScan, column_kind, find_groups, header_contains_token};
pub use log_transform::{
    LogColumn, LogTable, LogTransformOptions, log_transform, log2_fold_change, negative_log10,
};
pub use tokens::{ComparisonTokens, TokenScanner, duration_token, extract_tokens, versus_tokens};
