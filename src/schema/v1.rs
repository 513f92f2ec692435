use serde::{Deserialize, Serialize};

use crate::symbols::QcPathKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetStatus {
    Cleaned,
    Unchanged,
    Pending,
}

impl DatasetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cleaned => "cleaned",
            Self::Unchanged => "unchanged",
            Self::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMeta {
    pub source: String,
    pub entries: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOptionsMeta {
    pub use_adjusted_pval: bool,
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenamedLabel {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonColumns {
    pub comparison: String,
    pub token: String,
    pub ratio: Option<String>,
    pub log2fc: Option<String>,
    pub pval: Option<String>,
    pub adj_pval: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub name: String,
    pub rows: u64,
    pub qc_path: QcPathKind,
    pub status: DatasetStatus,
    pub audit: String,
    pub renamed: Vec<RenamedLabel>,
    pub comparisons: Vec<ComparisonColumns>,
    pub log_columns: Vec<String>,
    pub log_table_tsv_path: Option<String>,
    pub cleaned_tsv_path: Option<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingRow {
    pub label: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingReport {
    pub dataset: String,
    pub key: String,
    pub flag: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub columns: Vec<String>,
    pub rows: Vec<PendingRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparisons {
    pub tokens: Vec<String>,
    pub is_time_series: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagesQcV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub options: RunOptionsMeta,
    pub reference: Option<ReferenceMeta>,
    pub datasets: Vec<DatasetReport>,
    pub comparisons: Comparisons,
    pub pending: Vec<PendingReport>,
    pub warnings: Vec<String>,
}

impl StagesQcV1 {
    pub fn empty(tool_version: &str, use_adjusted_pval: bool) -> Self {
        Self {
            tool: "kira-stagesqc".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            options: RunOptionsMeta {
                use_adjusted_pval,
                inputs: Vec::new(),
            },
            reference: None,
            datasets: Vec::new(),
            comparisons: Comparisons {
                tokens: Vec::new(),
                is_time_series: true,
            },
            pending: Vec::new(),
            warnings: Vec::new(),
        }
    }
}
