use std::path::PathBuf;

use crate::comparisons::{ComparisonGroup, ComparisonTokens, LogTable};
use crate::schema::v1::{DatasetStatus, StagesQcV1};
use crate::session::Session;
use crate::symbols::{PendingDecision, QcPath, ReferenceSymbolTable};
use crate::table::Dataset;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub use_adjusted_pval: bool,
    pub write_json: bool,
    pub write_tsv: bool,
}

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub session_path: Option<PathBuf>,
}

impl OutputPaths {
    pub fn cleaned_tsv(&self, dataset: &str) -> PathBuf {
        self.out_dir.join(format!("{}.cleaned.tsv", dataset))
    }

    pub fn log_tsv(&self, dataset: &str) -> PathBuf {
        self.out_dir.join(format!("{}.log2fc.tsv", dataset))
    }
}

/// Outcome of symbol QC for one dataset.
#[derive(Debug, Clone)]
pub struct DatasetQc {
    pub name: String,
    pub path: QcPath,
    pub status: DatasetStatus,
    pub audit: String,
    pub renamed: Vec<(String, String)>,
    pub warnings: Vec<String>,
    /// Present unless the dataset is waiting on a decision.
    pub cleaned: Option<Dataset>,
    pub groups: Vec<ComparisonGroup>,
}

impl DatasetQc {
    pub fn is_pending(&self) -> bool {
        self.status == DatasetStatus::Pending
    }
}

#[derive(Debug)]
pub struct Ctx {
    pub inputs: Vec<PathBuf>,
    pub reference_path: Option<PathBuf>,
    pub options: RunOptions,
    pub session: Session,
    pub datasets: Vec<Dataset>,
    pub reference: Option<ReferenceSymbolTable>,
    pub classified: Vec<QcPath>,
    pub qc: Vec<DatasetQc>,
    pub tokens: Option<ComparisonTokens>,
    pub log_tables: Vec<LogTable>,
    pub pending: Vec<PendingDecision>,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: StagesQcV1,
}

impl Ctx {
    pub fn new(
        inputs: Vec<PathBuf>,
        out_dir: PathBuf,
        reference_path: Option<PathBuf>,
        session: Session,
        session_path: Option<PathBuf>,
        options: RunOptions,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("stagesqc.json");
        let report = StagesQcV1::empty(tool_version, options.use_adjusted_pval);
        Self {
            inputs,
            reference_path,
            options,
            session,
            datasets: Vec::new(),
            reference: None,
            classified: Vec::new(),
            qc: Vec::new(),
            tokens: None,
            log_tables: Vec::new(),
            pending: Vec::new(),
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                json_path,
                session_path,
            },
            report,
        }
    }

    pub fn qc_for(&self, dataset: &str) -> Option<&DatasetQc> {
        self.qc.iter().find(|q| q.name == dataset)
    }

    pub fn log_table_for(&self, dataset: &str) -> Option<&LogTable> {
        self.log_tables.iter().find(|t| t.dataset == dataset)
    }

    pub fn is_time_series(&self) -> bool {
        self.tokens.as_ref().map(|t| t.is_time_series).unwrap_or(true)
    }
}
