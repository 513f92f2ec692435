use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::ctx::{Ctx, DatasetQc};
use crate::pipeline::Stage;
use crate::schema::v1::DatasetStatus;
use crate::symbols::{QcPath, Resolution, resolve_dataset};

pub struct Stage4Resolve;

impl Stage4Resolve {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Resolve {
    fn name(&self) -> &'static str {
        "stage4_resolve"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let reference = ctx.reference.as_ref().context("reference table missing")?;
        let mut qc = Vec::with_capacity(ctx.datasets.len());
        let mut pending = Vec::new();

        for (dataset, path) in ctx.datasets.iter().zip(&ctx.classified) {
            let mut entry = DatasetQc {
                name: dataset.name.clone(),
                path: path.clone(),
                status: DatasetStatus::Unchanged,
                audit: String::new(),
                renamed: Vec::new(),
                warnings: Vec::new(),
                cleaned: None,
                groups: Vec::new(),
            };
            match resolve_dataset(dataset, path, &ctx.session, reference) {
                Ok(Resolution::Cleaned(cleaned)) => {
                    if !matches!(path, QcPath::Clean) {
                        entry.status = DatasetStatus::Cleaned;
                    }
                    entry.audit = cleaned.audit;
                    entry.renamed = cleaned.renamed;
                    entry.warnings = cleaned.warnings;
                    entry.cleaned = Some(cleaned.dataset);
                }
                Ok(Resolution::Pending(decisions)) => {
                    entry.status = DatasetStatus::Pending;
                    entry.audit = path.labels().join(";");
                    pending.extend(decisions);
                }
                Err(err) => {
                    warn!(dataset = %dataset.name, error = %err, "resolution failed; dataset left unchanged");
                    entry
                        .warnings
                        .push(format!("could not resolve symbols: {}; dataset left unchanged", err));
                    entry.cleaned = Some(dataset.clone());
                }
            }
            info!(
                dataset = %entry.name,
                status = entry.status.as_str(),
                renamed = entry.renamed.len(),
                "dataset_resolved"
            );
            qc.push(entry);
        }

        for decision in &pending {
            ctx.warnings.push(format!(
                "{} is waiting on {}; its tables were not written",
                decision.dataset,
                decision.key.flag()
            ));
        }
        ctx.qc = qc;
        ctx.pending = pending;
        Ok(())
    }
}
