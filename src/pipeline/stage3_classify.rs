use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::symbols::classify_dataset;

pub struct Stage3Classify;

impl Stage3Classify {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Classify {
    fn name(&self) -> &'static str {
        "stage3_classify"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let reference = ctx.reference.as_ref().context("reference table missing")?;
        let classified: Vec<_> = ctx
            .datasets
            .iter()
            .map(|d| {
                let path = classify_dataset(d, reference);
                info!(
                    dataset = %d.name,
                    qc_path = path.kind().as_str(),
                    flagged = path.labels().len(),
                    "dataset_classified"
                );
                path
            })
            .collect();
        ctx.classified = classified;
        Ok(())
    }
}
