use std::collections::HashSet;

use anyhow::{Result, bail};
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::table::reader::read_dataset;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.inputs.is_empty() {
            bail!("at least one --input table is required");
        }

        let mut names = HashSet::new();
        let mut datasets = Vec::with_capacity(ctx.inputs.len());
        for path in &ctx.inputs {
            let mut dataset = read_dataset(path)?;
            if !names.insert(dataset.name.clone()) {
                bail!(
                    "two inputs share the dataset name '{}'; rename one of the files",
                    dataset.name
                );
            }
            // Dictionary and pattern lookups assume upper-case labels.
            dataset.normalize_labels();
            info!(
                dataset = %dataset.name,
                rows = dataset.len(),
                columns = dataset.columns.len(),
                "dataset_loaded"
            );
            datasets.push(dataset);
        }

        ctx.datasets = datasets;
        Ok(())
    }
}
