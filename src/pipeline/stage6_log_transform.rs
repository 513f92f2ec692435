use anyhow::Result;
use tracing::info;

use crate::comparisons::{LogTransformOptions, log_transform};
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage6LogTransform;

impl Stage6LogTransform {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6LogTransform {
    fn name(&self) -> &'static str {
        "stage6_log_transform"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let opts = LogTransformOptions {
            use_adjusted_pval: ctx.options.use_adjusted_pval,
        };
        let mut tables = Vec::new();
        for entry in &mut ctx.qc {
            let Some(cleaned) = &entry.cleaned else {
                continue;
            };
            if entry.groups.is_empty() {
                continue;
            }
            let table = log_transform(cleaned, &entry.groups, opts)?;
            info!(
                dataset = %entry.name,
                genes = table.genes.len(),
                columns = table.columns.len(),
                "log_table_ready"
            );
            entry.warnings.extend(table.warnings.iter().cloned());
            tables.push(table);
        }
        ctx.log_tables = tables;
        Ok(())
    }
}
