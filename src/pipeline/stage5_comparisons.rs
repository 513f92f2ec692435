use anyhow::Result;
use tracing::info;

use crate::comparisons::{TokenScanner, find_groups};
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage5Comparisons;

impl Stage5Comparisons {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Comparisons {
    fn name(&self) -> &'static str {
        "stage5_comparisons"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        // Upload order decides the time-series flag.
        let mut scanner = TokenScanner::new();
        for dataset in &ctx.datasets {
            scanner.scan(&dataset.columns);
        }
        let tokens = scanner.finish();
        if tokens.tokens.is_empty() {
            ctx.warnings
                .push("no comparison tokens found in any input; no log tables produced".to_string());
        }
        info!(
            tokens = tokens.tokens.len(),
            is_time_series = tokens.is_time_series,
            "comparison_tokens_extracted"
        );

        for entry in &mut ctx.qc {
            let Some(cleaned) = &entry.cleaned else {
                continue;
            };
            let scan = find_groups(&cleaned.columns, &tokens.tokens);
            if scan.groups.is_empty() {
                entry
                    .warnings
                    .push("no comparison columns matched any comparison token".to_string());
            }
            entry.warnings.extend(scan.warnings);
            entry.groups = scan.groups;
        }

        ctx.tokens = Some(tokens);
        Ok(())
    }
}
