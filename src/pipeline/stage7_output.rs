use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::io::{json_writer, tsv_writer};
use crate::pipeline::Stage;

pub struct Stage7Output;

impl Stage7Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage7Output {
    fn name(&self) -> &'static str {
        "stage7_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let report = json_writer::build_report(ctx)?;
        ctx.report = report;

        if ctx.options.write_json {
            json_writer::write_json(&ctx.output.json_path, &ctx.report)?;
        }
        if ctx.options.write_tsv {
            tsv_writer::write_tables(ctx)?;
        }
        if let Some(path) = &ctx.output.session_path {
            ctx.session.write(path)?;
            info!(session = %path.display(), "session_saved");
        }

        info!(pending = ctx.pending.len(), "stage7_output_ready");
        Ok(())
    }
}
