use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::schema::v1::ReferenceMeta;
use crate::symbols::ReferenceSymbolTable;

pub struct Stage2Reference;

impl Stage2Reference {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Reference {
    fn name(&self) -> &'static str {
        "stage2_reference"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let reference = load_reference(ctx.reference_path.as_deref())?;
        info!(
            source = %reference.source,
            entries = reference.len(),
            "reference_loaded"
        );
        ctx.report.reference = Some(ReferenceMeta {
            source: reference.source.clone(),
            entries: reference.len() as u64,
        });
        ctx.reference = Some(reference);
        Ok(())
    }
}

/// Built-in table, overlaid with a user CSV when one is given.
pub fn load_reference(user: Option<&std::path::Path>) -> Result<ReferenceSymbolTable> {
    let builtin = ReferenceSymbolTable::builtin()?;
    match user {
        Some(path) => Ok(builtin.merge(ReferenceSymbolTable::load(path)?)),
        None => Ok(builtin),
    }
}
