use cascade_core::responses::SyncReport;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output;

/// Handle `cascade schema`. The schema is JSON in every format.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schemars::schema_for!(SyncReport);
    let format = match flags.format {
        OutputFormat::Raw => OutputFormat::Raw,
        OutputFormat::Json | OutputFormat::Table => OutputFormat::Json,
    };
    output::output(&schema, format)
}
