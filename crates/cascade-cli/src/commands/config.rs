use crate::bootstrap;
use crate::cli::{GlobalFlags, SyncArgs};
use crate::output;

/// Handle `cascade config`.
pub fn handle(args: &SyncArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = bootstrap::load_settings(flags, &args.overrides())?;
    output::output(&settings.summary(), flags.format)
}
