use anyhow::Context;
use cascade_github::GithubClient;
use cascade_sync::SyncDriver;

use crate::bootstrap;
use crate::cli::{GlobalFlags, SyncArgs};
use crate::output;
use crate::progress::SyncProgress;

/// Handle `cascade sync`.
pub async fn handle(args: &SyncArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = bootstrap::load_settings(flags, &args.overrides())?;
    let client = GithubClient::from_settings(&settings).context("failed to build GitHub client")?;

    let progress = SyncProgress::start(&settings.project.to_string());
    let mut driver = SyncDriver::new(&settings, &client).with_observer(&progress);
    let report = match driver.run().await {
        Ok(report) => {
            progress.finish();
            report
        }
        Err(error) => {
            progress.fail("sync aborted");
            return Err(error).with_context(|| format!("sync of {} aborted", settings.project));
        }
    };

    println!("{}", output::render_report(&report, flags.format)?);
    eprintln!("{}", report.confirmation());
    Ok(())
}
