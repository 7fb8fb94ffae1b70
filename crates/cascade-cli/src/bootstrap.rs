use std::path::Path;

use anyhow::Context;
use cascade_config::{CascadeConfig, SyncOverrides, SyncSettings};

use crate::cli::GlobalFlags;

/// Load `.env`, layer configuration, and validate it into run settings.
pub fn load_settings(
    flags: &GlobalFlags,
    overrides: &SyncOverrides,
) -> anyhow::Result<SyncSettings> {
    load_dotenv(flags.env_file.as_deref())?;

    let config = CascadeConfig::load(overrides).context("failed to load configuration")?;
    let settings = SyncSettings::from_config(&config)?;
    tracing::debug!(?settings, "settings resolved");
    Ok(settings)
}

/// An explicit env file must exist; the implicit `./.env` is optional.
fn load_dotenv(env_file: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = env_file {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load dotenv file at {}", path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}
