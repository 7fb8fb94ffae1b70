use cascade_config::SyncOverrides;
use clap::{Args, Subcommand};

/// Top-level subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Copy single-select values from ancestor issues onto their descendants.
    Sync(SyncArgs),
    /// Print the JSON Schema of the sync report.
    Schema,
    /// Show the validated settings, with the token redacted.
    Config(SyncArgs),
}

/// Per-run overrides; anything left unset comes from env or config files.
#[derive(Clone, Debug, Default, Args)]
pub struct SyncArgs {
    /// Organization project URL, e.g. https://github.com/orgs/acme/projects/7
    #[arg(long, value_name = "URL")]
    pub project_url: Option<String>,

    /// Comma-separated single-select field names to copy
    #[arg(long, value_name = "NAMES")]
    pub fields: Option<String>,

    /// Issue type that owns the values (default: Initiative)
    #[arg(long, value_name = "LABEL")]
    pub ancestor_type: Option<String>,

    /// Resolve and report without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    #[must_use]
    pub fn overrides(&self) -> SyncOverrides {
        SyncOverrides {
            project_url: self.project_url.clone(),
            fields: self.fields.clone(),
            ancestor_type: self.ancestor_type.clone(),
            dry_run: self.dry_run.then_some(true),
        }
    }
}
