//! Sync engine error types.

use cascade_core::errors::CoreError;
use cascade_github::GatewayError;
use thiserror::Error;

/// Fatal conditions that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The project declares no fields at all.
    #[error("project {project} declares no fields")]
    EmptySchema { project: String },

    /// The project schema could not be loaded.
    #[error("could not load project schema: {0}")]
    SchemaUnavailable(#[source] GatewayError),

    /// None of the configured names is a single-select field of the project.
    #[error(
        "no eligible single-select fields among configured names [{}]",
        configured.join(", ")
    )]
    NoEligibleFields { configured: Vec<String> },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
