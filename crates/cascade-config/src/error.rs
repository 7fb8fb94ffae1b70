//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A required configuration value is not set.
    #[error("Configuration value '{key}' is not set")]
    NotConfigured { key: String },

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// No access token for the remote store.
    #[error("no GitHub token configured (set CASCADE_GITHUB__TOKEN or GITHUB_TOKEN)")]
    MissingCredential,

    /// The project URL cannot be decomposed into an organization project.
    #[error("invalid project URL '{url}': {reason}")]
    InvalidLocator { url: String, reason: String },

    /// The project URL is well-formed but not organization-scoped.
    #[error("unsupported project URL '{url}': only organization projects (/orgs/...) are supported, got /{scope}/...")]
    UnsupportedLocator { url: String, scope: String },
}
