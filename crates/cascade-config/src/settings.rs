//! Validated, immutable settings for one run.

use std::fmt;
use std::time::Duration;

use cascade_core::entities::ProjectRef;
use serde::Serialize;

use crate::github::redact;
use crate::locator::parse_project_url;
use crate::{CascadeConfig, ConfigError};

/// Everything a run needs, checked once at startup and passed explicitly.
#[derive(Clone)]
pub struct SyncSettings {
    pub token: String,
    pub api_url: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub page_size: u32,
    pub project: ProjectRef,
    pub field_names: Vec<String>,
    pub ancestor_type: String,
    pub dry_run: bool,
}

/// Printable view of [`SyncSettings`] without the credential.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsSummary {
    pub project: ProjectRef,
    pub api_url: String,
    pub token: &'static str,
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub page_size: u32,
    pub fields: Vec<String>,
    pub ancestor_type: String,
    pub dry_run: bool,
}

impl SyncSettings {
    /// Validate raw configuration into run settings.
    ///
    /// The credential is checked first so a missing token fails before any
    /// other problem is reported.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a missing token or project URL, an invalid
    /// or unsupported project URL, or out-of-range numeric settings.
    pub fn from_config(config: &CascadeConfig) -> Result<Self, ConfigError> {
        if !config.github.is_configured() {
            return Err(ConfigError::MissingCredential);
        }

        let project_url = config.sync.project_url.trim();
        if project_url.is_empty() {
            return Err(ConfigError::NotConfigured {
                key: "sync.project_url".to_string(),
            });
        }
        let project = parse_project_url(project_url)?;

        if config.github.page_size == 0 || config.github.page_size > 100 {
            return Err(ConfigError::InvalidValue {
                field: "github.page_size".to_string(),
                reason: format!("must be between 1 and 100, got {}", config.github.page_size),
            });
        }
        if config.github.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "github.max_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if config.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "github.timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if url::Url::parse(&config.github.api_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "github.api_url".to_string(),
                reason: format!("'{}' is not a URL", config.github.api_url),
            });
        }

        let ancestor_type = match config.sync.ancestor_type.trim() {
            "" => cascade_core::DEFAULT_ANCESTOR_TYPE.to_string(),
            label => label.to_string(),
        };

        Ok(Self {
            token: config.github.token.trim().to_string(),
            api_url: config.github.api_url.clone(),
            timeout: Duration::from_secs(config.github.timeout_secs),
            max_attempts: config.github.max_attempts,
            page_size: config.github.page_size,
            project,
            field_names: config.sync.fields.names(),
            ancestor_type,
            dry_run: config.sync.dry_run,
        })
    }

    #[must_use]
    pub fn summary(&self) -> SettingsSummary {
        SettingsSummary {
            project: self.project.clone(),
            api_url: self.api_url.clone(),
            token: redact(&self.token),
            timeout_secs: self.timeout.as_secs(),
            max_attempts: self.max_attempts,
            page_size: self.page_size,
            fields: self.field_names.clone(),
            ancestor_type: self.ancestor_type.clone(),
            dry_run: self.dry_run,
        }
    }
}

impl fmt::Debug for SyncSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncSettings")
            .field("token", &redact(&self.token))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("page_size", &self.page_size)
            .field("project", &self.project)
            .field("field_names", &self.field_names)
            .field("ancestor_type", &self.ancestor_type)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}
