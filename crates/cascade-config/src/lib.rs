//! # cascade-config
//!
//! Layered configuration loading for Cascade using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Command-line overrides ([`SyncOverrides`])
//! 2. Environment variables (`CASCADE_*` prefix, `__` as separator)
//! 3. Project-level `.cascade/config.toml`
//! 4. User-level `~/.config/cascade/config.toml`
//! 5. `GITHUB_TOKEN` (credential fallback only, ignored when empty)
//! 6. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CASCADE_GITHUB__TOKEN` -> `github.token`,
//! `CASCADE_SYNC__FIELDS` -> `sync.fields`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cascade_config::{CascadeConfig, SyncOverrides, SyncSettings};
//!
//! let config = CascadeConfig::load(&SyncOverrides::default()).expect("config");
//! let settings = SyncSettings::from_config(&config).expect("settings");
//! println!("syncing {}", settings.project);
//! ```

mod error;
mod github;
mod locator;
mod settings;
mod sync;

pub use error::ConfigError;
pub use github::GithubConfig;
pub use locator::parse_project_url;
pub use settings::{SettingsSummary, SyncSettings};
pub use sync::{FieldList, SyncConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CascadeConfig {
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

/// Values supplied on the command line. `None` leaves lower layers in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestor_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl CascadeConfig {
    /// Load configuration from TOML files, environment variables, and overrides.
    pub fn load(overrides: &SyncOverrides) -> Result<Self, ConfigError> {
        Self::figment()
            .merge(Serialized::default("sync", overrides))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain without command-line overrides.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: the token Actions and `gh` already export; any file wins
        if let Some(token) = std::env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
        {
            figment = figment.merge(Serialized::default("github.token", token));
        }

        // Layer 2: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 3: Project-local config
        let local_path = PathBuf::from(".cascade/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 4: Environment variables (highest file/env priority)
        figment.merge(Env::prefixed("CASCADE_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cascade").join("config.toml"))
    }
}
