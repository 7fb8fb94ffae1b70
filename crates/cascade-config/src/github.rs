//! Remote store (GitHub GraphQL API) connection settings.

use std::fmt;

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_page_size() -> u32 {
    100
}

fn default_api_url() -> String {
    "https://api.github.com/graphql".to_string()
}

#[derive(Clone, Deserialize, Serialize)]
pub struct GithubConfig {
    /// Access token. Falls back to `GITHUB_TOKEN` when unset.
    #[serde(default)]
    pub token: String,

    /// GraphQL endpoint (override for GitHub Enterprise Server).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts per call, including the first. `1` disables retries.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Items requested per page (GitHub caps this at 100).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl GithubConfig {
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            page_size: default_page_size(),
        }
    }
}

impl fmt::Debug for GithubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GithubConfig")
            .field("token", &redact(&self.token))
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_attempts", &self.max_attempts)
            .field("page_size", &self.page_size)
            .finish()
    }
}

pub(crate) fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GithubConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.api_url, "https://api.github.com/graphql");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn whitespace_token_is_not_configured() {
        let config = GithubConfig {
            token: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn debug_never_prints_token() {
        let config = GithubConfig {
            token: "ghp_supersecret".into(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("ghp_supersecret"));
        assert!(debug.contains("<redacted>"));
    }
}
