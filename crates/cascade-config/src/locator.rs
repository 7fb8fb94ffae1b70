//! Project URL decomposition.

use cascade_core::entities::ProjectRef;
use url::Url;

use crate::ConfigError;

/// Parse `https://github.com/orgs/<org>/projects/<number>[/...]`.
///
/// Trailing segments such as `/views/3` are ignored.
///
/// # Errors
///
/// [`ConfigError::InvalidLocator`] when the URL is malformed or too short,
/// [`ConfigError::UnsupportedLocator`] when it is not organization-scoped.
pub fn parse_project_url(raw: &str) -> Result<ProjectRef, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidLocator {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    if segments.len() < 3 {
        return Err(invalid("expected /orgs/<org>/projects/<number>"));
    }
    if segments[0] != "orgs" {
        return Err(ConfigError::UnsupportedLocator {
            url: raw.to_string(),
            scope: segments[0].to_string(),
        });
    }
    if segments[2] != "projects" {
        return Err(invalid("expected 'projects' after the organization"));
    }

    let number = segments
        .get(3)
        .ok_or_else(|| invalid("missing project number"))?
        .parse::<u32>()
        .map_err(|_| invalid("project number is not a positive integer"))?;

    Ok(ProjectRef::new(segments[1], number))
}
