use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An organization-scoped project, identified the way it appears in its URL.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct ProjectRef {
    /// Organization login (e.g. `acme`).
    pub org: String,
    /// Project number within the organization.
    pub number: u32,
}

impl ProjectRef {
    #[must_use]
    pub fn new(org: impl Into<String>, number: u32) -> Self {
        Self {
            org: org.into(),
            number,
        }
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "orgs/{}/projects/{}", self.org, self.number)
    }
}
