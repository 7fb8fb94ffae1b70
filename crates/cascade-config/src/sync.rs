//! What to synchronize: project, fields, ancestor type.

use serde::{Deserialize, Serialize};

fn default_ancestor_type() -> String {
    cascade_core::DEFAULT_ANCESTOR_TYPE.to_string()
}

/// Field names, given either as a comma-separated string (environment style)
/// or as a TOML array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum FieldList {
    Csv(String),
    List(Vec<String>),
}

impl Default for FieldList {
    fn default() -> Self {
        Self::Csv(String::new())
    }
}

impl FieldList {
    /// Trimmed, non-empty, de-duplicated names in their given order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Self::Csv(csv) => csv.split(',').collect(),
            Self::List(list) => list.iter().map(String::as_str).collect(),
        };

        let mut names: Vec<String> = Vec::with_capacity(raw.len());
        for name in raw.into_iter().map(str::trim).filter(|n| !n.is_empty()) {
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
        names
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Project URL, e.g. `https://github.com/orgs/acme/projects/7`.
    #[serde(default)]
    pub project_url: String,

    /// Single-select fields to copy from the ancestor.
    #[serde(default)]
    pub fields: FieldList,

    /// Issue type name that marks an ancestor.
    #[serde(default = "default_ancestor_type")]
    pub ancestor_type: String,

    /// Report planned updates without mutating anything.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            project_url: String::new(),
            fields: FieldList::default(),
            ancestor_type: default_ancestor_type(),
            dry_run: false,
        }
    }
}
