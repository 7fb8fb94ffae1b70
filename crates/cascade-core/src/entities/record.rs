use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The parent side of one record's parent link.
///
/// `parent_type` is `None` when the parent has no type or the type could not
/// be read; the ancestor walk treats that as a non-match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ParentLink {
    pub parent_id: Option<String>,
    pub parent_type: Option<String>,
}

impl ParentLink {
    /// A record with no parent.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            parent_id: None,
            parent_type: None,
        }
    }

    #[must_use]
    pub fn to(parent_id: impl Into<String>, parent_type: Option<&str>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            parent_type: parent_type.map(str::to_string),
        }
    }

    /// Whether the parent exists and carries exactly `type_label`.
    #[must_use]
    pub fn parent_matches(&self, type_label: &str) -> bool {
        self.parent_id.is_some() && self.parent_type.as_deref() == Some(type_label)
    }
}
