use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A project item wrapping zero-or-one record, with its single-select values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrackedItem {
    pub id: String,
    /// Node id of the linked record. Draft items have none.
    pub record_id: Option<String>,
    /// Field name to selected option id.
    #[serde(default)]
    pub field_values: BTreeMap<String, String>,
}

impl TrackedItem {
    #[must_use]
    pub fn new(id: impl Into<String>, record_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            record_id: record_id.map(str::to_string),
            field_values: BTreeMap::new(),
        }
    }

    /// Builder-style helper used by gateways and tests.
    #[must_use]
    pub fn with_value(mut self, field_name: &str, option_id: &str) -> Self {
        self.field_values
            .insert(field_name.to_string(), option_id.to_string());
        self
    }

    /// Items with no linked record are never resolved or updated.
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.record_id.is_none()
    }

    #[must_use]
    pub fn selected_option(&self, field_name: &str) -> Option<&str> {
        self.field_values.get(field_name).map(String::as_str)
    }
}

/// One page of tracked items plus its continuation cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPage {
    pub items: Vec<TrackedItem>,
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}
