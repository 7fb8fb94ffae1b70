use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FieldKind;

/// One selectable value of a single-select field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldOption {
    pub id: String,
    pub name: String,
}

/// A field as declared by the project schema, of any kind.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectField {
    pub id: String,
    pub name: String,
    pub kind: FieldKind,
    /// Options in schema order. Empty for non-categorical kinds.
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

impl ProjectField {
    /// View this field as categorical, if its kind allows it.
    #[must_use]
    pub fn as_categorical(&self) -> Option<CategoricalField> {
        self.kind.is_categorical().then(|| CategoricalField {
            id: self.id.clone(),
            name: self.name.clone(),
            options: self.options.clone(),
        })
    }
}

/// A single-select field eligible for synchronization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CategoricalField {
    pub id: String,
    pub name: String,
    pub options: Vec<FieldOption>,
}

impl CategoricalField {
    /// Label of the option with `option_id`, if the schema knows it.
    #[must_use]
    pub fn option_label(&self, option_id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.id == option_id)
            .map(|option| option.name.as_str())
    }
}

/// Project identity plus its declared fields.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectSchema {
    /// Opaque project node id used by mutations.
    pub project_id: String,
    pub fields: Vec<ProjectField>,
}

impl ProjectSchema {
    #[must_use]
    pub fn field_named(&self, name: &str) -> Option<&ProjectField> {
        self.fields.iter().find(|field| field.name == name)
    }
}
