//! Eligible field selection.

use cascade_core::entities::{CategoricalField, ProjectSchema};

/// Intersect configured field names with the schema's single-select fields.
///
/// The result follows schema order. Configured names that exist with
/// another kind are dropped at debug level; names the project does not
/// declare at all are warned about.
#[must_use]
pub fn select_eligible(schema: &ProjectSchema, names: &[String]) -> Vec<CategoricalField> {
    for name in names {
        if schema.field_named(name).is_none() {
            tracing::warn!(field = %name, "configured field does not exist in project");
        }
    }

    schema
        .fields
        .iter()
        .filter(|field| names.iter().any(|name| *name == field.name))
        .filter_map(|field| {
            let categorical = field.as_categorical();
            if categorical.is_none() {
                tracing::debug!(field = %field.name, kind = %field.kind, "excluding non-categorical field");
            }
            categorical
        })
        .collect()
}
