//! Project schema lookup.

use cascade_core::entities::{FieldOption, ProjectField, ProjectRef, ProjectSchema};
use cascade_core::enums::FieldKind;
use serde::Deserialize;

use crate::client::GithubClient;
use crate::error::GatewayError;
use crate::queries::PROJECT_SCHEMA;
use crate::wire::{Nodes, OrganizationData};

#[derive(Debug, Deserialize)]
struct SchemaProject {
    id: String,
    fields: Nodes<FieldNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldNode {
    id: Option<String>,
    name: Option<String>,
    data_type: Option<String>,
    #[serde(default)]
    options: Vec<OptionNode>,
}

#[derive(Debug, Deserialize)]
struct OptionNode {
    id: String,
    name: String,
}

/// Map a `ProjectV2FieldType` value onto a [`FieldKind`].
fn field_kind(data_type: &str) -> FieldKind {
    match data_type {
        "SINGLE_SELECT" => FieldKind::SingleSelect,
        "TEXT" => FieldKind::Text,
        "NUMBER" => FieldKind::Number,
        "DATE" => FieldKind::Date,
        "ITERATION" => FieldKind::Iteration,
        _ => FieldKind::Other,
    }
}

fn into_schema(
    data: OrganizationData<SchemaProject>,
    project: &ProjectRef,
) -> Result<ProjectSchema, GatewayError> {
    let organization = data.organization.ok_or_else(|| GatewayError::NotFound {
        what: format!("organization '{}'", project.org),
    })?;
    let remote = organization.project.ok_or_else(|| GatewayError::NotFound {
        what: format!("project {project}"),
    })?;

    let fields = remote
        .fields
        .into_present()
        .filter_map(|node| {
            let (Some(id), Some(name)) = (node.id, node.name) else {
                return None;
            };
            Some(ProjectField {
                id,
                name,
                kind: node.data_type.as_deref().map_or(FieldKind::Other, field_kind),
                options: node
                    .options
                    .into_iter()
                    .map(|o| FieldOption {
                        id: o.id,
                        name: o.name,
                    })
                    .collect(),
            })
        })
        .collect();

    Ok(ProjectSchema {
        project_id: remote.id,
        fields,
    })
}

impl GithubClient {
    /// Fetch the project node id and its fields.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the organization or project is
    /// not visible to the token, or any transport/GraphQL error.
    pub async fn fetch_project_schema(
        &self,
        project: &ProjectRef,
    ) -> Result<ProjectSchema, GatewayError> {
        let variables = serde_json::json!({ "org": project.org, "number": project.number });
        let data = self
            .execute::<OrganizationData<SchemaProject>>("project_schema", PROJECT_SCHEMA, variables)
            .await?
            .into_data()?;
        into_schema(data, project)
    }
}
