//! Paginated project item listing.

use std::collections::BTreeMap;

use cascade_core::entities::{ItemPage, ProjectRef, TrackedItem};
use serde::Deserialize;

use crate::client::GithubClient;
use crate::error::GatewayError;
use crate::queries::PROJECT_ITEMS;
use crate::wire::{Nodes, OrganizationData};

#[derive(Debug, Deserialize)]
struct ItemsProject {
    items: ItemConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemConnection {
    page_info: PageInfo,
    #[serde(default = "Vec::new")]
    nodes: Vec<Option<ItemNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemNode {
    id: String,
    content: Option<ContentNode>,
    field_values: Nodes<FieldValueNode>,
}

/// Only issues expose an `id` through the query's inline fragment; drafts
/// and pull requests arrive as `{}`.
#[derive(Debug, Deserialize)]
struct ContentNode {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldValueNode {
    option_id: Option<String>,
    field: Option<FieldRef>,
}

#[derive(Debug, Deserialize)]
struct FieldRef {
    name: Option<String>,
}

fn into_item(node: ItemNode) -> TrackedItem {
    let field_values: BTreeMap<String, String> = node
        .field_values
        .into_present()
        .filter_map(|value| {
            let name = value.field?.name?;
            Some((name, value.option_id?))
        })
        .collect();

    TrackedItem {
        id: node.id,
        record_id: node.content.and_then(|content| content.id),
        field_values,
    }
}

fn into_page(
    data: OrganizationData<ItemsProject>,
    project: &ProjectRef,
) -> Result<ItemPage, GatewayError> {
    let remote = data
        .organization
        .and_then(|org| org.project)
        .ok_or_else(|| GatewayError::NotFound {
            what: format!("project {project}"),
        })?;

    Ok(ItemPage {
        items: remote
            .items
            .nodes
            .into_iter()
            .flatten()
            .map(into_item)
            .collect(),
        end_cursor: remote.items.page_info.end_cursor,
        has_next_page: remote.items.page_info.has_next_page,
    })
}

impl GithubClient {
    /// Fetch one page of project items.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, GraphQL, or parse failures.
    pub async fn fetch_items_page(
        &self,
        project: &ProjectRef,
        after: Option<&str>,
    ) -> Result<ItemPage, GatewayError> {
        let variables = serde_json::json!({
            "org": project.org,
            "number": project.number,
            "first": self.page_size,
            "after": after,
        });
        let data = self
            .execute::<OrganizationData<ItemsProject>>("project_items", PROJECT_ITEMS, variables)
            .await?
            .into_data()?;
        let page = into_page(data, project)?;
        tracing::trace!(
            %project,
            after = after.unwrap_or("<start>"),
            items = page.items.len(),
            "fetched item page"
        );
        Ok(page)
    }
}
