//! Parent link lookup for a single record.

use cascade_core::entities::ParentLink;
use serde::Deserialize;

use crate::client::GithubClient;
use crate::error::GatewayError;
use crate::queries::RECORD_PARENT;

#[derive(Debug, Deserialize)]
struct ParentData {
    node: Option<RecordNode>,
}

/// Non-issue nodes match no fragment and arrive as `{}`.
#[derive(Debug, Deserialize)]
struct RecordNode {
    #[serde(default)]
    parent: Option<ParentNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParentNode {
    id: String,
    #[serde(default)]
    issue_type: Option<IssueTypeNode>,
}

#[derive(Debug, Deserialize)]
struct IssueTypeNode {
    name: Option<String>,
}

fn into_link(data: ParentData, record_id: &str) -> ParentLink {
    let Some(node) = data.node else {
        tracing::debug!(record_id, "record not visible, treating as root");
        return ParentLink::root();
    };
    match node.parent {
        Some(parent) => ParentLink {
            parent_id: Some(parent.id),
            parent_type: parent.issue_type.and_then(|t| t.name),
        },
        None => ParentLink::root(),
    }
}

impl GithubClient {
    /// Fetch the parent of `record_id` and the parent's issue type.
    ///
    /// A failure to read only the parent's type is reported as an untyped
    /// parent rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the lookup itself fails.
    pub async fn fetch_record_parent(&self, record_id: &str) -> Result<ParentLink, GatewayError> {
        let variables = serde_json::json!({ "id": record_id });
        let (data, errors) = self
            .execute::<ParentData>("record_parent", RECORD_PARENT, variables)
            .await?
            .into_partial_data()?;
        for error in &errors {
            tracing::debug!(record_id, message = %error.message, "partial parent lookup");
        }
        Ok(into_link(data, record_id))
    }
}
