//! Response shapes shared by several operations.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct OrganizationData<P> {
    pub organization: Option<Organization<P>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Organization<P> {
    #[serde(rename = "projectV2")]
    pub project: Option<P>,
}

/// Connection `nodes`; GitHub may return `null` entries.
#[derive(Debug, Deserialize)]
pub(crate) struct Nodes<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

impl<T> Nodes<T> {
    pub fn into_present(self) -> impl Iterator<Item = T> {
        self.nodes.into_iter().flatten()
    }
}
