//! The data-source seam consumed by the sync engine.

use async_trait::async_trait;
use cascade_core::entities::{ItemPage, ParentLink, ProjectRef, ProjectSchema, TrackedItem};

use crate::error::GatewayError;

/// Reads and writes against the remote project store.
///
/// Every method performs one logical remote operation. Implementations
/// decide their own retry behaviour; callers treat any returned error as
/// final for that call.
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    /// Project node id and declared fields.
    async fn project_schema(&self, project: &ProjectRef) -> Result<ProjectSchema, GatewayError>;

    /// One page of project items, starting after `after`.
    async fn list_items_page(
        &self,
        project: &ProjectRef,
        after: Option<&str>,
    ) -> Result<ItemPage, GatewayError>;

    /// Parent link of one record, including the parent's type label.
    async fn record_parent(&self, record_id: &str) -> Result<ParentLink, GatewayError>;

    /// Select `option_id` in `field_id` on one project item.
    async fn set_item_field_option(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        option_id: &str,
    ) -> Result<(), GatewayError>;

    /// Follow item cursors to exhaustion, preserving load order.
    ///
    /// # Errors
    ///
    /// Propagates page errors, and fails with [`GatewayError::Parse`] if the
    /// store reports another page without a fresh cursor.
    async fn list_all_items(&self, project: &ProjectRef) -> Result<Vec<TrackedItem>, GatewayError> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0_u32;

        loop {
            let page = self.list_items_page(project, cursor.as_deref()).await?;
            pages += 1;
            items.extend(page.items);

            if !page.has_next_page {
                break;
            }
            match page.end_cursor {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                _ => {
                    return Err(GatewayError::Parse(format!(
                        "item pagination did not advance after page {pages}"
                    )));
                }
            }
        }

        tracing::debug!(%project, pages, items = items.len(), "loaded project items");
        Ok(items)
    }
}
