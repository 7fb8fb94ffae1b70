//! In-memory [`ProjectGateway`] with call accounting.
//!
//! Backs the sync engine tests. Items are served in insertion order, in
//! pages of a configurable size; every parent lookup and mutation is
//! recorded.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use cascade_core::entities::{ItemPage, ParentLink, ProjectRef, ProjectSchema, TrackedItem};

use crate::error::GatewayError;
use crate::gateway::ProjectGateway;

/// One recorded `set_item_field_option` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    pub project_id: String,
    pub item_id: String,
    pub field_id: String,
    pub option_id: String,
}

#[derive(Debug, Clone)]
struct MemoryRecord {
    parent_id: Option<String>,
    type_label: Option<String>,
}

#[derive(Debug, Default)]
struct CallLog {
    schema_loads: u32,
    item_pages: u32,
    parent_fetches: Vec<String>,
    mutations: Vec<Mutation>,
}

pub struct MemoryGateway {
    schema: Option<ProjectSchema>,
    items: Mutex<Vec<TrackedItem>>,
    records: HashMap<String, MemoryRecord>,
    page_size: usize,
    rejected_fields: HashSet<String>,
    failing_records: HashSet<String>,
    calls: Mutex<CallLog>,
}

impl MemoryGateway {
    #[must_use]
    pub fn new(schema: ProjectSchema) -> Self {
        Self {
            schema: Some(schema),
            items: Mutex::new(Vec::new()),
            records: HashMap::new(),
            page_size: 100,
            rejected_fields: HashSet::new(),
            failing_records: HashSet::new(),
            calls: Mutex::new(CallLog::default()),
        }
    }

    /// A gateway whose project does not exist.
    #[must_use]
    pub fn without_project() -> Self {
        Self {
            schema: None,
            ..Self::new(ProjectSchema {
                project_id: String::new(),
                fields: Vec::new(),
            })
        }
    }

    #[must_use]
    pub fn with_item(self, item: TrackedItem) -> Self {
        lock(&self.items).push(item);
        self
    }

    /// Register a record, its parent, and its own type label.
    #[must_use]
    pub fn with_record(mut self, id: &str, parent_id: Option<&str>, type_label: Option<&str>) -> Self {
        self.records.insert(
            id.to_string(),
            MemoryRecord {
                parent_id: parent_id.map(str::to_string),
                type_label: type_label.map(str::to_string),
            },
        );
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Mutations on `field_id` fail with a GraphQL error.
    #[must_use]
    pub fn rejecting_field(mut self, field_id: &str) -> Self {
        self.rejected_fields.insert(field_id.to_string());
        self
    }

    /// Parent lookups of `record_id` fail with a server error.
    #[must_use]
    pub fn failing_record(mut self, record_id: &str) -> Self {
        self.failing_records.insert(record_id.to_string());
        self
    }

    #[must_use]
    pub fn schema_loads(&self) -> u32 {
        lock(&self.calls).schema_loads
    }

    #[must_use]
    pub fn item_pages(&self) -> u32 {
        lock(&self.calls).item_pages
    }

    /// Record ids passed to `record_parent`, in call order.
    #[must_use]
    pub fn parent_fetches(&self) -> Vec<String> {
        lock(&self.calls).parent_fetches.clone()
    }

    #[must_use]
    pub fn mutations(&self) -> Vec<Mutation> {
        lock(&self.calls).mutations.clone()
    }

    /// Current state of an item, including applied mutations.
    #[must_use]
    pub fn item(&self, item_id: &str) -> Option<TrackedItem> {
        lock(&self.items).iter().find(|i| i.id == item_id).cloned()
    }

    fn field_name(&self, field_id: &str) -> Option<String> {
        self.schema
            .as_ref()?
            .fields
            .iter()
            .find(|f| f.id == field_id)
            .map(|f| f.name.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl ProjectGateway for MemoryGateway {
    async fn project_schema(&self, project: &ProjectRef) -> Result<ProjectSchema, GatewayError> {
        lock(&self.calls).schema_loads += 1;
        self.schema.clone().ok_or_else(|| GatewayError::NotFound {
            what: format!("project {project}"),
        })
    }

    async fn list_items_page(
        &self,
        _project: &ProjectRef,
        after: Option<&str>,
    ) -> Result<ItemPage, GatewayError> {
        lock(&self.calls).item_pages += 1;
        let start = match after {
            None => 0,
            Some(cursor) => cursor
                .parse::<usize>()
                .map_err(|_| GatewayError::Parse(format!("bad cursor '{cursor}'")))?,
        };

        let items = lock(&self.items);
        let end = (start + self.page_size).min(items.len());
        let has_next_page = end < items.len();
        Ok(ItemPage {
            items: items.get(start..end).unwrap_or_default().to_vec(),
            end_cursor: has_next_page.then(|| end.to_string()),
            has_next_page,
        })
    }

    async fn record_parent(&self, record_id: &str) -> Result<ParentLink, GatewayError> {
        lock(&self.calls).parent_fetches.push(record_id.to_string());
        if self.failing_records.contains(record_id) {
            return Err(GatewayError::Api {
                status: 500,
                message: format!("lookup of {record_id} failed"),
            });
        }

        let Some(parent_id) = self
            .records
            .get(record_id)
            .and_then(|record| record.parent_id.clone())
        else {
            return Ok(ParentLink::root());
        };
        let parent_type = self
            .records
            .get(&parent_id)
            .and_then(|parent| parent.type_label.clone());
        Ok(ParentLink {
            parent_id: Some(parent_id),
            parent_type,
        })
    }

    async fn set_item_field_option(
        &self,
        project_id: &str,
        item_id: &str,
        field_id: &str,
        option_id: &str,
    ) -> Result<(), GatewayError> {
        lock(&self.calls).mutations.push(Mutation {
            project_id: project_id.to_string(),
            item_id: item_id.to_string(),
            field_id: field_id.to_string(),
            option_id: option_id.to_string(),
        });

        if self.rejected_fields.contains(field_id) {
            return Err(GatewayError::GraphQl {
                messages: vec![format!("field {field_id} rejected the update")],
            });
        }
        let field_name = self.field_name(field_id).ok_or_else(|| GatewayError::NotFound {
            what: format!("field {field_id}"),
        })?;

        let mut items = lock(&self.items);
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| GatewayError::NotFound {
                what: format!("item {item_id}"),
            })?;
        item.field_values.insert(field_name, option_id.to_string());
        Ok(())
    }
}
