//! Run report types returned by the sync driver and rendered by `cascade`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::ProjectRef;
use crate::enums::{FieldStatus, RunState, SkipReason};

/// Result of one configured field on one item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FieldOutcome {
    pub field: String,
    #[serde(flatten)]
    pub status: FieldStatus,
}

/// Whether an item reached the field sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Synced,
    Skipped,
}

/// Per-item entry of the run report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemReport {
    pub item_id: String,
    pub record_id: Option<String>,
    pub ancestor_record_id: Option<String>,
    pub status: ItemStatus,
    /// Set when `status` is `skipped`.
    pub skip: Option<SkipReason>,
    #[serde(default)]
    pub fields: Vec<FieldOutcome>,
}

impl ItemReport {
    #[must_use]
    pub fn skipped(
        item_id: &str,
        record_id: Option<&str>,
        ancestor_record_id: Option<&str>,
        reason: SkipReason,
    ) -> Self {
        Self {
            item_id: item_id.to_string(),
            record_id: record_id.map(str::to_string),
            ancestor_record_id: ancestor_record_id.map(str::to_string),
            status: ItemStatus::Skipped,
            skip: Some(reason),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn synced(
        item_id: &str,
        record_id: &str,
        ancestor_record_id: &str,
        fields: Vec<FieldOutcome>,
    ) -> Self {
        Self {
            item_id: item_id.to_string(),
            record_id: Some(record_id.to_string()),
            ancestor_record_id: Some(ancestor_record_id.to_string()),
            status: ItemStatus::Synced,
            skip: None,
            fields,
        }
    }
}

/// Aggregate counters over all item reports.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncTotals {
    pub items_seen: u32,
    pub items_synced: u32,
    pub items_skipped: u32,
    pub fields_updated: u32,
    pub fields_planned: u32,
    pub fields_skipped: u32,
    pub fields_rejected: u32,
}

impl SyncTotals {
    #[must_use]
    pub fn tally(items: &[ItemReport]) -> Self {
        let mut totals = Self::default();
        for item in items {
            totals.items_seen += 1;
            match item.status {
                ItemStatus::Synced => totals.items_synced += 1,
                ItemStatus::Skipped => totals.items_skipped += 1,
            }
            for outcome in &item.fields {
                match outcome.status {
                    FieldStatus::Updated { .. } => totals.fields_updated += 1,
                    FieldStatus::Planned { .. } => totals.fields_planned += 1,
                    FieldStatus::SkippedNoAncestorValue => totals.fields_skipped += 1,
                    FieldStatus::Rejected { .. } => totals.fields_rejected += 1,
                }
            }
        }
        totals
    }
}

/// Response of `cascade sync`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SyncReport {
    pub project: ProjectRef,
    pub project_id: String,
    pub ancestor_type: String,
    /// Names of the fields that passed eligibility, in schema order.
    pub fields: Vec<String>,
    pub dry_run: bool,
    pub state: RunState,
    pub items: Vec<ItemReport>,
    pub totals: SyncTotals,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    /// One-line trailing confirmation printed after a completed run.
    #[must_use]
    pub fn confirmation(&self) -> String {
        let verb = if self.dry_run { "planned" } else { "updated" };
        let changed = if self.dry_run {
            self.totals.fields_planned
        } else {
            self.totals.fields_updated
        };
        format!(
            "Synced {project}: {changed} field value(s) {verb} across {synced} item(s); {skipped} of {seen} item(s) skipped",
            project = self.project,
            synced = self.totals.items_synced,
            skipped = self.totals.items_skipped,
            seen = self.totals.items_seen,
        )
    }
}
