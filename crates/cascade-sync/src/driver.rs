//! Run orchestration: schema, field selection, item loading, processing.

use std::collections::HashMap;

use cascade_config::SyncSettings;
use cascade_core::entities::{CategoricalField, TrackedItem};
use cascade_core::enums::{RunState, SkipReason};
use cascade_core::errors::CoreError;
use cascade_core::responses::{ItemReport, SyncReport, SyncTotals};
use cascade_github::ProjectGateway;
use chrono::{DateTime, Utc};

use crate::engine::FieldSyncEngine;
use crate::error::SyncError;
use crate::fields::select_eligible;
use crate::observer::{NoopObserver, SyncObserver};
use crate::resolver::{AncestorResolver, Resolution};

/// Drives one sync run through the [`RunState`] machine.
///
/// A driver runs once. After [`SyncDriver::run`] returns, [`SyncDriver::state`]
/// is either [`RunState::Done`] or [`RunState::Aborted`].
pub struct SyncDriver<'a, G: ProjectGateway + ?Sized> {
    settings: &'a SyncSettings,
    gateway: &'a G,
    observer: &'a dyn SyncObserver,
    state: RunState,
}

/// Items of one run plus the record id index over them.
struct LoadedItems<'i> {
    items: &'i [TrackedItem],
    by_record: HashMap<&'i str, usize>,
}

impl<'i> LoadedItems<'i> {
    fn index(items: &'i [TrackedItem]) -> Self {
        let mut by_record = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if let Some(record_id) = item.record_id.as_deref() {
                by_record.entry(record_id).or_insert(pos);
            }
        }
        Self { items, by_record }
    }

    fn tracking(&self, record_id: &str) -> Option<&'i TrackedItem> {
        self.by_record
            .get(record_id)
            .and_then(|&pos| self.items.get(pos))
    }
}

impl<'a, G: ProjectGateway + ?Sized> SyncDriver<'a, G> {
    pub fn new(settings: &'a SyncSettings, gateway: &'a G) -> Self {
        Self {
            settings,
            gateway,
            observer: &NoopObserver,
            state: RunState::LoadingSchema,
        }
    }

    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn SyncObserver) -> Self {
        self.observer = observer;
        self
    }

    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Execute the run to completion.
    ///
    /// # Errors
    ///
    /// Any fatal condition moves the driver to [`RunState::Aborted`] and is
    /// returned; per-item skips and per-field rejections are not errors.
    pub async fn run(&mut self) -> Result<SyncReport, SyncError> {
        if self.state != RunState::LoadingSchema {
            return Err(CoreError::InvalidTransition {
                from: self.state.to_string(),
                to: RunState::LoadingSchema.to_string(),
            }
            .into());
        }

        let started_at = Utc::now();
        match self.execute(started_at).await {
            Ok(report) => Ok(report),
            Err(e) => {
                tracing::error!(state = %self.state, error = %e, "sync aborted");
                if !self.state.is_terminal() {
                    self.state = RunState::Aborted;
                }
                Err(e)
            }
        }
    }

    fn transition(&mut self, next: RunState) -> Result<(), CoreError> {
        if !self.state.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        if self.state != next {
            tracing::debug!(from = %self.state, to = %next, "run state");
        }
        self.state = next;
        Ok(())
    }

    async fn execute(&mut self, started_at: DateTime<Utc>) -> Result<SyncReport, SyncError> {
        let settings = self.settings;
        let gateway = self.gateway;
        let project = &settings.project;
        tracing::info!(
            %project,
            ancestor_type = %settings.ancestor_type,
            dry_run = settings.dry_run,
            "starting sync"
        );

        let schema = gateway
            .project_schema(project)
            .await
            .map_err(SyncError::SchemaUnavailable)?;
        if schema.fields.is_empty() {
            return Err(SyncError::EmptySchema {
                project: project.to_string(),
            });
        }

        self.transition(RunState::SelectingFields)?;
        let fields = select_eligible(&schema, &settings.field_names);
        if fields.is_empty() {
            return Err(SyncError::NoEligibleFields {
                configured: settings.field_names.clone(),
            });
        }
        tracing::info!(
            fields = ?fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            "selected fields"
        );

        self.transition(RunState::LoadingItems)?;
        let items = gateway.list_all_items(project).await?;
        let loaded = LoadedItems::index(&items);
        self.observer.items_loaded(items.len());
        tracing::info!(items = items.len(), "loaded project items");

        let mut reports = Vec::with_capacity(items.len());
        for item in &items {
            self.transition(RunState::Processing)?;
            let report = self
                .process_item(&schema.project_id, item, &loaded, &fields)
                .await?;
            self.observer.item_finished(&report);
            reports.push(report);
        }

        self.transition(RunState::Done)?;
        let totals = SyncTotals::tally(&reports);
        Ok(SyncReport {
            project: project.clone(),
            project_id: schema.project_id,
            ancestor_type: settings.ancestor_type.clone(),
            fields: fields.into_iter().map(|f| f.name).collect(),
            dry_run: settings.dry_run,
            state: self.state,
            items: reports,
            totals,
            started_at,
            finished_at: Utc::now(),
        })
    }

    async fn process_item(
        &self,
        project_id: &str,
        item: &TrackedItem,
        loaded: &LoadedItems<'_>,
        fields: &[CategoricalField],
    ) -> Result<ItemReport, SyncError> {
        let Some(record_id) = item.record_id.as_deref() else {
            tracing::info!(item_id = %item.id, reason = "no_linked_record", "skipping item");
            return Ok(ItemReport::skipped(
                &item.id,
                None,
                None,
                SkipReason::NoLinkedRecord,
            ));
        };

        let resolution = AncestorResolver::new(self.gateway)
            .resolve(record_id, &self.settings.ancestor_type)
            .await?;
        let ancestor_id = match resolution {
            Resolution::Found(id) => id,
            Resolution::NotFound(miss) => {
                tracing::info!(
                    item_id = %item.id,
                    record_id,
                    reason = %miss,
                    "skipping item, no matching ancestor"
                );
                return Ok(ItemReport::skipped(
                    &item.id,
                    Some(record_id),
                    None,
                    SkipReason::AncestorNotFound { miss },
                ));
            }
        };

        let Some(ancestor) = loaded.tracking(&ancestor_id) else {
            tracing::info!(
                item_id = %item.id,
                record_id,
                ancestor_record_id = %ancestor_id,
                reason = "ancestor_not_tracked",
                "skipping item, ancestor is not in the project"
            );
            return Ok(ItemReport::skipped(
                &item.id,
                Some(record_id),
                Some(&ancestor_id),
                SkipReason::AncestorNotTracked {
                    ancestor_record_id: ancestor_id.clone(),
                },
            ));
        };

        let outcomes = FieldSyncEngine::new(self.gateway, self.settings.dry_run)
            .apply(project_id, item, ancestor, fields)
            .await?;
        Ok(ItemReport::synced(&item.id, record_id, &ancestor_id, outcomes))
    }
}
