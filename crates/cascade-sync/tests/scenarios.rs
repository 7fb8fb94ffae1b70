//! End-to-end runs of `SyncDriver` against the in-memory gateway.

use std::sync::Mutex;
use std::time::Duration;

use cascade_config::SyncSettings;
use cascade_core::entities::{FieldOption, ProjectField, ProjectRef, ProjectSchema, TrackedItem};
use cascade_core::enums::{FieldKind, FieldStatus, MissReason, RunState, SkipReason};
use cascade_core::responses::{ItemReport, ItemStatus};
use cascade_github::{GatewayError, MemoryGateway, Mutation};
use cascade_sync::{SyncDriver, SyncError, SyncObserver};
use pretty_assertions::assert_eq;

fn settings(fields: &[&str]) -> SyncSettings {
    SyncSettings {
        token: "ghp_test".into(),
        api_url: "https://api.github.com/graphql".into(),
        timeout: Duration::from_secs(5),
        max_attempts: 1,
        page_size: 100,
        project: ProjectRef::new("acme", 7),
        field_names: fields.iter().map(|f| (*f).to_string()).collect(),
        ancestor_type: "Initiative".into(),
        dry_run: false,
    }
}

fn field(name: &str, kind: FieldKind) -> ProjectField {
    ProjectField {
        id: format!("F_{name}"),
        name: name.to_string(),
        kind,
        options: if kind.is_categorical() {
            vec![
                FieldOption {
                    id: "opt-x".into(),
                    name: "X".into(),
                },
                FieldOption {
                    id: "opt-y".into(),
                    name: "Y".into(),
                },
            ]
        } else {
            Vec::new()
        },
    }
}

fn schema() -> ProjectSchema {
    ProjectSchema {
        project_id: "PVT_1".into(),
        fields: vec![
            field("Initiative", FieldKind::SingleSelect),
            field("Team", FieldKind::Text),
            field("Notes", FieldKind::Text),
            field("Quarter", FieldKind::SingleSelect),
        ],
    }
}

/// Task(A) -> Task(B) -> Initiative(C), all tracked; C selects X.
fn chain() -> MemoryGateway {
    MemoryGateway::new(schema())
        .with_item(TrackedItem::new("PVTI_a", Some("I_a")))
        .with_item(TrackedItem::new("PVTI_b", Some("I_b")))
        .with_item(TrackedItem::new("PVTI_c", Some("I_c")).with_value("Initiative", "opt-x"))
        .with_record("I_a", Some("I_b"), Some("Task"))
        .with_record("I_b", Some("I_c"), Some("Task"))
        .with_record("I_c", None, Some("Initiative"))
}

fn report_for<'r>(items: &'r [ItemReport], item_id: &str) -> &'r ItemReport {
    items.iter().find(|i| i.item_id == item_id).unwrap()
}

#[tokio::test]
async fn grandchild_receives_initiative_value() {
    let gateway = chain();
    let settings = settings(&["Initiative"]);

    let mut driver = SyncDriver::new(&settings, &gateway);
    let report = driver.run().await.unwrap();

    assert_eq!(driver.state(), RunState::Done);
    assert_eq!(report.state, RunState::Done);
    assert_eq!(
        gateway.mutations(),
        vec![
            Mutation {
                project_id: "PVT_1".into(),
                item_id: "PVTI_a".into(),
                field_id: "F_Initiative".into(),
                option_id: "opt-x".into(),
            },
            Mutation {
                project_id: "PVT_1".into(),
                item_id: "PVTI_b".into(),
                field_id: "F_Initiative".into(),
                option_id: "opt-x".into(),
            },
        ]
    );

    let a = report_for(&report.items, "PVTI_a");
    assert_eq!(a.status, ItemStatus::Synced);
    assert_eq!(a.ancestor_record_id.as_deref(), Some("I_c"));

    let c = report_for(&report.items, "PVTI_c");
    assert_eq!(
        c.skip,
        Some(SkipReason::AncestorNotFound {
            miss: MissReason::Root
        })
    );
    assert_eq!(report.totals.fields_updated, 2);
    assert_eq!(report.totals.items_skipped, 1);
}

#[tokio::test]
async fn parentless_item_costs_one_fetch() {
    let gateway = MemoryGateway::new(schema())
        .with_item(TrackedItem::new("PVTI_lonely", Some("I_lonely")))
        .with_item(TrackedItem::new("PVTI_other", Some("I_other")));
    let settings = settings(&["Initiative"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    assert_eq!(gateway.parent_fetches(), vec!["I_lonely", "I_other"]);
    assert!(gateway.mutations().is_empty());
    assert_eq!(report.totals.items_seen, 2);
    assert_eq!(report.totals.items_skipped, 2);
}

#[tokio::test]
async fn non_categorical_fields_abort_before_loading_items() {
    let gateway = chain();
    let settings = settings(&["Team", "Notes"]);

    let mut driver = SyncDriver::new(&settings, &gateway);
    let err = driver.run().await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::NoEligibleFields { ref configured } if configured == &["Team", "Notes"]
    ));
    assert_eq!(driver.state(), RunState::Aborted);
    assert_eq!(gateway.item_pages(), 0);
    assert!(gateway.parent_fetches().is_empty());
}

#[tokio::test]
async fn untracked_ancestor_is_skipped() {
    let gateway = MemoryGateway::new(schema())
        .with_item(TrackedItem::new("PVTI_a", Some("I_a")))
        .with_record("I_a", Some("I_elsewhere"), Some("Task"))
        .with_record("I_elsewhere", None, Some("Initiative"));
    let settings = settings(&["Initiative"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    let a = report_for(&report.items, "PVTI_a");
    assert_eq!(
        a.skip,
        Some(SkipReason::AncestorNotTracked {
            ancestor_record_id: "I_elsewhere".into()
        })
    );
    assert_eq!(a.ancestor_record_id.as_deref(), Some("I_elsewhere"));
    assert!(gateway.mutations().is_empty());
}

#[tokio::test]
async fn drafts_are_never_resolved() {
    let gateway = chain().with_item(TrackedItem::new("PVTI_draft", None));
    let settings = settings(&["Initiative"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    let draft = report_for(&report.items, "PVTI_draft");
    assert_eq!(draft.skip, Some(SkipReason::NoLinkedRecord));
    assert!(gateway.parent_fetches().iter().all(|id| id.starts_with("I_")));
    assert!(gateway.mutations().iter().all(|m| m.item_id != "PVTI_draft"));
}

#[tokio::test]
async fn cyclic_parents_terminate() {
    let gateway = MemoryGateway::new(schema())
        .with_item(TrackedItem::new("PVTI_a", Some("I_a")))
        .with_record("I_a", Some("I_b"), Some("Task"))
        .with_record("I_b", Some("I_c"), Some("Task"))
        .with_record("I_c", Some("I_a"), Some("Task"));
    let settings = settings(&["Initiative"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    assert_eq!(
        report.items[0].skip,
        Some(SkipReason::AncestorNotFound {
            miss: MissReason::Cycle
        })
    );
    assert_eq!(gateway.parent_fetches(), vec!["I_a", "I_b", "I_c"]);
}

/// Chain `R0 -> R1 -> ... -> R{depth}` where only the top record is an
/// Initiative and is tracked with option X.
fn deep_chain(depth: usize) -> MemoryGateway {
    let mut gateway = MemoryGateway::new(schema())
        .with_item(TrackedItem::new("PVTI_0", Some("R0")))
        .with_item(
            TrackedItem::new("PVTI_top", Some(format!("R{depth}").as_str()))
                .with_value("Initiative", "opt-x"),
        );
    for n in 0..depth {
        let parent = format!("R{}", n + 1);
        gateway = gateway.with_record(&format!("R{n}"), Some(parent.as_str()), None);
    }
    gateway.with_record(&format!("R{depth}"), None, Some("Initiative"))
}

#[tokio::test]
async fn ancestor_at_depth_fifty_is_found() {
    let gateway = deep_chain(50);
    let settings = settings(&["Initiative"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    let first = report_for(&report.items, "PVTI_0");
    assert_eq!(first.status, ItemStatus::Synced);
    assert_eq!(first.ancestor_record_id.as_deref(), Some("R50"));
}

#[tokio::test]
async fn ancestor_at_depth_fifty_one_is_found() {
    let gateway = deep_chain(51);
    let settings = settings(&["Initiative"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    let first = report_for(&report.items, "PVTI_0");
    assert_eq!(first.status, ItemStatus::Synced);
    assert_eq!(first.ancestor_record_id.as_deref(), Some("R51"));
}

#[tokio::test]
async fn ancestor_beyond_fifty_one_is_out_of_reach() {
    let gateway = deep_chain(52);
    let settings = settings(&["Initiative"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    let first = report_for(&report.items, "PVTI_0");
    assert_eq!(
        first.skip,
        Some(SkipReason::AncestorNotFound {
            miss: MissReason::DepthExceeded
        })
    );
    let walked = gateway
        .parent_fetches()
        .iter()
        .filter(|id| id.as_str() != "R52")
        .count();
    assert_eq!(walked, 51);
    assert!(gateway.mutations().is_empty());
}

#[tokio::test]
async fn ancestor_without_value_leaves_item_untouched() {
    let gateway = chain();
    let settings = settings(&["Initiative", "Quarter"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    let a = report_for(&report.items, "PVTI_a");
    let quarter = a.fields.iter().find(|f| f.field == "Quarter").unwrap();
    assert_eq!(quarter.status, FieldStatus::SkippedNoAncestorValue);
    assert!(gateway.mutations().iter().all(|m| m.field_id != "F_Quarter"));
    assert_eq!(report.fields, vec!["Initiative", "Quarter"]);
}

#[tokio::test]
async fn rejected_update_does_not_stop_the_run() {
    let gateway = chain().rejecting_field("F_Initiative");
    let settings = settings(&["Initiative"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    assert_eq!(report.state, RunState::Done);
    assert_eq!(report.totals.fields_rejected, 2);
    assert_eq!(report.totals.fields_updated, 0);
}

#[tokio::test]
async fn lookup_failure_aborts_the_run() {
    let gateway = chain().failing_record("I_b");
    let settings = settings(&["Initiative"]);

    let mut driver = SyncDriver::new(&settings, &gateway);
    let err = driver.run().await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::Gateway(GatewayError::Api { status: 500, .. })
    ));
    assert_eq!(driver.state(), RunState::Aborted);
    assert!(gateway.mutations().is_empty());
}

#[tokio::test]
async fn missing_project_is_schema_unavailable() {
    let gateway = MemoryGateway::without_project();
    let settings = settings(&["Initiative"]);

    let err = SyncDriver::new(&settings, &gateway).run().await.unwrap_err();
    assert!(matches!(err, SyncError::SchemaUnavailable(GatewayError::NotFound { .. })));
}

#[tokio::test]
async fn empty_schema_aborts() {
    let gateway = MemoryGateway::new(ProjectSchema {
        project_id: "PVT_1".into(),
        fields: Vec::new(),
    });
    let settings = settings(&["Initiative"]);

    let err = SyncDriver::new(&settings, &gateway).run().await.unwrap_err();
    assert!(matches!(err, SyncError::EmptySchema { .. }));
    assert_eq!(gateway.item_pages(), 0);
}

#[tokio::test]
async fn dry_run_reads_but_never_writes() {
    let gateway = chain();
    let mut settings = settings(&["Initiative"]);
    settings.dry_run = true;

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    assert!(gateway.mutations().is_empty());
    assert!(!gateway.parent_fetches().is_empty());
    assert_eq!(report.totals.fields_planned, 2);
    assert!(report.confirmation().contains("2 field value(s) planned"));
}

#[tokio::test]
async fn items_are_processed_in_load_order_across_pages() {
    let gateway = chain()
        .with_item(TrackedItem::new("PVTI_d", None))
        .with_page_size(2);
    let settings = settings(&["Initiative"]);

    let report = SyncDriver::new(&settings, &gateway).run().await.unwrap();

    let order: Vec<&str> = report.items.iter().map(|i| i.item_id.as_str()).collect();
    assert_eq!(order, vec!["PVTI_a", "PVTI_b", "PVTI_c", "PVTI_d"]);
    assert_eq!(gateway.item_pages(), 2);
}

#[tokio::test]
async fn empty_project_completes() {
    let gateway = MemoryGateway::new(schema());
    let settings = settings(&["Initiative"]);

    let mut driver = SyncDriver::new(&settings, &gateway);
    let report = driver.run().await.unwrap();
    assert_eq!(driver.state(), RunState::Done);
    assert!(report.items.is_empty());
}

#[tokio::test]
async fn driver_runs_only_once() {
    let gateway = chain();
    let settings = settings(&["Initiative"]);

    let mut driver = SyncDriver::new(&settings, &gateway);
    driver.run().await.unwrap();
    let err = driver.run().await.unwrap_err();
    assert!(matches!(err, SyncError::Core(_)));
}

#[derive(Default)]
struct Recorder {
    total: Mutex<Option<usize>>,
    finished: Mutex<Vec<String>>,
}

impl SyncObserver for Recorder {
    fn items_loaded(&self, total: usize) {
        *self.total.lock().unwrap() = Some(total);
    }

    fn item_finished(&self, report: &ItemReport) {
        self.finished.lock().unwrap().push(report.item_id.clone());
    }
}

#[tokio::test]
async fn observer_sees_every_item() {
    let gateway = chain();
    let settings = settings(&["Initiative"]);
    let recorder = Recorder::default();

    SyncDriver::new(&settings, &gateway)
        .with_observer(&recorder)
        .run()
        .await
        .unwrap();

    assert_eq!(*recorder.total.lock().unwrap(), Some(3));
    assert_eq!(
        *recorder.finished.lock().unwrap(),
        vec!["PVTI_a", "PVTI_b", "PVTI_c"]
    );
}
