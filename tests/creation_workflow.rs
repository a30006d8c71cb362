//! End-to-end workflow tests through `DashboardApi`

mod common;

use arbor::{
    ChartKind, ChartRow, CreationError, CreationIntent, DashboardApi, DetailQuery, DetailRow, Node,
    NodeId, ParentRef, SortKey, SortOrder,
};
use common::{rejected, Call, ScriptedApi};
use std::sync::Arc;

fn dashboard() -> (DashboardApi, Arc<ScriptedApi>) {
    let remote = Arc::new(ScriptedApi::new());
    (DashboardApi::new(remote.clone()), remote)
}

#[tokio::test]
async fn project_with_two_new_ancestors_lands_in_the_cached_forest() {
    let (api, remote) = dashboard();

    // Resolution fetches show each ancestor as it becomes visible.
    remote.plan_fetch(Ok(vec![Node::new("L1", "Finance")]));
    remote.plan_fetch(Ok(vec![
        Node::new("L1", "Finance"),
        Node::new("L2", "Lending").with_parent("L1"),
    ]));
    // Finalizing refresh sees the completed hierarchy.
    remote.set_snapshot(vec![
        Node::new("L1", "Finance"),
        Node::new("L2", "Lending").with_parent("L1"),
        Node::new("P1", "ledger-svc").with_parent("L2"),
    ]);

    let intent = CreationIntent::project(
        "ledger-svc",
        None,
        ParentRef::New("Finance".into()),
        ParentRef::New("Lending".into()),
    )
    .unwrap();
    api.create_entity(intent).await.unwrap();

    // Strict call order: create -> refetch -> create -> refetch ->
    // create -> finalizing refresh.
    assert_eq!(
        remote.calls(),
        vec![
            Call::Create {
                level: 1,
                name: "Finance".into(),
                parent: None,
                uuid: None,
            },
            Call::FetchTree,
            Call::Create {
                level: 2,
                name: "Lending".into(),
                parent: Some("L1".into()),
                uuid: None,
            },
            Call::FetchTree,
            Call::Create {
                level: 3,
                name: "ledger-svc".into(),
                parent: Some("L2".into()),
                uuid: None,
            },
            Call::FetchTree,
        ]
    );

    let forest = api.forest();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].name, "Finance");
    assert_eq!(forest[0].children[0].name, "Lending");
    assert_eq!(forest[0].children[0].children[0].name, "ledger-svc");
}

#[tokio::test]
async fn failed_resolution_leaves_partial_ancestors_and_a_fresh_cache() {
    let (api, remote) = dashboard();

    // The created line never shows up in the resolution refetch.
    remote.plan_fetch(Ok(Vec::new()));
    // But the finalizing refresh does see it — partial completion is
    // visible to the session, not rolled back.
    remote.set_snapshot(vec![Node::new("L1", "Finance")]);

    let intent = CreationIntent::sub_line("Lending", ParentRef::New("Finance".into())).unwrap();
    let err = api.create_entity(intent).await.unwrap_err();

    assert!(matches!(err, CreationError::ResolutionFailed { level: 1, .. }));
    assert_eq!(remote.create_calls().len(), 1);
    assert_eq!(api.snapshot().len(), 1);
}

#[tokio::test]
async fn retry_with_existing_ancestor_converges() {
    let (api, remote) = dashboard();
    remote.set_snapshot(vec![Node::new("L1", "Finance")]);

    // First attempt: the new line turns out to be a duplicate.
    remote.plan_create(Err(rejected("line 'Finance' already exists")));
    let first = CreationIntent::sub_line("Lending", ParentRef::New("Finance".into())).unwrap();
    let err = api.create_entity(first).await.unwrap_err();
    assert!(matches!(err, CreationError::Duplicate(_)));

    // Retry with the ancestor selected as existing reaches the target.
    let retry =
        CreationIntent::sub_line("Lending", ParentRef::Existing(NodeId::new("L1"))).unwrap();
    api.create_entity(retry).await.unwrap();

    let creates = remote.create_calls();
    assert_eq!(
        creates.last(),
        Some(&Call::Create {
            level: 2,
            name: "Lending".into(),
            parent: Some("L1".into()),
            uuid: None,
        })
    );
}

#[tokio::test]
async fn refresh_tree_replaces_the_cached_snapshot_wholesale() {
    let (api, remote) = dashboard();

    remote.set_snapshot(vec![Node::new("1", "Finance"), Node::new("2", "Platform")]);
    api.refresh_tree().await.unwrap();
    assert_eq!(api.snapshot().len(), 2);

    remote.set_snapshot(vec![Node::new("2", "Platform")]);
    api.refresh_tree().await.unwrap();

    let snapshot = api.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Platform");
}

#[tokio::test]
async fn detail_sort_flags_reach_the_wire_inverted() {
    let (api, remote) = dashboard();
    remote.set_detail_rows(vec![DetailRow {
        row: 1,
        name: "ledger-svc".into(),
        parent_name: "Lending".into(),
        grandparent_name: "Finance".into(),
        line_coverage: "82.5".into(),
        branch_coverage: "74.1".into(),
        create_time: "2026-05-01 09:30:00".into(),
        jump_url: None,
    }]);

    let query = DetailQuery::new()
        .with_first_level("Finance")
        .sorted_by(SortKey::LineCoverage, SortOrder::Descending);
    let rows = api.project_details(&query).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].line_coverage_pct(), 82.5);
    assert_eq!(
        remote.calls(),
        vec![Call::FetchDetails {
            params: vec![
                ("firstLevelCategory", "Finance".to_string()),
                ("sortby", "LINECOVERAGE".to_string()),
                ("order", "1".to_string()),
            ],
        }]
    );
}

#[tokio::test]
async fn chart_kinds_map_to_their_wire_discriminator() {
    let (api, remote) = dashboard();
    remote.set_chart_rows(vec![ChartRow {
        name: Some("Finance".into()),
        level3_count: Some(7),
        ..Default::default()
    }]);

    let pie = api.chart(ChartKind::Pie).await.unwrap();
    api.chart(ChartKind::HorizontalBar).await.unwrap();

    assert_eq!(arbor::charts::pie_slices(&pie)[0].value, 7);
    assert_eq!(
        remote.calls(),
        vec![Call::FetchChart { lx: 1 }, Call::FetchChart { lx: 4 }]
    );
}
