//! Headless snapshot against a scripted backend

use std::sync::Arc;

use sdash_api::test_utils::FakeApi;
use sdash_app::view::{FileListView, HealthBadge};
use sdash_app::Settings;
use sdash_core::{FileRecord, Mode, NodeRecord};
use sdfbs_dashboard::snapshot;

fn settings(mode: Mode) -> Settings {
    let mut settings = Settings::default();
    settings.behavior.start_mode = mode;
    settings
}

#[tokio::test]
async fn test_snapshot_of_simple_mode() {
    let api = FakeApi::new()
        .with_files(Mode::Simple, vec![FileRecord::new("1", "notes.txt", 2048)])
        .with_nodes(Mode::Simple, vec![NodeRecord::new("local", "active")]);

    let snap = snapshot(Arc::new(api), settings(Mode::Simple)).await.unwrap();

    assert_eq!(snap.view.mode, Mode::Simple);
    assert!(matches!(snap.view.health, HealthBadge::Live { .. }));
    assert_eq!(snap.view.files.items().len(), 1);
    assert_eq!(snap.view.files.items()[0].size, "2.00 KB");
    assert_eq!(snap.view.nodes[0].title, "Node: local");
}

#[tokio::test]
async fn test_snapshot_of_unreachable_mode_is_flagged() {
    let api = FakeApi::new().fail_mode(Mode::Production);

    let snap = snapshot(Arc::new(api), settings(Mode::Production))
        .await
        .unwrap();

    match snap.view.health {
        HealthBadge::Degraded { placeholder, .. } => assert!(placeholder),
        other => panic!("expected degraded badge, got {other:?}"),
    }
    assert!(!snap.view.cluster.is_empty());
}

#[tokio::test]
async fn test_snapshot_of_secure_mode_without_login() {
    let api = FakeApi::new();

    let snap = snapshot(Arc::new(api), settings(Mode::Secure)).await.unwrap();

    assert!(snap.view.user.is_none());
    assert!(matches!(snap.view.files, FileListView::Items(ref items) if items.is_empty()));
}

#[tokio::test]
async fn test_snapshot_serializes_mode_fields_at_top_level() {
    let api = FakeApi::new();
    let snap = snapshot(Arc::new(api), settings(Mode::Distributed))
        .await
        .unwrap();

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["mode"], "distributed");
    assert!(json["notices"].is_array());
}
