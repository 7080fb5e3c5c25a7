mod common;

use asset_sync::LocalStore;
use common::{InMemoryRemote, engine_with, remote_row, state_of};
use shared::models::{AssetRecord, SyncState};

async fn seed(store: &impl LocalStore, names: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for name in names {
        let id = store
            .insert(&AssetRecord::new(*name, "Furniture"))
            .await
            .unwrap()
            .unwrap();
        ids.push(id);
    }
    ids
}

#[tokio::test]
async fn push_with_unreachable_remote_marks_all_pending_as_error() {
    let remote = InMemoryRemote::new();
    remote.set_offline(true);
    let (engine, store) = engine_with(remote.clone()).await;
    let ids = seed(store.as_ref(), &["Chair", "Desk", "Lamp"]).await;

    let result = engine.push_pending().await;

    assert!(!result.success);
    assert_eq!(result.synced_count, 0);
    assert_eq!(result.error_count, 3);
    assert_eq!(result.errors.len(), 3);
    for id in ids {
        assert_eq!(state_of(&store, id).await, SyncState::Error);
    }
}

#[tokio::test]
async fn push_continues_after_a_rejected_record() {
    let remote = InMemoryRemote::new();
    remote.fail_for("Desk");
    let (engine, store) = engine_with(remote.clone()).await;
    let ids = seed(store.as_ref(), &["Chair", "Desk", "Lamp"]).await;

    let result = engine.push_pending().await;

    assert!(!result.success);
    assert_eq!(result.synced_count, 2);
    assert_eq!(result.error_count, 1);
    assert!(result.errors[0].contains("Desk"));
    assert_eq!(state_of(&store, ids[0]).await, SyncState::Synced);
    assert_eq!(state_of(&store, ids[1]).await, SyncState::Error);
    assert_eq!(state_of(&store, ids[2]).await, SyncState::Synced);
}

#[tokio::test]
async fn push_creates_missing_remote_rows_with_local_id() {
    let remote = InMemoryRemote::new();
    let (engine, store) = engine_with(remote.clone()).await;
    let id = store
        .insert(&AssetRecord::new("WF-0001", "Water Filter").with_location("North Wing - NW-101"))
        .await
        .unwrap()
        .unwrap();

    let result = engine.push_pending().await;
    assert!(result.success);
    assert_eq!(result.synced_count, 1);

    let row = remote.row(id).expect("remote row created under the local id");
    assert_eq!(row.primary_identifier, "WF-0001");
    assert_eq!(row.wing.as_deref(), Some("North Wing"));
    assert_eq!(row.room.as_deref(), Some("NW-101"));
    assert_eq!(row.sync_state, SyncState::Synced);
}

#[tokio::test]
async fn push_updates_existing_remote_rows() {
    let remote = InMemoryRemote::with_rows(vec![remote_row(7, "Old name", "Furniture")]);
    let (engine, store) = engine_with(remote.clone()).await;
    let mut asset = AssetRecord::new("New name", "Furniture");
    asset.id = 7;
    store.insert(&asset).await.unwrap();

    assert!(engine.push_pending().await.success);
    assert_eq!(remote.row(7).unwrap().name, "New name");
    assert_eq!(remote.rows().len(), 1);
}

#[tokio::test]
async fn pull_inserts_missing_remote_records_as_synced() {
    let remote = InMemoryRemote::with_rows(vec![remote_row(5, "Pump", "Plant")]);
    let (engine, store) = engine_with(remote).await;

    let report = engine.pull_new().await.unwrap();

    assert_eq!(report.inserted.len(), 1);
    assert!(report.errors.is_empty());
    let local = store.get_by_id(5).await.unwrap().unwrap();
    assert_eq!(local.name, "Pump");
    assert_eq!(local.category, "Plant");
    assert_eq!(local.sync_state, SyncState::Synced);
}

#[tokio::test]
async fn pull_never_overwrites_existing_local_records() {
    let remote = InMemoryRemote::with_rows(vec![
        remote_row(5, "Remote chair", "Furniture"),
        remote_row(6, "Remote desk", "Furniture"),
    ]);
    let (engine, store) = engine_with(remote).await;
    let mut local = AssetRecord::new("Local chair", "Seating");
    local.id = 5;
    store.insert(&local).await.unwrap();

    let report = engine.pull_new().await.unwrap();

    assert_eq!(report.inserted.len(), 1);
    assert_eq!(report.inserted[0].id, 6);
    let kept = store.get_by_id(5).await.unwrap().unwrap();
    assert_eq!(kept.name, "Local chair");
    assert_eq!(kept.category, "Seating");
    assert_eq!(kept.sync_state, SyncState::Pending);
}

#[tokio::test]
async fn sync_all_twice_is_idempotent() {
    let remote = InMemoryRemote::with_rows(vec![remote_row(500, "Boiler", "Plant")]);
    let (engine, store) = engine_with(remote.clone()).await;
    seed(store.as_ref(), &["Chair", "Desk"]).await;

    let first = engine.sync_all().await;
    assert!(first.success);
    assert_eq!(first.synced_count, 3);
    assert_eq!(first.error_count, 0);

    let second = engine.sync_all().await;
    assert!(second.success);
    assert_eq!(second.synced_count, 0);
    assert_eq!(second.error_count, 0);
    assert_eq!(store.list_all().await.unwrap().len(), 3);
    assert_eq!(remote.rows().len(), 3);
}

#[tokio::test]
async fn sync_all_with_unreachable_remote_is_one_error() {
    let remote = InMemoryRemote::new();
    remote.set_offline(true);
    let (engine, store) = engine_with(remote).await;
    seed(store.as_ref(), &["Chair"]).await;

    let result = engine.sync_all().await;

    assert!(!result.success);
    assert_eq!(result.error_count, 1);
    assert!(result.errors[0].starts_with("Sync failed:"));
}

#[tokio::test]
async fn sync_one_unsaved_record_failure_sets_error_and_keeps_id() {
    let remote = InMemoryRemote::new();
    remote.fail_for("Chair");
    let (engine, _store) = engine_with(remote.clone()).await;
    let mut asset = AssetRecord::new("Chair", "Furniture");

    assert!(!engine.sync_one(&mut asset).await);
    assert_eq!(asset.sync_state, SyncState::Error);
    assert_eq!(asset.id, 0);
    assert!(remote.rows().is_empty());
}

#[tokio::test]
async fn sync_one_persisted_record_updates_store() {
    let remote = InMemoryRemote::new();
    let (engine, store) = engine_with(remote.clone()).await;
    let id = seed(store.as_ref(), &["Chair"]).await[0];
    let mut asset = store.get_by_id(id).await.unwrap().unwrap();

    assert!(engine.sync_one(&mut asset).await);
    assert_eq!(asset.sync_state, SyncState::Synced);
    assert_eq!(state_of(&store, id).await, SyncState::Synced);
    assert!(remote.row(id).is_some());
}

#[tokio::test]
async fn cancelled_push_in_flight_leaves_state_pending() {
    let remote = InMemoryRemote::new();
    let gate = remote.hold_writes();
    let (engine, store) = engine_with(remote.clone()).await;
    let engine = std::sync::Arc::new(engine);
    let id = seed(store.as_ref(), &["Chair"]).await[0];

    let pushing = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.push_pending().await })
    };
    tokio::task::yield_now().await;
    engine.shutdown();

    let result = pushing.await.unwrap();
    assert!(!result.success);
    assert!(result.errors[0].contains("cancelled"));
    assert_eq!(state_of(&store, id).await, SyncState::Pending);
    gate.notify_waiters();
}

#[tokio::test]
async fn upload_pending_is_insert_only() {
    let remote = InMemoryRemote::with_rows(vec![remote_row(1, "Chair", "Furniture")]);
    let (engine, store) = engine_with(remote.clone()).await;
    let mut existing = AssetRecord::new("Chair", "Furniture");
    existing.id = 1;
    store.insert(&existing).await.unwrap();
    let fresh = seed(store.as_ref(), &["Desk"]).await[0];

    let result = engine.upload_pending().await;

    assert_eq!(result.synced_count, 1);
    assert_eq!(result.error_count, 1);
    assert_eq!(state_of(&store, 1).await, SyncState::Error);
    assert_eq!(state_of(&store, fresh).await, SyncState::Synced);
}

#[tokio::test]
async fn download_all_maps_without_touching_the_store() {
    let mut row = remote_row(9, "", "");
    row.primary_identifier = "WF-0009".into();
    row.asset_type = "Water Filter".into();
    row.wing = Some("East".into());
    row.room = Some("E2".into());
    let remote = InMemoryRemote::with_rows(vec![row]);
    let (engine, store) = engine_with(remote.clone()).await;

    let assets = engine.download_all().await;
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].name, "WF-0009");
    assert_eq!(assets[0].category, "Water Filter");
    assert_eq!(assets[0].location, "East E2");
    assert!(store.list_all().await.unwrap().is_empty());

    remote.set_offline(true);
    assert!(engine.download_all().await.is_empty());
}
