#![allow(dead_code)]

use asset_sync::remote::{RemoteError, RemoteResult, RemoteStore};
use asset_sync::{AssetService, DbService, LocalStore, SqliteAssetStore, SyncEngine};
use async_trait::async_trait;
use shared::models::{AssetRecordComplete, AssetStatus};
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Remote backend double with programmable failures
pub struct InMemoryRemote {
    rows: Mutex<BTreeMap<i64, AssetRecordComplete>>,
    next_id: AtomicI64,
    offline: AtomicBool,
    failing_names: Mutex<HashSet<String>>,
    gate: Mutex<Option<Arc<Notify>>>,
    writes: AtomicUsize,
}

impl InMemoryRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(1000),
            offline: AtomicBool::new(false),
            failing_names: Mutex::new(HashSet::new()),
            gate: Mutex::new(None),
            writes: AtomicUsize::new(0),
        })
    }

    pub fn with_rows(rows: Vec<AssetRecordComplete>) -> Arc<Self> {
        let remote = Self::new();
        for row in rows {
            remote.rows.lock().unwrap().insert(row.id, row);
        }
        remote
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Reject writes for records with this name
    pub fn fail_for(&self, name: &str) {
        self.failing_names.lock().unwrap().insert(name.to_string());
    }

    /// Hold the next write until the returned gate is notified
    ///
    /// The gate is consumed by the first write; later writes (such as the
    /// insert after an update miss) go straight through.
    pub fn hold_writes(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn row(&self, id: i64) -> Option<AssetRecordComplete> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn rows(&self) -> Vec<AssetRecordComplete> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> RemoteResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::Network("connection refused".into()));
        }
        Ok(())
    }

    async fn before_write(&self, asset: &AssetRecordComplete) -> RemoteResult<()> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        if self.failing_names.lock().unwrap().contains(&asset.name) {
            return Err(RemoteError::Rejected {
                status: 400,
                message: format!("invalid row {}", asset.name),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for InMemoryRemote {
    async fn insert(&self, asset: &AssetRecordComplete) -> RemoteResult<AssetRecordComplete> {
        self.before_write(asset).await?;
        let mut row = asset.clone();
        if row.id == 0 {
            row.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        }
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&row.id) {
            return Err(RemoteError::Rejected {
                status: 409,
                message: format!("duplicate key {}", row.id),
            });
        }
        rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, asset: &AssetRecordComplete) -> RemoteResult<AssetRecordComplete> {
        self.before_write(asset).await?;
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&asset.id) {
            Some(row) => {
                *row = asset.clone();
                Ok(row.clone())
            }
            None => Err(RemoteError::NotFound(format!("asset {}", asset.id))),
        }
    }

    async fn delete(&self, id: i64) -> RemoteResult<bool> {
        self.check_online()?;
        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list_all(&self) -> RemoteResult<Vec<AssetRecordComplete>> {
        self.check_online()?;
        Ok(self.rows())
    }

    async fn get_by_id(&self, id: i64) -> RemoteResult<Option<AssetRecordComplete>> {
        self.check_online()?;
        Ok(self.row(id))
    }

    async fn list_by_category(&self, category: &str) -> RemoteResult<Vec<AssetRecordComplete>> {
        self.check_online()?;
        Ok(self
            .rows()
            .into_iter()
            .filter(|r| r.category == category)
            .collect())
    }

    async fn list_by_status(&self, status: AssetStatus) -> RemoteResult<Vec<AssetRecordComplete>> {
        self.check_online()?;
        Ok(self
            .rows()
            .into_iter()
            .filter(|r| r.status == status)
            .collect())
    }
}

pub async fn memory_store() -> Arc<SqliteAssetStore> {
    let db = DbService::in_memory().await.unwrap();
    Arc::new(SqliteAssetStore::new(db).await.unwrap())
}

pub async fn engine_with(remote: Arc<InMemoryRemote>) -> (SyncEngine, Arc<SqliteAssetStore>) {
    let store = memory_store().await;
    (SyncEngine::new(store.clone(), remote), store)
}

pub async fn service_with(remote: Arc<InMemoryRemote>) -> (AssetService, Arc<SqliteAssetStore>) {
    let (engine, store) = engine_with(remote).await;
    (AssetService::new(Arc::new(engine)), store)
}

pub fn remote_row(id: i64, name: &str, category: &str) -> AssetRecordComplete {
    AssetRecordComplete {
        id,
        primary_identifier: name.to_string(),
        asset_type: category.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        ..Default::default()
    }
}

/// Poll until `check` holds or give up after about a second
pub async fn eventually<F>(mut check: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..100 {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check()
}

/// Local state of a record, for assertions
pub async fn state_of(store: &SqliteAssetStore, id: i64) -> shared::SyncState {
    store.get_by_id(id).await.unwrap().unwrap().sync_state
}
