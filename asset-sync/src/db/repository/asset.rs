//! Asset Repository

use super::{RepoError, RepoResult};
use shared::models::{AssetRecord, AssetStatus, SyncState};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, category, serial_number, purchase_date, \
    purchase_price, current_value, location, status, created_at, updated_at, sync_state";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<AssetRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM assets ORDER BY name ASC, id ASC");
    let assets = sqlx::query_as::<_, AssetRecord>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(assets)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AssetRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM assets WHERE id = ?");
    let asset = sqlx::query_as::<_, AssetRecord>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(asset)
}

pub async fn find_by_category(pool: &SqlitePool, category: &str) -> RepoResult<Vec<AssetRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM assets WHERE category = ? ORDER BY name ASC, id ASC");
    let assets = sqlx::query_as::<_, AssetRecord>(&sql)
        .bind(category)
        .fetch_all(pool)
        .await?;
    Ok(assets)
}

pub async fn find_by_status(pool: &SqlitePool, status: AssetStatus) -> RepoResult<Vec<AssetRecord>> {
    let sql = format!("SELECT {COLUMNS} FROM assets WHERE status = ? ORDER BY name ASC, id ASC");
    let assets = sqlx::query_as::<_, AssetRecord>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(assets)
}

pub async fn find_by_sync_state(
    pool: &SqlitePool,
    state: SyncState,
) -> RepoResult<Vec<AssetRecord>> {
    let sql =
        format!("SELECT {COLUMNS} FROM assets WHERE sync_state = ? ORDER BY name ASC, id ASC");
    let assets = sqlx::query_as::<_, AssetRecord>(&sql)
        .bind(state)
        .fetch_all(pool)
        .await?;
    Ok(assets)
}

/// Insert a record, ignoring primary-key conflicts
///
/// `id == 0` lets SQLite assign the identifier. Returns `None` when a row
/// with the same id already exists.
pub async fn create(pool: &SqlitePool, asset: &AssetRecord) -> RepoResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT OR IGNORE INTO assets (id, name, description, category, serial_number, \
         purchase_date, purchase_price, current_value, location, status, created_at, \
         updated_at, sync_state) \
         VALUES (NULLIF(?, 0), ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(asset.id)
    .bind(&asset.name)
    .bind(&asset.description)
    .bind(&asset.category)
    .bind(&asset.serial_number)
    .bind(asset.purchase_date)
    .bind(asset.purchase_price)
    .bind(asset.current_value)
    .bind(&asset.location)
    .bind(asset.status)
    .bind(asset.created_at)
    .bind(asset.updated_at)
    .bind(asset.sync_state)
    .fetch_optional(pool)
    .await?;
    Ok(id)
}

pub async fn update(pool: &SqlitePool, asset: &AssetRecord) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE assets SET name = ?, description = ?, category = ?, serial_number = ?, \
         purchase_date = ?, purchase_price = ?, current_value = ?, location = ?, status = ?, \
         created_at = ?, updated_at = ?, sync_state = ? WHERE id = ?",
    )
    .bind(&asset.name)
    .bind(&asset.description)
    .bind(&asset.category)
    .bind(&asset.serial_number)
    .bind(asset.purchase_date)
    .bind(asset.purchase_price)
    .bind(asset.current_value)
    .bind(&asset.location)
    .bind(asset.status)
    .bind(asset.created_at)
    .bind(asset.updated_at)
    .bind(asset.sync_state)
    .bind(asset.id)
    .execute(pool)
    .await?
    .rows_affected();

    if rows == 0 {
        return Err(RepoError::NotFound(format!("Asset {} not found", asset.id)));
    }
    Ok(())
}

/// Write only the sync state; `false` when the row does not exist
pub async fn update_sync_state(pool: &SqlitePool, id: i64, state: SyncState) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE assets SET sync_state = ? WHERE id = ?")
        .bind(state)
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows > 0)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM assets WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows > 0)
}

pub async fn delete_all(pool: &SqlitePool) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM assets")
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows)
}
