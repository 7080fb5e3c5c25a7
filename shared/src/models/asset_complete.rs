//! Asset Model (remote schema shape)

use super::asset::{AssetStatus, SyncState};
use super::wire_time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn is_unset_id(id: &i64) -> bool {
    *id == 0
}

/// Asset row as stored by the remote backend
///
/// Superset of the local [`super::AssetRecord`]: structured location, filter
/// management, maintenance flags and audit columns. The legacy simplified
/// columns (`name`, `description`, `category`, `serial_number`, `location`)
/// are kept so older clients can still read the row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetRecordComplete {
    /// Omitted on insert when unset so the backend assigns it
    #[serde(skip_serializing_if = "is_unset_id")]
    pub id: i64,

    // Basic information
    pub asset_barcode: Option<String>,
    pub primary_identifier: String,
    pub secondary_identifier: Option<String>,
    pub asset_type: String,
    pub status: AssetStatus,

    // Location
    pub wing: Option<String>,
    pub wing_short: Option<String>,
    pub room: Option<String>,
    pub floor: Option<String>,
    pub floor_words: Option<String>,
    pub room_number: Option<String>,
    pub room_name: Option<String>,

    // Filter management
    pub filter_needed: bool,
    pub filters_on: bool,
    #[serde(with = "wire_time::option")]
    pub filter_installed_on: Option<DateTime<Utc>>,
    #[serde(with = "wire_time::option")]
    pub filter_expiry_date: Option<DateTime<Utc>>,
    pub filter_type: Option<String>,

    // Maintenance flags
    pub needs_flushing: bool,
    pub augmented_care: bool,
    pub low_usage_asset: bool,
    pub notes: Option<String>,

    // Legacy simplified columns
    pub name: String,
    pub description: String,
    pub category: String,
    pub serial_number: Option<String>,
    pub location: String,

    #[serde(rename = "sync_status")]
    pub sync_state: SyncState,

    // Audit
    #[serde(with = "wire_time::option")]
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    #[serde(with = "wire_time::option")]
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unset_id_is_omitted() {
        let asset = AssetRecordComplete {
            primary_identifier: "Chair".into(),
            asset_type: "Furniture".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&asset).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["sync_status"], "pending");
        assert_eq!(json["status"], "active");

        let asset = AssetRecordComplete { id: 5, ..asset };
        let json = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["id"], 5);
    }

    #[test]
    fn test_deserialize_sparse_backend_row() {
        let json = r#"{
            "id": 12,
            "primary_identifier": "WF-0001",
            "asset_type": "Water Filter",
            "status": "maintenance",
            "wing": "North Wing",
            "room": "NW-101",
            "filter_needed": true,
            "filter_expiry_date": "2025-01-31T00:00:00.000Z",
            "created_at": null,
            "sync_status": "synced"
        }"#;
        let asset: AssetRecordComplete = serde_json::from_str(json).unwrap();
        assert_eq!(asset.id, 12);
        assert_eq!(asset.status, AssetStatus::Maintenance);
        assert_eq!(asset.sync_state, SyncState::Synced);
        assert_eq!(asset.wing.as_deref(), Some("North Wing"));
        assert_eq!(
            asset.filter_expiry_date,
            Some(Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap())
        );
        assert!(asset.created_at.is_none());
        assert!(asset.name.is_empty());
        assert!(asset.filter_needed && !asset.filters_on);
    }
}
