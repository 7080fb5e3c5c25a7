//! Schema Mapper
//!
//! Pure translation between the local [`AssetRecord`] and the remote
//! [`AssetRecordComplete`]. The mapping is lossy: remote-only
//! columns (secondary identifier, filter management, maintenance flags) do
//! not survive a remote -> local -> remote round trip, and the local purchase
//! columns are not carried by the remote schema.

use shared::models::{AssetRecord, AssetRecordComplete};
use shared::util::millis_to_datetime;

/// Separator between wing and room in a composite location
pub const LOCATION_SEPARATOR: &str = " - ";

/// Joiner used when rebuilding a location from wing and room
pub const LOCATION_JOIN: &str = " ";

/// Split a composite location into `(wing, room)`
///
/// Only the first separator is significant; everything after it is the room.
/// Without a separator the whole trimmed string is the wing.
pub fn split_location(location: &str) -> (Option<String>, Option<String>) {
    match location.split_once(LOCATION_SEPARATOR) {
        Some((wing, room)) => (non_blank(wing), non_blank(room)),
        None => (non_blank(location), None),
    }
}

pub fn to_remote_shape(asset: &AssetRecord) -> AssetRecordComplete {
    let (wing, room) = split_location(&asset.location);
    let serial = non_blank(&asset.serial_number);

    AssetRecordComplete {
        id: asset.id,
        asset_barcode: serial.clone(),
        primary_identifier: asset.name.clone(),
        secondary_identifier: None,
        asset_type: asset.category.clone(),
        status: asset.status,
        wing,
        room,
        name: asset.name.clone(),
        description: asset.description.clone(),
        category: asset.category.clone(),
        serial_number: serial,
        location: asset.location.clone(),
        sync_state: asset.sync_state,
        created_at: asset.created_at.and_then(millis_to_datetime),
        updated_at: asset.updated_at.and_then(millis_to_datetime),
        ..Default::default()
    }
}

pub fn to_local_shape(remote: &AssetRecordComplete) -> AssetRecord {
    AssetRecord {
        id: remote.id,
        name: first_non_blank([remote.name.as_str(), remote.primary_identifier.as_str()]),
        description: first_non_blank([remote.description.as_str(), remote.asset_type.as_str()]),
        category: first_non_blank([remote.category.as_str(), remote.asset_type.as_str()]),
        serial_number: first_non_blank([
            remote.serial_number.as_deref().unwrap_or_default(),
            remote.asset_barcode.as_deref().unwrap_or_default(),
        ]),
        purchase_date: 0,
        purchase_price: 0.0,
        current_value: 0.0,
        location: local_location(remote),
        status: remote.status,
        created_at: remote.created_at.map(|t| t.timestamp_millis()),
        updated_at: remote.updated_at.map(|t| t.timestamp_millis()),
        sync_state: remote.sync_state,
    }
}

fn local_location(remote: &AssetRecordComplete) -> String {
    if !remote.location.trim().is_empty() {
        return remote.location.clone();
    }
    [remote.wing.as_deref(), remote.room.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(LOCATION_JOIN)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn first_non_blank<const N: usize>(candidates: [&str; N]) -> String {
    candidates
        .into_iter()
        .find(|c| !c.trim().is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{AssetStatus, SyncState};

    fn sample() -> AssetRecord {
        let mut asset = AssetRecord::new("WF-0001", "Water Filter")
            .with_location("North Wing - NW-101")
            .with_serial_number("BC-778")
            .with_status(AssetStatus::Maintenance);
        asset.id = 42;
        asset.description = "Drinking fountain filter".into();
        asset.purchase_price = 120.0;
        asset.created_at = Some(1_700_000_000_123);
        asset
    }

    #[test]
    fn test_location_split_on_first_separator() {
        let remote = to_remote_shape(&sample());
        assert_eq!(remote.wing.as_deref(), Some("North Wing"));
        assert_eq!(remote.room.as_deref(), Some("NW-101"));

        assert_eq!(
            split_location("East - E2 - Store"),
            (Some("East".into()), Some("E2 - Store".into()))
        );
        assert_eq!(split_location("Basement"), (Some("Basement".into()), None));
        assert_eq!(split_location("  "), (None, None));
    }

    #[test]
    fn test_remote_shape_fields() {
        let remote = to_remote_shape(&sample());
        assert_eq!(remote.id, 42);
        assert_eq!(remote.primary_identifier, "WF-0001");
        assert_eq!(remote.asset_type, "Water Filter");
        assert_eq!(remote.asset_barcode.as_deref(), Some("BC-778"));
        assert_eq!(remote.secondary_identifier, None);
        assert_eq!(remote.status, AssetStatus::Maintenance);
        assert_eq!(
            remote.created_at.map(|t| t.timestamp_millis()),
            Some(1_700_000_000_123)
        );

        let bare = to_remote_shape(&AssetRecord::new("Chair", "Furniture"));
        assert_eq!(bare.asset_barcode, None);
        assert_eq!(bare.wing, None);
    }

    #[test]
    fn test_round_trip_preserves_core_fields() {
        for location in ["North Wing - NW-101", "Basement", "", "A - B - C"] {
            let original = sample().with_location(location);
            let back = to_local_shape(&to_remote_shape(&original));
            assert_eq!(back.id, original.id);
            assert_eq!(back.name, original.name);
            assert_eq!(back.category, original.category);
            assert_eq!(back.status, original.status);
            assert_eq!(back.location, original.location);
            assert_eq!(back.purchase_price, 0.0);
        }
    }

    #[test]
    fn test_local_shape_falls_back_to_structured_columns() {
        let remote = AssetRecordComplete {
            id: 5,
            primary_identifier: "WF-0005".into(),
            asset_type: "Water Filter".into(),
            asset_barcode: Some("BC-5".into()),
            wing: Some("North Wing".into()),
            room: Some("NW-101".into()),
            sync_state: SyncState::Synced,
            ..Default::default()
        };
        let local = to_local_shape(&remote);
        assert_eq!(local.name, "WF-0005");
        assert_eq!(local.description, "Water Filter");
        assert_eq!(local.category, "Water Filter");
        assert_eq!(local.serial_number, "BC-5");
        assert_eq!(local.location, "North Wing NW-101");
        assert_eq!(local.sync_state, SyncState::Synced);

        let wing_only = AssetRecordComplete {
            wing: Some("South".into()),
            room: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(to_local_shape(&wing_only).location, "South");
        assert_eq!(to_local_shape(&AssetRecordComplete::default()).location, "");
    }

    #[test]
    fn test_remote_only_fields_are_dropped() {
        let remote = AssetRecordComplete {
            id: 9,
            primary_identifier: "P".into(),
            secondary_identifier: Some("S".into()),
            filter_needed: true,
            ..Default::default()
        };
        let again = to_remote_shape(&to_local_shape(&remote));
        assert_eq!(again.secondary_identifier, None);
        assert!(!again.filter_needed);
    }
}
