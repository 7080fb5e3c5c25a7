//! Sample facility assets for demos and empty registers

use crate::mapper::to_local_shape;
use crate::services::{AssetService, SyncHandle};
use crate::utils::AppResult;
use chrono::{DateTime, Duration, Utc};
use shared::models::{AssetRecordComplete, AssetStatus};

const FILTER_LIFETIME_DAYS: i64 = 30;

/// Three rows covering the spreadsheet layout: IT kit, a filtered water
/// outlet and low-usage furniture
pub fn sample_assets(now: DateTime<Utc>) -> Vec<AssetRecordComplete> {
    let text = |s: &str| Some(s.to_string());

    vec![
        AssetRecordComplete {
            asset_barcode: text("BC001"),
            primary_identifier: "LAPTOP-DEV-001".into(),
            secondary_identifier: text("DEV-LAP-01"),
            asset_type: "Laptop Computer".into(),
            status: AssetStatus::Active,
            wing: text("North Wing"),
            wing_short: text("NW"),
            room: text("NW-101"),
            floor: text("1"),
            floor_words: text("First Floor"),
            room_number: text("101"),
            room_name: text("Development Office"),
            name: "Development Laptop".into(),
            category: "IT Equipment".into(),
            serial_number: text("BC001"),
            location: "North Wing - NW-101 - Development Office".into(),
            ..Default::default()
        },
        AssetRecordComplete {
            asset_barcode: text("BC002"),
            primary_identifier: "FILTER-KITCHEN-001".into(),
            secondary_identifier: text("FLT-KIT-01"),
            asset_type: "Water Filter System".into(),
            status: AssetStatus::Active,
            wing: text("East Wing"),
            wing_short: text("EW"),
            room: text("EW-KITCHEN"),
            floor: text("1"),
            floor_words: text("Ground Floor"),
            room_number: text("KITCHEN"),
            room_name: text("Main Kitchen"),
            filter_needed: true,
            filters_on: true,
            filter_expiry_date: Some(now + Duration::days(FILTER_LIFETIME_DAYS)),
            filter_type: text("Carbon Block"),
            needs_flushing: true,
            augmented_care: true,
            name: "Kitchen Water Filter".into(),
            category: "Water Treatment".into(),
            serial_number: text("BC002"),
            location: "East Wing - Kitchen - Main Kitchen".into(),
            ..Default::default()
        },
        AssetRecordComplete {
            asset_barcode: text("BC003"),
            primary_identifier: "CHAIR-CONF-001".into(),
            secondary_identifier: text("CHR-CONF-01"),
            asset_type: "Conference Chair".into(),
            status: AssetStatus::Active,
            wing: text("South Wing"),
            wing_short: text("SW"),
            room: text("SW-CONF"),
            floor: text("2"),
            floor_words: text("Second Floor"),
            room_number: text("CONF"),
            room_name: text("Main Conference Room"),
            low_usage_asset: true,
            name: "Conference Room Chair".into(),
            category: "Furniture".into(),
            serial_number: text("BC003"),
            location: "South Wing - Conference - Main Conference Room".into(),
            ..Default::default()
        },
    ]
}

/// Insert the sample set through the service; stops at the first failure
pub async fn import_samples(service: &AssetService) -> AppResult<Vec<SyncHandle>> {
    let mut pushes = Vec::new();
    for sample in sample_assets(Utc::now()) {
        let (id, push) = service.insert(to_local_shape(&sample)).await?;
        tracing::debug!(asset_id = id, name = %sample.name, "Sample asset saved");
        pushes.push(push);
    }
    tracing::info!(count = pushes.len(), "Sample assets imported");
    Ok(pushes)
}
