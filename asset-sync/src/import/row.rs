//! Facility spreadsheet row layout

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use shared::models::{AssetRecordComplete, AssetStatus, SyncState};
use thiserror::Error;

pub const COLUMN_COUNT: usize = 25;

pub const HEADERS: [&str; COLUMN_COUNT] = [
    "Asset Barcode",
    "Primary Identifier",
    "Secondary Identifier",
    "Asset Type",
    "Status",
    "Wing",
    "Wing (Short)",
    "Room",
    "Floor",
    "Floor (Words)",
    "Room Number",
    "Room Name",
    "Filter Needed",
    "Filters On",
    "Filter Installed On",
    "Filter Expiry Date",
    "Filter Type",
    "Needs Flushing",
    "Notes",
    "Augmented Care",
    "Low Usage Asset",
    "Created",
    "Created By",
    "Modified",
    "Modified By",
];

// Column positions
pub(crate) const COL_ASSET_BARCODE: usize = 0;
pub(crate) const COL_PRIMARY_IDENTIFIER: usize = 1;
pub(crate) const COL_SECONDARY_IDENTIFIER: usize = 2;
pub(crate) const COL_ASSET_TYPE: usize = 3;
pub(crate) const COL_STATUS: usize = 4;
pub(crate) const COL_WING: usize = 5;
pub(crate) const COL_WING_SHORT: usize = 6;
pub(crate) const COL_ROOM: usize = 7;
pub(crate) const COL_FLOOR: usize = 8;
pub(crate) const COL_FLOOR_WORDS: usize = 9;
pub(crate) const COL_ROOM_NUMBER: usize = 10;
pub(crate) const COL_ROOM_NAME: usize = 11;
pub(crate) const COL_FILTER_NEEDED: usize = 12;
pub(crate) const COL_FILTERS_ON: usize = 13;
pub(crate) const COL_FILTER_INSTALLED_ON: usize = 14;
pub(crate) const COL_FILTER_EXPIRY_DATE: usize = 15;
pub(crate) const COL_FILTER_TYPE: usize = 16;
pub(crate) const COL_NEEDS_FLUSHING: usize = 17;
pub(crate) const COL_NOTES: usize = 18;
pub(crate) const COL_AUGMENTED_CARE: usize = 19;
pub(crate) const COL_LOW_USAGE_ASSET: usize = 20;
pub(crate) const COL_CREATED: usize = 21;
pub(crate) const COL_CREATED_BY: usize = 22;
pub(crate) const COL_MODIFIED: usize = 23;
pub(crate) const COL_MODIFIED_BY: usize = 24;

const UNKNOWN_TYPE: &str = "Unknown";
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%m/%d/%Y", "%Y-%m-%d", "%d-%m-%Y"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Invalid data format (expected 25 columns, found {0})")]
    TooFewColumns(usize),

    #[error("Invalid data format (primary identifier is blank)")]
    MissingPrimaryIdentifier,
}

/// Parse one spreadsheet row into the remote shape
pub fn parse_import_row(row: &[String]) -> Result<AssetRecordComplete, RowError> {
    if row.len() < COLUMN_COUNT {
        return Err(RowError::TooFewColumns(row.len()));
    }
    let primary = row[COL_PRIMARY_IDENTIFIER].trim();
    if primary.is_empty() {
        return Err(RowError::MissingPrimaryIdentifier);
    }

    let text = |col: usize| optional(&row[col]);
    let asset_type = text(COL_ASSET_TYPE).unwrap_or_else(|| UNKNOWN_TYPE.to_string());
    let location = [COL_WING, COL_ROOM, COL_ROOM_NAME]
        .iter()
        .filter_map(|&col| text(col))
        .collect::<Vec<_>>()
        .join(" - ");

    Ok(AssetRecordComplete {
        id: 0,
        asset_barcode: text(COL_ASSET_BARCODE),
        primary_identifier: primary.to_string(),
        secondary_identifier: text(COL_SECONDARY_IDENTIFIER),
        asset_type: asset_type.clone(),
        status: parse_status(&row[COL_STATUS]),
        wing: text(COL_WING),
        wing_short: text(COL_WING_SHORT),
        room: text(COL_ROOM),
        floor: text(COL_FLOOR),
        floor_words: text(COL_FLOOR_WORDS),
        room_number: text(COL_ROOM_NUMBER),
        room_name: text(COL_ROOM_NAME),
        filter_needed: parse_bool(&row[COL_FILTER_NEEDED]),
        filters_on: parse_bool(&row[COL_FILTERS_ON]),
        filter_installed_on: parse_date(&row[COL_FILTER_INSTALLED_ON]),
        filter_expiry_date: parse_date(&row[COL_FILTER_EXPIRY_DATE]),
        filter_type: text(COL_FILTER_TYPE),
        needs_flushing: parse_bool(&row[COL_NEEDS_FLUSHING]),
        augmented_care: parse_bool(&row[COL_AUGMENTED_CARE]),
        low_usage_asset: parse_bool(&row[COL_LOW_USAGE_ASSET]),
        notes: text(COL_NOTES),
        name: primary.to_string(),
        description: text(COL_NOTES).unwrap_or_default(),
        category: asset_type,
        serial_number: text(COL_ASSET_BARCODE),
        location,
        sync_state: SyncState::Pending,
        created_at: parse_date(&row[COL_CREATED]),
        created_by: text(COL_CREATED_BY),
        updated_at: parse_date(&row[COL_MODIFIED]),
        updated_by: text(COL_MODIFIED_BY),
    })
}

/// Status column, including the spreadsheet's synonyms; unknown is active
pub fn parse_status(raw: &str) -> AssetStatus {
    match raw.trim().to_lowercase().as_str() {
        "maintenance" | "repair" | "servicing" => AssetStatus::Maintenance,
        "retired" | "end_of_life" => AssetStatus::Retired,
        "disposed" | "scrapped" => AssetStatus::Disposed,
        _ => AssetStatus::Active,
    }
}

pub fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "on"
    )
}

/// First matching of `dd/MM/yyyy`, `MM/dd/yyyy`, `yyyy-MM-dd`, `dd-MM-yyyy`
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
