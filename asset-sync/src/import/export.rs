//! Spreadsheet export in the import column layout

use super::csv::quote_field;
use super::row::HEADERS;
use chrono::{DateTime, Utc};
use shared::models::AssetRecordComplete;

const EXPORT_DATE_FORMAT: &str = "%d/%m/%Y";

pub fn export_header() -> String {
    HEADERS.join(",")
}

pub fn export_row(asset: &AssetRecordComplete) -> String {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    let flag = |b: bool| if b { "Yes" } else { "No" }.to_string();
    let date = |d: &Option<DateTime<Utc>>| {
        d.map(|d| d.format(EXPORT_DATE_FORMAT).to_string())
            .unwrap_or_default()
    };

    [
        text(&asset.asset_barcode),
        asset.primary_identifier.clone(),
        text(&asset.secondary_identifier),
        asset.asset_type.clone(),
        asset.status.to_string(),
        text(&asset.wing),
        text(&asset.wing_short),
        text(&asset.room),
        text(&asset.floor),
        text(&asset.floor_words),
        text(&asset.room_number),
        text(&asset.room_name),
        flag(asset.filter_needed),
        flag(asset.filters_on),
        date(&asset.filter_installed_on),
        date(&asset.filter_expiry_date),
        text(&asset.filter_type),
        flag(asset.needs_flushing),
        text(&asset.notes),
        flag(asset.augmented_care),
        flag(asset.low_usage_asset),
        date(&asset.created_at),
        text(&asset.created_by),
        date(&asset.updated_at),
        text(&asset.updated_by),
    ]
    .iter()
    .map(|field| quote_field(field))
    .collect::<Vec<_>>()
    .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::csv::parse_csv_line;
    use crate::import::row::parse_import_row;

    #[test]
    fn test_header_has_every_column() {
        let header = export_header();
        assert!(header.starts_with("Asset Barcode,Primary Identifier,"));
        assert_eq!(parse_csv_line(&header).len(), 25);
    }

    #[test]
    fn test_exported_row_imports_back() {
        let line = "BC-1,WF-0001,,Water Filter,retired,North Wing,NW,NW-101,1,First,101,Office,\
                    yes,no,01/02/2024,,Carbon,no,\"Notes, with comma\",no,yes,,,,";
        let asset = parse_import_row(&parse_csv_line(line)).unwrap();

        let exported = export_row(&asset);
        let cells = parse_csv_line(&exported);
        assert_eq!(cells.len(), 25);
        assert_eq!(cells[1], "WF-0001");
        assert_eq!(cells[4], "retired");
        assert_eq!(cells[12], "Yes");
        assert_eq!(cells[13], "No");
        assert_eq!(cells[14], "01/02/2024");
        assert_eq!(cells[18], "Notes, with comma");
        assert_eq!(parse_import_row(&cells).unwrap(), asset);
    }
}
