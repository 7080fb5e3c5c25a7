//! CSV import / export for the facility spreadsheet
//!
//! Import rows are validated here and handed to [`AssetService::insert`];
//! bad rows are import errors, never sync errors.

pub mod csv;
pub mod export;
pub mod row;
pub mod sample;

pub use csv::parse_csv_line;
pub use export::{export_header, export_row};
pub use row::{RowError, parse_import_row};
pub use sample::{import_samples, sample_assets};

use crate::mapper::to_local_shape;
use crate::services::{AssetService, SyncHandle};
use crate::utils::{AppError, AppResult, ErrorCode};
use serde::Serialize;

/// Outcome of a CSV import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported_count: u32,
    pub error_count: u32,
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn success(&self) -> bool {
        self.error_count == 0
    }

    fn fail(&mut self, line_no: usize, message: impl std::fmt::Display) {
        self.error_count += 1;
        self.errors.push(format!("Row {line_no}: {message}"));
    }
}

/// Import every data line of `content` through the asset service
///
/// The first line is the header. Row numbers in messages are 1-based file
/// line numbers. Blank lines are skipped. Background pushes are detached.
pub async fn import_csv(service: &AssetService, content: &str) -> AppResult<ImportReport> {
    let (report, _pushes) = import_rows(service, content).await?;
    Ok(report)
}

/// [`import_csv`], then wait for every background push to settle
///
/// Returns the report and the number of records the remote accepted.
pub async fn import_csv_and_wait(
    service: &AssetService,
    content: &str,
) -> AppResult<(ImportReport, u32)> {
    let (report, pushes) = import_rows(service, content).await?;
    let mut pushed = 0;
    for push in pushes {
        if push.outcome().await {
            pushed += 1;
        }
    }
    tracing::info!(pushed, imported = report.imported_count, "Import pushes settled");
    Ok((report, pushed))
}

async fn import_rows(
    service: &AssetService,
    content: &str,
) -> AppResult<(ImportReport, Vec<SyncHandle>)> {
    let mut lines = content.lines().enumerate();
    if lines.next().is_none() {
        return Err(AppError::new(ErrorCode::ImportFileEmpty));
    }

    let mut report = ImportReport::default();
    let mut pushes = Vec::new();
    for (index, line) in lines {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let remote = match parse_import_row(&parse_csv_line(line)) {
            Ok(remote) => remote,
            Err(e) => {
                report.fail(line_no, e);
                continue;
            }
        };

        match service.insert(to_local_shape(&remote)).await {
            Ok((id, push)) => {
                tracing::debug!(asset_id = id, line = line_no, "Imported asset");
                report.imported_count += 1;
                pushes.push(push);
            }
            Err(e) => report.fail(line_no, format!("Error saving asset - {e}")),
        }
    }

    tracing::info!(
        imported = report.imported_count,
        errors = report.error_count,
        "CSV import finished"
    );
    Ok((report, pushes))
}
