//! Asset Model (local shape)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Lifecycle status of a physical asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum AssetStatus {
    #[default]
    Active,
    Maintenance,
    Retired,
    Disposed,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Retired => "retired",
            Self::Disposed => "disposed",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "maintenance" => Ok(Self::Maintenance),
            "retired" => Ok(Self::Retired),
            "disposed" => Ok(Self::Disposed),
            other => Err(format!("unknown asset status: {other}")),
        }
    }
}

/// Reconciliation state of a record against the remote backend
///
/// Transitions: `Pending -> Synced` when the remote accepted the record,
/// `Pending -> Error` when it rejected it or was unreachable. Any local
/// mutation resets the state to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum SyncState {
    #[default]
    Pending,
    Synced,
    Error,
}

impl SyncState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Synced => "synced",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset entity as persisted in the local store
///
/// `id == 0` means the record has not been inserted locally yet; the local
/// store assigns the identifier on first insert. Timestamps are Unix millis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AssetRecord {
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub purchase_date: i64,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(default)]
    pub current_value: f64,
    /// Free text, optionally `"<wing> - <room>"`
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub status: AssetStatus,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub sync_state: SyncState,
}

impl AssetRecord {
    /// New unsaved record with the required fields set
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: String::new(),
            category: category.into(),
            serial_number: String::new(),
            purchase_date: 0,
            purchase_price: 0.0,
            current_value: 0.0,
            location: String::new(),
            status: AssetStatus::Active,
            created_at: None,
            updated_at: None,
            sync_state: SyncState::Pending,
        }
    }

    /// Whether the local store has assigned an identifier
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = serial_number.into();
        self
    }

    pub fn with_status(mut self, status: AssetStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_sync_state(mut self, sync_state: SyncState) -> Self {
        self.sync_state = sync_state;
        self
    }
}
