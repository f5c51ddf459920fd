//! Dining Table Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Seats assumed when the backend omits `capacity`
pub const DEFAULT_CAPACITY: i32 = 4;

/// Table status as stored by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(TableStatus::Available),
            "occupied" => Ok(TableStatus::Occupied),
            "reserved" => Ok(TableStatus::Reserved),
            other => Err(format!("Unknown table status: {other}")),
        }
    }
}

/// Table record as sent by `GET /api/tables`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "tableid", default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Dining table entity (normalized)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: String,
    /// Display name; orders reference tables by this label
    pub name: String,
    pub capacity: i32,
    /// Status reported by the backend, not the derived occupancy
    pub status: TableStatus,
}

impl DiningTable {
    pub fn from_raw(raw: RawTable) -> Self {
        let id = raw.table_id.or(raw.id).unwrap_or_default();
        let name = raw
            .name
            .or(raw.number)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Table {id}"));

        // Unknown statuses must never make a table selectable.
        let status = match raw.status.as_deref() {
            None => TableStatus::Available,
            Some(s) => s.parse().unwrap_or_else(|e: String| {
                tracing::warn!(table = %name, error = %e, "Treating table as occupied");
                TableStatus::Occupied
            }),
        };

        Self {
            id,
            name,
            capacity: raw.capacity.unwrap_or(DEFAULT_CAPACITY),
            status,
        }
    }
}

/// Normalize a table list, keeping the first table for each display name
pub fn normalize_tables(raw: Vec<RawTable>) -> Vec<DiningTable> {
    let mut tables: Vec<DiningTable> = Vec::with_capacity(raw.len());
    for table in raw.into_iter().map(DiningTable::from_raw) {
        if tables.iter().any(|t| t.name == table.name) {
            tracing::debug!(table = %table.name, "Dropping duplicate table");
            continue;
        }
        tables.push(table);
    }
    tables
}

/// Update table status payload (`PUT /api/tables/:id/status`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}
