//! Sync / Merge Types
//!
//! Wire shapes for the reconciliation engine: import source tables, the
//! merge report, conflict surfacing, and the hardware device event.

use serde::{Deserialize, Serialize};

/// One externally-shaped source table: a header row plus data rows.
/// Column identity is resolved by case-insensitive header-alias matching,
/// not by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceTable {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Summary of one merge pass. `skipped_sources` lists sources whose id or
/// name column could not be resolved (partial success is reported, never
/// silently swallowed).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeReport {
    pub imported: usize,
    pub new_members: usize,
    pub retained_financials: usize,
    pub duplicates_dropped: usize,
    pub dropped_members: usize,
    pub skipped_sources: Vec<String>,
}

/// A detected mismatch between a local value and the external sheet value
/// for the same member field. Transient; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConflict {
    pub member_id: String,
    pub name: String,
    pub field: String,
    pub local_value: serde_json::Value,
    pub sheet_value: serde_json::Value,
}

/// Which side wins a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictChoice {
    Local,
    Sheet,
}

/// Explicit per-conflict resolution from the admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictResolution {
    pub member_id: String,
    pub field: String,
    pub choice: ConflictChoice,
    pub value: serde_json::Value,
}

/// Member row as served by the external spreadsheet web app
/// (`action=getMembers` / `syncPreCheck`). Field names mirror the sheet
/// endpoint, hence camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMemberRow {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub wallet_balance: i64,
    #[serde(default)]
    pub outstanding_fines: i64,
    #[serde(default)]
    pub reward_points: i64,
}

/// Hardware collaborator event, consumed as an alternate entry point to the
/// access evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceEvent {
    pub device_id: String,
    pub organization_id: String,
    pub actor_type: String,
    pub actor_id: String,
    pub event_type: String,
    pub timestamp: i64,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}
