//! Access Log Model
//!
//! Append-only record of access evaluations, created by the evaluator.

use serde::{Deserialize, Serialize};

/// Evaluation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum AccessOutcome {
    Granted,
    Denied,
}

impl AccessOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessOutcome::Granted => "Granted",
            AccessOutcome::Denied => "Denied",
        }
    }
}

impl std::fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of principal that presented the identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ActorKind {
    Member,
    Visitor,
    Unknown,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Member => "Member",
            ActorKind::Visitor => "Visitor",
            ActorKind::Unknown => "Unknown",
        }
    }
}

/// Access log entry (immutable)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AccessLogEntry {
    pub id: i64,
    /// Identifier as presented at the scan point.
    pub actor_id: String,
    pub actor_kind: ActorKind,
    pub action: String,
    pub outcome: AccessOutcome,
    /// Human-readable note ("On Time", "Late Entry", status name, ...).
    pub note: String,
    pub device_id: Option<String>,
    pub created_at: i64,
}

/// Access log query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AccessLogQuery {
    /// Start time (Unix millis, inclusive)
    pub from: Option<i64>,
    /// End time (Unix millis, inclusive)
    pub to: Option<i64>,
    pub outcome: Option<AccessOutcome>,
    pub actor_id: Option<String>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

impl Default for AccessLogQuery {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            outcome: None,
            actor_id: None,
            offset: 0,
            limit: default_limit(),
        }
    }
}
