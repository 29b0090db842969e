//! Visitor Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Visitor pass status. Access is allowed only while CheckedIn and the pass
/// has not expired by clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum VisitorStatus {
    CheckedIn,
    CheckedOut,
    Expired,
}

impl VisitorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitorStatus::CheckedIn => "CheckedIn",
            VisitorStatus::CheckedOut => "CheckedOut",
            VisitorStatus::Expired => "Expired",
        }
    }
}

impl std::fmt::Display for VisitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visitor entity — a time-boxed guest principal without financial attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Visitor {
    pub id: String,
    pub host_id: String,
    pub name: String,
    pub purpose: String,
    pub status: VisitorStatus,
    pub checked_in_at: i64,
    pub expires_at: i64,
}

/// Create visitor payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VisitorCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "host_id must not be empty"))]
    pub host_id: String,
    #[serde(default)]
    pub purpose: Option<String>,
    /// Pass validity in minutes; default is 4 hours.
    pub valid_minutes: Option<i64>,
}
