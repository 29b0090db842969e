//! Member Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Member role. Role and status are independently settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum Role {
    Member,
    Staff,
    Admin,
    Master,
    Guest,
}

impl Role {
    /// Parse a role cell from an import source. Header data is free text, so
    /// matching is case-insensitive; anything unrecognized yields `None` and
    /// the caller falls back to the source's default role.
    pub fn parse_lenient(value: &str) -> Option<Role> {
        let v = value.trim();
        for role in [
            Role::Member,
            Role::Staff,
            Role::Admin,
            Role::Master,
            Role::Guest,
        ] {
            if v.eq_ignore_ascii_case(role.as_str()) {
                return Some(role);
            }
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "Member",
            Role::Staff => "Staff",
            Role::Admin => "Admin",
            Role::Master => "Master",
            Role::Guest => "Guest",
        }
    }

    /// Admin-level roles may manage members, config, and the ledger.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Master)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member status. Blocked and Suspended always deny access regardless of any
/// other field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum MemberStatus {
    Active,
    Late,
    Suspended,
    Blocked,
    /// Financial lock
    Locked,
}

impl MemberStatus {
    pub fn parse_lenient(value: &str) -> Option<MemberStatus> {
        let v = value.trim();
        for status in [
            MemberStatus::Active,
            MemberStatus::Late,
            MemberStatus::Suspended,
            MemberStatus::Blocked,
            MemberStatus::Locked,
        ] {
            if v.eq_ignore_ascii_case(status.as_str()) {
                return Some(status);
            }
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Late => "Late",
            MemberStatus::Suspended => "Suspended",
            MemberStatus::Blocked => "Blocked",
            MemberStatus::Locked => "Locked",
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Member entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub role: Role,
    pub status: MemberStatus,
    pub photo_url: String,
    /// Cached projection of the ledger; maintained transactionally by
    /// transaction posting, never written by sync.
    pub wallet_balance: i64,
    pub outstanding_fines: i64,
    pub reward_points: i64,
    pub last_dashboard_view: Option<i64>,
    pub session_progress: i64,
    /// Argon2 hash; never serialized out.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create member payload (direct admin creation; sync is the other path)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MemberCreate {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    pub role: Option<Role>,
    pub status: Option<MemberStatus>,
    pub photo_url: Option<String>,
    pub password: Option<String>,
}

/// Update member payload. Financial fields are deliberately absent: wallet,
/// fines, and points only move through transaction posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub organization_id: Option<String>,
    pub role: Option<Role>,
    pub status: Option<MemberStatus>,
    pub photo_url: Option<String>,
    pub session_progress: Option<i64>,
}

/// Bulk role/status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUpdate {
    pub ids: Vec<String>,
    pub role: Option<Role>,
    pub status: Option<MemberStatus>,
}
