//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.

use serde::{Deserialize, Serialize};

use crate::models::{Member, Visitor};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub id: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub member: Member,
}

// =============================================================================
// Scan API DTOs
// =============================================================================

/// Scan request (reception desk or kiosk)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    pub id: String,
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Result of one access evaluation. A "not found" denial carries neither a
/// member nor a visitor, which distinguishes it from a policy denial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub allowed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<Member>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visitor: Option<Visitor>,
}

// =============================================================================
// Wallet API DTOs
// =============================================================================

/// Wallet summary plus the derived gate state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletState {
    pub balance: i64,
    pub outstanding_fines: i64,
    pub reward_points: i64,
    pub locked: bool,
}

// =============================================================================
// Assistant API DTOs
// =============================================================================

/// Admin analyst question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalystRequest {
    pub question: String,
}

/// Assistant text reply (LLM output or the canned fallback)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
}
