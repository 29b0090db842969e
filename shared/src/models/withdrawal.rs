//! Withdrawal Model

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum WithdrawalStatus {
    Pending,
    Approved,
    Rejected,
}

impl WithdrawalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "Pending",
            WithdrawalStatus::Approved => "Approved",
            WithdrawalStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Withdrawal request. Approval posts a Debit transaction; the record itself
/// never moves money.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Withdrawal {
    pub id: String,
    pub member_id: String,
    /// Requested amount in minor units (positive).
    pub amount: i64,
    pub status: WithdrawalStatus,
    pub requested_at: i64,
    pub processed_at: Option<i64>,
    pub processed_by: Option<String>,
}

/// Member-initiated withdrawal request payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WithdrawalRequest {
    #[validate(range(min = 1, message = "amount must be positive"))]
    pub amount: i64,
}

/// Admin decision payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalDecision {
    pub approve: bool,
}
