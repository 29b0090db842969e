//! Ledger Transaction Model

use serde::{Deserialize, Serialize};

/// Transaction type. Sign convention: credits and awards are positive,
/// debits and fines are negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum TxType {
    Credit,
    Debit,
    Fine,
    Award,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Credit => "Credit",
            TxType::Debit => "Debit",
            TxType::Fine => "Fine",
            TxType::Award => "Award",
        }
    }

    /// Whether the sign convention requires a positive amount.
    pub fn is_positive(&self) -> bool {
        matches!(self, TxType::Credit | TxType::Award)
    }
}

impl std::fmt::Display for TxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger entry. Immutable once created; the member's wallet balance is a
/// cached projection maintained alongside each append.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: String,
    pub member_id: String,
    pub tx_type: TxType,
    /// Signed amount in minor currency units.
    pub amount: i64,
    pub description: String,
    pub reference: Option<String>,
    pub created_at: i64,
}

/// Manual transaction posting payload (admin-initiated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub member_id: String,
    pub tx_type: TxType,
    pub amount: i64,
    pub description: String,
    #[serde(default)]
    pub reference: Option<String>,
}
