//! System Config Model

use serde::{Deserialize, Serialize};

/// Singleton rule record. Mutated only by admin actions; everything here is
/// business policy, not process configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SystemConfig {
    /// Cutoff time-of-day ("HH:MM"); arrival after this is late.
    pub resumption_time: String,
    /// Fine charged on the first late scan of a late window (minor units).
    pub late_fine_amount: i64,
    /// Outstanding-fines level at which a member is auto-suspended.
    /// Zero disables auto-suspension.
    pub auto_suspend_threshold: i64,
    /// Wallet stays unlocked this long after a dashboard acknowledgement.
    pub wallet_unlock_minutes: i64,
    pub maintenance_mode: bool,
    /// External spreadsheet web-app endpoint; None runs fully local.
    pub sync_endpoint: Option<String>,
    pub sync_token: Option<String>,
    pub last_synced_at: Option<i64>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            resumption_time: "08:30".to_string(),
            late_fine_amount: 5000,
            auto_suspend_threshold: 0,
            wallet_unlock_minutes: 60,
            maintenance_mode: false,
            sync_endpoint: None,
            sync_token: None,
            last_synced_at: None,
        }
    }
}

/// Partial config update (admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfigUpdate {
    pub resumption_time: Option<String>,
    pub late_fine_amount: Option<i64>,
    pub auto_suspend_threshold: Option<i64>,
    pub wallet_unlock_minutes: Option<i64>,
    pub maintenance_mode: Option<bool>,
    pub sync_endpoint: Option<String>,
    pub sync_token: Option<String>,
}
