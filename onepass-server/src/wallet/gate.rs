//! Wallet Gate
//!
//! Derived per-member boolean controlling whether wallet actions are exposed.
//! Re-evaluated on every call; only the acknowledgement timestamp persists on
//! the member record.

use shared::models::Member;

/// Lock rule:
/// 1. outstanding fines > 0 — locked until cleared, unconditionally
/// 2. dashboard never acknowledged — locked
/// 3. acknowledgement older than the unlock window — locked again
pub fn wallet_locked(
    outstanding_fines: i64,
    last_dashboard_view: Option<i64>,
    now: i64,
    unlock_minutes: i64,
) -> bool {
    if outstanding_fines > 0 {
        return true;
    }
    let Some(last_view) = last_dashboard_view else {
        return true;
    };
    now - last_view > unlock_minutes * 60_000
}

/// Convenience wrapper over a loaded member record.
pub fn member_wallet_locked(member: &Member, now: i64, unlock_minutes: i64) -> bool {
    wallet_locked(
        member.outstanding_fines,
        member.last_dashboard_view,
        now,
        unlock_minutes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 60 * 60_000;

    #[test]
    fn test_locked_with_outstanding_fines() {
        // Fines lock even with a fresh acknowledgement
        assert!(wallet_locked(5000, Some(1_000_000), 1_000_001, 60));
    }

    #[test]
    fn test_locked_without_acknowledgement() {
        assert!(wallet_locked(0, None, 1_000_000, 60));
    }

    #[test]
    fn test_unlocked_within_window() {
        assert!(!wallet_locked(0, Some(1_000_000), 1_000_000 + HOUR, 60));
    }

    #[test]
    fn test_relocks_after_window() {
        assert!(wallet_locked(0, Some(1_000_000), 1_000_000 + HOUR + 1, 60));
    }

    #[test]
    fn test_custom_window() {
        let view = 1_000_000;
        assert!(!wallet_locked(0, Some(view), view + 5 * 60_000, 10));
        assert!(wallet_locked(0, Some(view), view + 11 * 60_000, 10));
    }
}
