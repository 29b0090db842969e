//! Time helpers — late-window arithmetic
//!
//! Millisecond timestamps are the only currency below the handler layer;
//! "HH:MM" strings exist solely in the config record.

use chrono::{NaiveTime, TimeZone, Utc};

/// Parse a resumption time string (HH:MM); failure falls back to 00:00.
pub fn parse_resumption(cutoff: &str) -> NaiveTime {
    NaiveTime::parse_from_str(cutoff, "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse resumption_time '{}': {}, falling back to 00:00",
            cutoff,
            e
        );
        NaiveTime::MIN
    })
}

/// Whether `now_millis` falls after the resumption cutoff on its own day.
///
/// The comparison uses the UTC time-of-day, so `resumption_time` must be
/// stated in UTC. A deployment in another timezone shifts the configured
/// cutoff itself (an 08:30 local cutoff at UTC+1 is stored as "07:30").
pub fn is_past_resumption(now_millis: i64, resumption: NaiveTime) -> bool {
    let now = Utc
        .timestamp_millis_opt(now_millis)
        .single()
        .unwrap_or_else(Utc::now);
    now.time() > resumption
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn millis(h: u32, m: u32) -> i64 {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    #[test]
    fn test_parse_resumption() {
        assert_eq!(
            parse_resumption("08:30"),
            NaiveTime::from_hms_opt(8, 30, 0).unwrap()
        );
        // Garbage falls back to midnight
        assert_eq!(parse_resumption("not-a-time"), NaiveTime::MIN);
    }

    #[test]
    fn test_is_past_resumption() {
        let cutoff = parse_resumption("08:30");
        assert!(!is_past_resumption(millis(8, 0), cutoff));
        assert!(!is_past_resumption(millis(8, 30), cutoff));
        assert!(is_past_resumption(millis(8, 31), cutoff));
        assert!(is_past_resumption(millis(23, 59), cutoff));
    }
}
