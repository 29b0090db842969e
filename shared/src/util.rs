/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a prefixed resource ID, e.g. `TX-8f3a21c09b44`.
///
/// Layout: prefix + '-' + 12 hex chars (48 random bits). The original data
/// set uses human-readable prefixed IDs ("VG-001", "TX-001", "VIS-1234"),
/// so generated IDs keep the same shape while being collision-free at
/// membership-hub scale.
pub fn prefixed_id(prefix: &str) -> String {
    use rand::Rng;
    let bits: u64 = rand::thread_rng().gen_range(0..(1u64 << 48));
    format!("{prefix}-{bits:012x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_id_shape() {
        let id = prefixed_id("TX");
        assert!(id.starts_with("TX-"));
        assert_eq!(id.len(), 3 + 12);
    }

    #[test]
    fn test_prefixed_ids_differ() {
        assert_ne!(prefixed_id("VIS"), prefixed_id("VIS"));
    }
}
