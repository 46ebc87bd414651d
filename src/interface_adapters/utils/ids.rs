use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-unique id for tagging one connection's log lines.
///
/// The counter starts at the boot timestamp so ids from separate runs
/// rarely collide, and each call increments it so concurrent upgrades
/// within a run never do.
pub fn next_id() -> u64 {
    static COUNTER: OnceLock<AtomicU64> = OnceLock::new();
    COUNTER
        .get_or_init(|| {
            let boot = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos() as u64;
            AtomicU64::new(boot)
        })
        .fetch_add(1, Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_and_increasing() {
        let a = next_id();
        let b = next_id();
        assert!(b > a);
    }
}
