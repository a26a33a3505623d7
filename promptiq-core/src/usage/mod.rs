use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

/// Per-client free-evaluation record. Lives for the process lifetime; the
/// table is volatile by design and resets on restart.
#[derive(Debug, Clone, Default)]
pub struct UsageRecord {
    pub count: u64,
    pub last_used: Option<DateTime<Utc>>,
}

/// Snapshot answer to "can this caller evaluate for free".
#[derive(Debug, Clone)]
pub struct UsageStatus {
    pub can_use_free: bool,
    pub usage_count: u64,
    pub last_used: Option<DateTime<Utc>>,
}

/// Tracks free-evaluation consumption per client key. Keys are resolved
/// network addresses, a heuristic rather than a security boundary. Records
/// are never evicted; counts are monotonically non-decreasing per key.
#[derive(Clone, Default)]
pub struct UsageGate {
    records: Arc<DashMap<String, UsageRecord>>,
}

impl UsageGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Side-effect-free lookup. Unseen keys report a free evaluation available.
    pub fn check(&self, key: &str) -> UsageStatus {
        match self.records.get(key) {
            Some(record) => UsageStatus {
                can_use_free: record.count == 0,
                usage_count: record.count,
                last_used: record.last_used,
            },
            None => UsageStatus {
                can_use_free: true,
                usage_count: 0,
                last_used: None,
            },
        }
    }

    /// Record one consumption and return the new count. The entry API keeps
    /// concurrent increments for the same key from losing updates.
    pub fn record(&self, key: &str) -> u64 {
        let mut record = self.records.entry(key.to_string()).or_default();
        record.count += 1;
        record.last_used = Some(Utc::now());
        record.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unseen_key_can_use_free() {
        let gate = UsageGate::new();
        let status = gate.check("203.0.113.7");
        assert!(status.can_use_free);
        assert_eq!(status.usage_count, 0);
        assert!(status.last_used.is_none());
    }

    #[test]
    fn test_record_consumes_free_evaluation() {
        let gate = UsageGate::new();
        assert_eq!(gate.record("203.0.113.7"), 1);

        let status = gate.check("203.0.113.7");
        assert!(!status.can_use_free);
        assert_eq!(status.usage_count, 1);
        assert!(status.last_used.is_some());
    }

    #[test]
    fn test_counts_are_monotonic_per_key() {
        let gate = UsageGate::new();
        assert_eq!(gate.record("203.0.113.7"), 1);
        assert_eq!(gate.record("203.0.113.7"), 2);
        assert_eq!(gate.record("203.0.113.7"), 3);
    }

    #[test]
    fn test_keys_are_independent() {
        let gate = UsageGate::new();
        gate.record("203.0.113.7");
        assert!(gate.check("198.51.100.2").can_use_free);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let gate = UsageGate::new();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                gate.record("203.0.113.7");
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(gate.check("203.0.113.7").usage_count, 16);
    }
}
