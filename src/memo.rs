//! Session-scoped TTL memo for API results.
//!
//! Both outbound calls (geocoding and archive weather) memoize their
//! results for one hour, keyed by the exact input. In-memory only —
//! nothing outlives the process.

use std::collections::HashMap;

/// Default TTL for API memos: one hour, in milliseconds.
pub const DEFAULT_TTL_MS: i64 = 3600 * 1000;

struct Entry<V> {
    value: V,
    timestamp: i64,
}

/// A key→value memo where entries expire after a fixed TTL.
/// No eviction beyond expiry; the access pattern is a handful of keys
/// per session.
pub struct TtlMemo<V> {
    ttl_ms: i64,
    entries: HashMap<String, Entry<V>>,
}

impl<V: Clone> TtlMemo<V> {
    pub fn new(ttl_ms: i64) -> Self {
        Self {
            ttl_ms,
            entries: HashMap::new(),
        }
    }

    /// Look up a key. Returns None if missing or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        let now = chrono::Utc::now().timestamp_millis();
        if now - entry.timestamp > self.ttl_ms {
            return None; // expired
        }
        Some(entry.value.clone())
    }

    /// Store a value under a key, stamping it with the current time.
    pub fn put(&mut self, key: &str, value: V) {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone> Default for TtlMemo<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get() {
        let mut memo: TtlMemo<f64> = TtlMemo::default();
        memo.put("new york", 40.7128);
        assert_eq!(memo.get("new york"), Some(40.7128));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_miss() {
        let memo: TtlMemo<f64> = TtlMemo::default();
        assert!(memo.get("nowhere").is_none());
        assert!(memo.is_empty());
    }

    #[test]
    fn test_overwrite_refreshes() {
        let mut memo: TtlMemo<&'static str> = TtlMemo::default();
        memo.put("k", "first");
        memo.put("k", "second");
        assert_eq!(memo.get("k"), Some("second"));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_expiry() {
        let mut memo: TtlMemo<u32> = TtlMemo::new(10); // 10 ms TTL
        memo.put("k", 1);
        assert_eq!(memo.get("k"), Some(1));
        std::thread::sleep(std::time::Duration::from_millis(25));
        assert!(memo.get("k").is_none());
    }
}
