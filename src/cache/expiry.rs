//! Expiry Index Module
//!
//! Orders keys by expiry time for soonest-to-expire eviction and for sweeping.

use std::collections::BTreeSet;

// == Expiry Index ==
/// Tracks keys ordered by `(expires_at, seq)`.
///
/// The first element is the soonest-to-expire entry; among equal expiries the
/// earliest inserted comes first.
#[derive(Debug, Default)]
pub struct ExpiryIndex {
    order: BTreeSet<(u64, u64, String)>,
}

impl ExpiryIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            order: BTreeSet::new(),
        }
    }

    // == Insert ==
    pub fn insert(&mut self, expires_at: u64, seq: u64, key: &str) {
        self.order.insert((expires_at, seq, key.to_string()));
    }

    // == Remove ==
    /// Removes a tracked position. Callers pass the entry's current expiry and seq.
    pub fn remove(&mut self, expires_at: u64, seq: u64, key: &str) {
        self.order.remove(&(expires_at, seq, key.to_string()));
    }

    // == Pop Soonest ==
    /// Returns and removes the soonest-to-expire key.
    pub fn pop_soonest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, _, key)| key)
    }

    // == Peek Soonest ==
    /// Returns the soonest-to-expire key without removing it.
    #[allow(dead_code)]
    pub fn peek_soonest(&self) -> Option<&str> {
        self.order.first().map(|(_, _, key)| key.as_str())
    }

    // == Drain Expired ==
    /// Removes and returns every key whose expiry is strictly before `now_ms`.
    ///
    /// Only touches expired positions, so the cost is proportional to the
    /// number of entries removed.
    pub fn drain_expired(&mut self, now_ms: u64) -> Vec<String> {
        let mut expired = Vec::new();
        while let Some((expires_at, _, _)) = self.order.first() {
            if *expires_at >= now_ms {
                break;
            }
            if let Some((_, _, key)) = self.order.pop_first() {
                expired.push(key);
            }
        }
        expired
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_new() {
        let index = ExpiryIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_pop_soonest_by_expiry_not_insertion() {
        let mut index = ExpiryIndex::new();

        index.insert(500, 0, "late");
        index.insert(100, 1, "early");
        index.insert(300, 2, "middle");

        assert_eq!(index.peek_soonest(), Some("early"));
        assert_eq!(index.pop_soonest(), Some("early".to_string()));
        assert_eq!(index.pop_soonest(), Some("middle".to_string()));
        assert_eq!(index.pop_soonest(), Some("late".to_string()));
        assert_eq!(index.pop_soonest(), None);
    }

    #[test]
    fn test_equal_expiry_breaks_tie_by_seq() {
        let mut index = ExpiryIndex::new();

        index.insert(100, 7, "b");
        index.insert(100, 3, "z");
        index.insert(100, 5, "a");

        assert_eq!(index.pop_soonest(), Some("z".to_string()));
        assert_eq!(index.pop_soonest(), Some("a".to_string()));
        assert_eq!(index.pop_soonest(), Some("b".to_string()));
    }

    #[test]
    fn test_remove() {
        let mut index = ExpiryIndex::new();

        index.insert(100, 0, "key1");
        index.insert(200, 1, "key2");
        index.remove(100, 0, "key1");

        assert_eq!(index.len(), 1);
        assert_eq!(index.peek_soonest(), Some("key2"));
    }

    #[test]
    fn test_remove_nonexistent_position() {
        let mut index = ExpiryIndex::new();

        index.insert(100, 0, "key1");
        index.remove(999, 0, "key1");
        index.remove(100, 0, "nonexistent");

        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_drain_expired_stops_at_live_entries() {
        let mut index = ExpiryIndex::new();

        index.insert(100, 0, "a");
        index.insert(200, 1, "b");
        index.insert(300, 2, "c");

        // "b" expires at 200 and is still live at exactly 200.
        let drained = index.drain_expired(200);

        assert_eq!(drained, vec!["a".to_string()]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.peek_soonest(), Some("b"));
    }

    #[test]
    fn test_drain_expired_empty() {
        let mut index = ExpiryIndex::new();
        assert!(index.drain_expired(1_000).is_empty());
    }
}
