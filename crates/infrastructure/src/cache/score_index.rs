use compact_str::CompactString;
use hostcache_domain::DomainError;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

/// Keys ordered by an integer score, cheapest-first.
///
/// Every `set_score` stamps a fresh sequence number, so among equal scores
/// the key stamped first is the minimum. All operations are O(log n).
#[derive(Debug, Default)]
pub struct ScoreIndex {
    order: BTreeMap<(u64, u64), CompactString>,
    entries: FxHashMap<CompactString, (u64, u64)>,
    next_seq: u64,
}

impl ScoreIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` or moves it to `score`.
    pub fn set_score(&mut self, key: &str, score: u64) {
        if let Some(slot) = self.entries.get(key) {
            self.order.remove(slot);
        }

        let slot = (score, self.next_seq);
        self.next_seq += 1;

        let key = CompactString::from(key);
        self.order.insert(slot, key.clone());
        self.entries.insert(key, slot);
    }

    /// Removes `key`, returning its score if it was present.
    pub fn delete_score(&mut self, key: &str) -> Option<u64> {
        let slot = self.entries.remove(key)?;
        self.order.remove(&slot);
        Some(slot.0)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn min_score(&self) -> Result<u64, DomainError> {
        self.order
            .first_key_value()
            .map(|((score, _), _)| *score)
            .ok_or(DomainError::EmptyIndex)
    }

    pub fn min_key(&self) -> Result<CompactString, DomainError> {
        self.order
            .first_key_value()
            .map(|(_, key)| key.clone())
            .ok_or(DomainError::EmptyIndex)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }
}
