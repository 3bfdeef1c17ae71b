//! The normalized hit collection.
//!
//! Records are shared as `Arc<Hit>` and never mutated in place. An update
//! builds a new record from the old one and swaps the map entry, so any
//! snapshot taken earlier (a cloned `HitMap`) keeps seeing the old record.

use std::collections::HashMap;
use std::sync::Arc;

use crate::api::Hit;

/// Insertion-ordered map from file id to hit record.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    order: Vec<String>,
    records: HashMap<String, Arc<Hit>>,
}

impl HitMap {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a result set. A repeated file id keeps its first position
    /// and its last record.
    pub fn from_hits(hits: impl IntoIterator<Item = Hit>) -> Self {
        let mut map = Self::new();
        for hit in hits {
            map.insert(hit);
        }
        map
    }

    /// Insert or replace a record.
    pub fn insert(&mut self, hit: Hit) {
        let id = hit.file_id.clone();
        if self.records.insert(id.clone(), Arc::new(hit)).is_none() {
            self.order.push(id);
        }
    }

    /// Look up a record.
    pub fn get(&self, file_id: &str) -> Option<&Arc<Hit>> {
        self.records.get(file_id)
    }

    /// Whether a record exists for `file_id`.
    pub fn contains(&self, file_id: &str) -> bool {
        self.records.contains_key(file_id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Hit>> + '_ {
        self.order.iter().filter_map(move |id| self.records.get(id))
    }

    /// The record at a display position.
    pub fn get_index(&self, index: usize) -> Option<&Arc<Hit>> {
        self.order.get(index).and_then(|id| self.records.get(id))
    }

    /// Return a copy of this map where the record for `file_id` has been
    /// rebuilt by `f`. Returns `None` if there is no such record.
    pub fn with_updated<F>(&self, file_id: &str, f: F) -> Option<Self>
    where
        F: FnOnce(&Hit) -> Hit,
    {
        let old = self.records.get(file_id)?;
        let new = f(old);

        let mut next = self.clone();
        next.records.insert(file_id.to_string(), Arc::new(new));
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let map = HitMap::from_hits(vec![Hit::new("b"), Hit::new("a"), Hit::new("c")]);
        let ids: Vec<&str> = map.iter().map(|h| h.file_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(map.get_index(1).unwrap().file_id, "a");
    }

    #[test]
    fn test_duplicate_id_keeps_position() {
        let map = HitMap::from_hits(vec![
            Hit::new("a"),
            Hit::new("b"),
            Hit::new("a").with_tags(["x"]),
        ]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index(0).unwrap().tag_names(), vec!["x"]);
    }

    #[test]
    fn test_with_updated_is_copy_on_write() {
        let before = HitMap::from_hits(vec![Hit::new("a")]);
        let after = before
            .with_updated("a", |hit| Hit {
                fetching: true,
                ..hit.clone()
            })
            .unwrap();

        assert!(!before.get("a").unwrap().fetching);
        assert!(after.get("a").unwrap().fetching);
    }

    #[test]
    fn test_with_updated_unknown_id() {
        let map = HitMap::from_hits(vec![Hit::new("a")]);
        assert!(map.with_updated("zzz", |h| h.clone()).is_none());
    }

    #[test]
    fn test_untouched_records_are_shared() {
        let before = HitMap::from_hits(vec![Hit::new("a"), Hit::new("b")]);
        let after = before.with_updated("a", |h| h.clone()).unwrap();
        assert!(Arc::ptr_eq(before.get("b").unwrap(), after.get("b").unwrap()));
        assert!(!Arc::ptr_eq(before.get("a").unwrap(), after.get("a").unwrap()));
    }
}
