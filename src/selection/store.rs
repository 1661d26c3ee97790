//! Selection store keyed by region id
//!
//! Entries are replaced whole, never patched in place. Enumeration follows
//! selection order.

use super::SelectionDetail;
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    entries: IndexMap<String, SelectionDetail>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, region_id: &str) -> Option<&SelectionDetail> {
        self.entries.get(region_id)
    }

    pub fn contains(&self, region_id: &str) -> bool {
        self.entries.contains_key(region_id)
    }

    /// Insert or replace the detail for `region_id`
    pub fn set(&mut self, region_id: impl Into<String>, detail: SelectionDetail) {
        self.entries.insert(region_id.into(), detail);
    }

    /// Remove the entry, keeping the order of the others
    pub fn remove(&mut self, region_id: &str) -> Option<SelectionDetail> {
        self.entries.shift_remove(region_id)
    }

    pub fn all(&self) -> impl Iterator<Item = &SelectionDetail> {
        self.entries.values()
    }

    /// Copy of the current id to detail mapping
    pub fn snapshot(&self) -> IndexMap<String, SelectionDetail> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Attributes;

    fn detail(id: &str) -> SelectionDetail {
        SelectionDetail {
            region_id: id.to_string(),
            attributes: Attributes::new(),
            neighbors: None,
        }
    }

    #[test]
    fn test_set_get_remove() {
        let mut store = SelectionStore::new();
        store.set("A", detail("A"));
        assert!(store.contains("A"));
        assert_eq!(store.get("A").map(|d| d.region_id.as_str()), Some("A"));
        assert!(store.remove("A").is_some());
        assert!(store.get("A").is_none());
        assert!(store.remove("A").is_none());
    }

    #[test]
    fn test_set_replaces_without_duplicating() {
        let mut store = SelectionStore::new();
        store.set("A", detail("A"));
        let mut replacement = detail("A");
        replacement.neighbors = Some(vec![]);
        store.set("A", replacement);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("A").unwrap().neighbors, Some(vec![]));
    }

    #[test]
    fn test_enumeration_keeps_selection_order() {
        let mut store = SelectionStore::new();
        for id in ["C", "A", "B"] {
            store.set(id, detail(id));
        }
        store.remove("A");
        let ids: Vec<&str> = store.all().map(|d| d.region_id.as_str()).collect();
        assert_eq!(ids, vec!["C", "B"]);
    }
}
