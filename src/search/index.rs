//! Search index snapshot
//!
//! One immutable view of the corpus paired with everything derived from it:
//! keyword postings, category membership and the lazily built vector model.
//! Writers fork the current snapshot, apply their change, and publish the
//! result; readers keep whichever snapshot they started with.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

use super::keywords::KeywordIndex;
use super::vector::VectorSpaceModel;
use crate::types::Entry;

/// Corpus snapshot with derived indices
#[derive(Debug, Default)]
pub struct SearchIndex {
    /// Entries in insertion order
    entries: Vec<Entry>,

    /// entry id → position in `entries`
    positions: HashMap<u64, usize>,

    /// token → entry ids
    keywords: KeywordIndex,

    /// category → entry ids
    category_index: BTreeMap<String, BTreeSet<u64>>,

    /// Built on first use by a vector-based query
    vector_model: OnceLock<VectorSpaceModel>,
}

impl SearchIndex {
    /// Create a new empty search index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build index from entries in insertion order
    pub fn from_entries(entries: &[Entry]) -> Self {
        let mut index = Self::new();
        index.rebuild(entries);
        index
    }

    /// Rebuild the entire index from scratch
    pub fn rebuild(&mut self, entries: &[Entry]) {
        self.entries.clear();
        self.positions.clear();
        self.keywords = KeywordIndex::new();
        self.category_index.clear();
        self.vector_model = OnceLock::new();

        for entry in entries {
            self.index_entry(entry.clone());
        }
    }

    /// Copy of the corpus and derived indices without the vector model, to be
    /// modified and published as the next snapshot.
    pub fn fork(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            positions: self.positions.clone(),
            keywords: self.keywords.clone(),
            category_index: self.category_index.clone(),
            vector_model: OnceLock::new(),
        }
    }

    /// Append an entry
    pub fn index_entry(&mut self, entry: Entry) {
        if self.positions.contains_key(&entry.id) {
            self.update_entry(entry);
            return;
        }

        self.keywords.insert_entry(&entry);
        if let Some(category) = &entry.category {
            self.category_index
                .entry(category.clone())
                .or_default()
                .insert(entry.id);
        }
        self.positions.insert(entry.id, self.entries.len());
        self.entries.push(entry);
        self.vector_model = OnceLock::new();
    }

    /// Remove an entry from every index
    pub fn remove_entry(&mut self, id: u64) -> Option<Entry> {
        let pos = self.positions.remove(&id)?;
        let entry = self.entries.remove(pos);

        self.keywords.remove_entry(&entry);
        if let Some(category) = &entry.category {
            if let Some(set) = self.category_index.get_mut(category) {
                set.remove(&id);
                if set.is_empty() {
                    self.category_index.remove(category);
                }
            }
        }

        for (i, e) in self.entries.iter().enumerate().skip(pos) {
            self.positions.insert(e.id, i);
        }
        self.vector_model = OnceLock::new();
        Some(entry)
    }

    /// Replace an entry in place, keeping its insertion position
    pub fn update_entry(&mut self, entry: Entry) {
        let Some(&pos) = self.positions.get(&entry.id) else {
            self.index_entry(entry);
            return;
        };

        let old = std::mem::replace(&mut self.entries[pos], entry);
        self.keywords.remove_entry(&old);
        if let Some(category) = &old.category {
            if let Some(set) = self.category_index.get_mut(category) {
                set.remove(&old.id);
                if set.is_empty() {
                    self.category_index.remove(category);
                }
            }
        }

        let new = &self.entries[pos];
        self.keywords.insert_entry(new);
        if let Some(category) = &new.category {
            self.category_index
                .entry(category.clone())
                .or_default()
                .insert(new.id);
        }
        self.vector_model = OnceLock::new();
    }

    /// Vector model over this snapshot's entries, built on first call
    pub fn vector_model(&self) -> &VectorSpaceModel {
        self.vector_model
            .get_or_init(|| VectorSpaceModel::build(&self.entries))
    }

    pub fn has_vector_model(&self) -> bool {
        self.vector_model.get().is_some()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Get entry by id (O(1) lookup)
    pub fn get_entry(&self, id: u64) -> Option<&Entry> {
        self.positions.get(&id).map(|&pos| &self.entries[pos])
    }

    /// Insertion position of an entry
    pub fn position(&self, id: u64) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// Positions of a category's entries, ascending. Unknown categories are
    /// empty.
    pub fn positions_in_category(&self, category: &str) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .category_index
            .get(category)
            .map(|ids| ids.iter().filter_map(|id| self.position(*id)).collect())
            .unwrap_or_default();
        positions.sort_unstable();
        positions
    }

    /// Entry ids in a category
    pub fn get_by_category(&self, category: &str) -> HashSet<u64> {
        self.category_index
            .get(category)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Candidate ids sharing at least one token with the query
    pub fn keyword_candidates(&self, query_keywords: &[String]) -> HashSet<u64> {
        self.keywords.candidates(query_keywords)
    }

    pub fn keyword_index(&self) -> &KeywordIndex {
        &self.keywords
    }

    pub fn contains(&self, id: u64) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            entry_count: self.entries.len(),
            unique_tokens: self.keywords.token_count(),
            category_count: self.category_index.len(),
            vector_model_built: self.has_vector_model(),
        }
    }
}

/// Index statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct IndexStats {
    pub entry_count: usize,
    pub unique_tokens: usize,
    pub category_count: usize,
    pub vector_model_built: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entry(id: u64, keywords: &[&str], category: Option<&str>) -> Entry {
        Entry::new(
            id,
            format!("q{}", id),
            format!("a{}", id),
            keywords.iter().map(|k| k.to_string()).collect(),
            category.map(|c| c.to_string()),
            String::new(),
        )
    }

    #[test]
    fn test_index_and_lookup() {
        let index = SearchIndex::from_entries(&[
            make_entry(1, &["重启", "系统"], Some("电脑问题")),
            make_entry(2, &["群规"], Some("群管理")),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get_entry(2).map(|e| e.answer.as_str()), Some("a2"));
        assert_eq!(index.keyword_candidates(&["群规".to_string()]), HashSet::from([2]));
        assert_eq!(index.get_by_category("电脑问题"), HashSet::from([1]));
    }

    #[test]
    fn test_remove_entry_shifts_positions() {
        let mut index = SearchIndex::from_entries(&[
            make_entry(1, &["重启"], Some("电脑问题")),
            make_entry(2, &["群规"], None),
            make_entry(3, &["系统"], Some("电脑问题")),
        ]);

        let removed = index.remove_entry(1).unwrap();
        assert_eq!(removed.id, 1);
        assert!(!index.contains(1));
        assert!(!index.keyword_index().references(1));
        assert_eq!(index.get_by_category("电脑问题"), HashSet::from([3]));
        assert_eq!(index.position(2), Some(0));
        assert_eq!(index.position(3), Some(1));
        assert!(index.remove_entry(1).is_none());
    }

    #[test]
    fn test_update_keeps_position_and_reindexes() {
        let mut index = SearchIndex::from_entries(&[
            make_entry(1, &["重启"], Some("电脑问题")),
            make_entry(2, &["群规"], None),
        ]);

        index.update_entry(make_entry(1, &["关机"], Some("群管理")));

        assert_eq!(index.position(1), Some(0));
        assert!(index.keyword_candidates(&["重启".to_string()]).is_empty());
        assert_eq!(index.keyword_candidates(&["关机".to_string()]), HashSet::from([1]));
        assert!(index.get_by_category("电脑问题").is_empty());
        assert_eq!(index.positions_in_category("群管理"), vec![0]);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let index = SearchIndex::from_entries(&[make_entry(1, &["重启"], None)]);
        assert!(index.positions_in_category("不存在").is_empty());
    }

    #[test]
    fn test_vector_model_is_lazy_and_dropped_by_fork() {
        let index = SearchIndex::from_entries(&[make_entry(1, &["重启"], None)]);
        assert!(!index.has_vector_model());
        assert_eq!(index.vector_model().row_count(), 1);
        assert!(index.has_vector_model());

        let mut next = index.fork();
        assert!(!next.has_vector_model());
        next.index_entry(make_entry(2, &["群规"], None));
        assert_eq!(next.vector_model().row_count(), 2);
        // The original snapshot is untouched
        assert_eq!(index.vector_model().row_count(), 1);
    }
}
