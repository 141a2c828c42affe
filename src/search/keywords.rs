//! Keyword inverted index used to prune match candidates

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::types::Entry;

/// token → ids of entries whose question or alias keywords contain it
#[derive(Debug, Default, Clone)]
pub struct KeywordIndex {
    postings: HashMap<String, BTreeSet<u64>>,
}

impl KeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` to the posting set of every token in `keywords`
    pub fn insert(&mut self, id: u64, keywords: &[String]) {
        for token in keywords {
            self.postings.entry(token.clone()).or_default().insert(id);
        }
    }

    /// Remove `id` from the posting sets of `keywords`, dropping emptied tokens
    pub fn remove(&mut self, id: u64, keywords: &[String]) {
        for token in keywords {
            if let Some(set) = self.postings.get_mut(token) {
                set.remove(&id);
                if set.is_empty() {
                    self.postings.remove(token);
                }
            }
        }
    }

    /// Index the primary and alias keywords of an entry
    pub fn insert_entry(&mut self, entry: &Entry) {
        for (_, keywords) in entry.phrasings() {
            self.insert(entry.id, keywords);
        }
    }

    /// Remove every keyword of an entry from the index
    pub fn remove_entry(&mut self, entry: &Entry) {
        for (_, keywords) in entry.phrasings() {
            self.remove(entry.id, keywords);
        }
    }

    /// Union of posting sets for the query keywords.
    ///
    /// An empty result means no token overlaps any indexed entry; callers
    /// are expected to fall back to a full scan.
    pub fn candidates(&self, query_keywords: &[String]) -> HashSet<u64> {
        let mut result = HashSet::new();
        for token in query_keywords {
            if let Some(ids) = self.postings.get(token) {
                result.extend(ids.iter().copied());
            }
        }
        result
    }

    /// Whether `id` is posted under `token`
    pub fn contains(&self, token: &str, id: u64) -> bool {
        self.postings
            .get(token)
            .map(|ids| ids.contains(&id))
            .unwrap_or(false)
    }

    /// Whether `id` appears under any token
    pub fn references(&self, id: u64) -> bool {
        self.postings.values().any(|ids| ids.contains(&id))
    }

    pub fn token_count(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}
