//! Persisted data document

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Entry, Feedback, Stats};

/// Everything the store persists: entries, category index, feedback, counters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QaData {
    #[serde(default)]
    pub questions: Vec<Entry>,
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<u64>>,
    /// Keyed by entry id rendered as a string
    #[serde(default)]
    pub feedback: BTreeMap<String, Feedback>,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub next_id: u64,
}

impl QaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repair derived fields after loading.
    ///
    /// Category membership is rebuilt from each entry's `category` (known
    /// category names are kept, even when empty), and `next_id` is raised
    /// past every id ever seen so ids are never reused. An id repeated in
    /// the document keeps its first holder; later holders get fresh ids.
    pub fn normalize(&mut self) {
        let max_id = self.questions.iter().map(|e| e.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(max_id + 1).max(1);

        let mut seen = HashSet::new();
        for pos in 0..self.questions.len() {
            let id = self.questions[pos].id;
            if !seen.insert(id) {
                let fresh = self.allocate_id();
                warn!(id, new_id = fresh, "duplicate entry id in data file, reassigned");
                self.questions[pos].id = fresh;
                seen.insert(fresh);
            }
        }

        for ids in self.categories.values_mut() {
            ids.clear();
        }
        for entry in &self.questions {
            if let Some(category) = &entry.category {
                self.categories
                    .entry(category.clone())
                    .or_default()
                    .push(entry.id);
            }
        }
    }

    /// Take the next id and advance the counter
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn position(&self, id: u64) -> Option<usize> {
        self.questions.iter().position(|e| e.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&Entry> {
        self.questions.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Entry> {
        self.questions.iter_mut().find(|e| e.id == id)
    }

    pub fn add_to_category(&mut self, category: &str, id: u64) {
        let ids = self.categories.entry(category.to_string()).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// Remove `id` from `category`; the category itself is kept even when it
    /// becomes empty so it stays listed.
    pub fn remove_from_category(&mut self, category: &str, id: u64) {
        if let Some(ids) = self.categories.get_mut(category) {
            ids.retain(|&existing| existing != id);
        }
    }

    pub fn entry_count(&self) -> usize {
        self.questions.len()
    }
}
