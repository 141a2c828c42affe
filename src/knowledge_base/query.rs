//! Read operations and matching for the knowledge base
//!
//! Everything here reads a published snapshot, so queries never wait on
//! writers and always see a corpus paired with its own indices.

use std::sync::atomic::Ordering;

use tracing::debug;

use crate::error::{QaError, QaResult};
use crate::types::{Alias, Entry, EntryBrief, MatchOutcome, QueryResult};

use super::KnowledgeBase;

/// Get an entry by id
pub fn get(kb: &KnowledgeBase, id: u64) -> Option<Entry> {
    kb.snapshot().get_entry(id).cloned()
}

/// All entries in insertion order
pub fn list_all(kb: &KnowledgeBase) -> Vec<Entry> {
    kb.snapshot().entries().to_vec()
}

/// Entries of one category in insertion order; unknown categories are empty
pub fn list_by_category(kb: &KnowledgeBase, category: &str) -> Vec<Entry> {
    let snapshot = kb.snapshot();
    snapshot
        .positions_in_category(category.trim())
        .into_iter()
        .map(|pos| snapshot.entries()[pos].clone())
        .collect()
}

/// Id / question / category listing, optionally restricted to a category
pub fn list_brief(kb: &KnowledgeBase, category: Option<&str>) -> Vec<EntryBrief> {
    let snapshot = kb.snapshot();
    match category {
        Some(category) => snapshot
            .positions_in_category(category.trim())
            .into_iter()
            .map(|pos| EntryBrief::from(&snapshot.entries()[pos]))
            .collect(),
        None => snapshot.entries().iter().map(EntryBrief::from).collect(),
    }
}

/// Known category names, sorted. Categories stay listed after their last
/// entry leaves.
pub fn list_categories(kb: &KnowledgeBase) -> Vec<String> {
    kb.data.read().categories.keys().cloned().collect()
}

pub fn aliases(kb: &KnowledgeBase, id: u64) -> Option<Vec<Alias>> {
    kb.snapshot().get_entry(id).map(|e| e.aliases.clone())
}

/// Run the matcher against the current snapshot without touching counters
pub fn find_best(
    kb: &KnowledgeBase,
    text: &str,
    threshold: f64,
    category: Option<&str>,
) -> MatchOutcome {
    let snapshot = kb.snapshot();
    kb.matcher.find_best(&snapshot, text, threshold, category)
}

/// Answer a query and count it in the statistics
pub fn query(
    kb: &KnowledgeBase,
    text: &str,
    threshold: Option<f64>,
    category: Option<&str>,
) -> QaResult<QueryResult> {
    let threshold = threshold.unwrap_or(kb.default_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(QaError::invalid(format!(
            "threshold {} must be between 0 and 1",
            threshold
        )));
    }

    let outcome = find_best(kb, text, threshold, category);

    kb.total_queries.fetch_add(1, Ordering::Relaxed);
    if outcome.is_match() {
        kb.matched_queries.fetch_add(1, Ordering::Relaxed);
    }
    debug!(
        query = text,
        matched = outcome.is_match(),
        score = outcome.score,
        "query answered"
    );

    Ok(QueryResult::from(outcome))
}
