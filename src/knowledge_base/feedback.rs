//! Feedback votes and query statistics

use tracing::{debug, info};

use crate::error::QaResult;
use crate::types::{Feedback, StatsReport};

use super::KnowledgeBase;

/// Count a helpful / not-helpful vote; false if the entry does not exist
pub fn record_feedback(kb: &KnowledgeBase, id: u64, helpful: bool) -> QaResult<bool> {
    let recorded = kb.write_data(|data| {
        if data.get(id).is_none() {
            return Ok(None);
        }
        data.feedback.entry(id.to_string()).or_default().record(helpful);
        Ok(Some(()))
    })?;

    if recorded.is_some() {
        debug!(id, helpful, "feedback recorded");
    }
    Ok(recorded.is_some())
}

pub fn feedback(kb: &KnowledgeBase, id: u64) -> Option<Feedback> {
    kb.data.read().feedback.get(&id.to_string()).copied()
}

/// Query counters, aggregated feedback and corpus size
pub fn stats(kb: &KnowledgeBase) -> StatsReport {
    let counters = kb.query_stats();
    let data = kb.data.read();

    let (helpful, total_feedback) = data
        .feedback
        .values()
        .fold((0, 0), |(helpful, total), fb| {
            (helpful + fb.helpful, total + fb.total())
        });
    let helpful_rate = if total_feedback == 0 {
        None
    } else {
        Some(helpful as f64 / total_feedback as f64 * 100.0)
    };

    StatsReport {
        total_queries: counters.total_queries,
        matched_queries: counters.matched_queries,
        match_rate: counters.match_rate(),
        total_feedback,
        helpful_rate,
        entry_count: data.entry_count(),
        category_count: data.categories.len(),
    }
}

/// Persist the query counters. Queries only bump in-memory counters; they
/// reach storage with the next write or with this call.
pub fn flush_stats(kb: &KnowledgeBase) -> QaResult<()> {
    let mut data = kb.data.write();
    kb.persist(&mut data)?;
    info!(
        total_queries = data.stats.total_queries,
        matched_queries = data.stats.matched_queries,
        "statistics flushed"
    );
    Ok(())
}
