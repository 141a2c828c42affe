//! Feedback and query statistics

use serde::{Deserialize, Serialize};

/// Helpful / not-helpful votes recorded against one entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub helpful: u64,
    pub not_helpful: u64,
}

impl Feedback {
    pub fn record(&mut self, is_helpful: bool) {
        if is_helpful {
            self.helpful += 1;
        } else {
            self.not_helpful += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.helpful + self.not_helpful
    }
}

/// Query counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_queries: u64,
    pub matched_queries: u64,
}

impl Stats {
    /// Percentage of queries that produced a match, if any were recorded
    pub fn match_rate(&self) -> Option<f64> {
        if self.total_queries == 0 {
            None
        } else {
            Some(self.matched_queries as f64 / self.total_queries as f64 * 100.0)
        }
    }
}

/// Statistics report combining counters and aggregated feedback
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub total_queries: u64,
    pub matched_queries: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_rate: Option<f64>,
    pub total_feedback: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helpful_rate: Option<f64>,
    pub entry_count: usize,
    pub category_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_record() {
        let mut fb = Feedback::default();
        fb.record(true);
        fb.record(true);
        fb.record(false);
        assert_eq!(fb.helpful, 2);
        assert_eq!(fb.not_helpful, 1);
        assert_eq!(fb.total(), 3);
    }

    #[test]
    fn test_match_rate() {
        assert_eq!(Stats::default().match_rate(), None);
        let stats = Stats {
            total_queries: 4,
            matched_queries: 1,
        };
        assert_eq!(stats.match_rate(), Some(25.0));
    }
}
