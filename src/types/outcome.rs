//! Match outcomes and batch reports

use serde::{Deserialize, Serialize};

use super::Entry;

/// Result of running the matcher over a snapshot.
///
/// `score` is the best score attained even when no entry cleared the
/// threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub entry: Option<Entry>,
    pub score: f64,
}

impl MatchOutcome {
    pub fn no_match(score: f64) -> Self {
        Self { entry: None, score }
    }

    pub fn is_match(&self) -> bool {
        self.entry.is_some()
    }
}

/// Caller-facing query answer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResult {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub score: f64,
}

impl From<MatchOutcome> for QueryResult {
    fn from(outcome: MatchOutcome) -> Self {
        match outcome.entry {
            Some(entry) => Self {
                matched: true,
                entry_id: Some(entry.id),
                question: Some(entry.question),
                answer: Some(entry.answer),
                score: outcome.score,
            },
            None => Self {
                matched: false,
                entry_id: None,
                question: None,
                answer: None,
                score: outcome.score,
            },
        }
    }
}

/// One record of a batch import. Fields are optional so malformed records
/// deserialize and can be skipped individually.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchRecord {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl BatchRecord {
    pub fn new(question: &str, answer: &str, category: Option<&str>) -> Self {
        Self {
            question: Some(question.to_string()),
            answer: Some(answer.to_string()),
            category: category.map(|c| c.to_string()),
        }
    }
}

/// Which records of a batch were stored
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchReport {
    /// Ids assigned to stored records, in record order
    pub added: Vec<u64>,
    /// Positions (0-based) of records that were skipped
    pub skipped: Vec<usize>,
}
