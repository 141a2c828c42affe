//! Multi-signal similarity scoring

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::sequence::{sequence_ratio, sequence_upper_bound};
use super::vector::{cosine, SparseVector, VectorSpaceModel};
use crate::error::QaError;
use crate::types::Entry;

/// Named weighting of the similarity signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// `0.7 * keyword overlap + 0.3 * sequence similarity`
    #[default]
    Basic,
    /// `0.3 * vector cosine + 0.7 * sequence similarity`
    Advanced,
}

/// Signal weights of a policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub keyword: f64,
    pub sequence: f64,
    pub vector: f64,
}

impl MatchPolicy {
    pub fn weights(self) -> Weights {
        match self {
            MatchPolicy::Basic => Weights {
                keyword: 0.7,
                sequence: 0.3,
                vector: 0.0,
            },
            MatchPolicy::Advanced => Weights {
                keyword: 0.0,
                sequence: 0.7,
                vector: 0.3,
            },
        }
    }

    /// Whether scoring needs the vector space model
    pub fn uses_vectors(self) -> bool {
        self.weights().vector > 0.0
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchPolicy::Basic => "basic",
            MatchPolicy::Advanced => "advanced",
        }
    }
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchPolicy {
    type Err = QaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(MatchPolicy::Basic),
            "advanced" | "vector" => Ok(MatchPolicy::Advanced),
            other => Err(QaError::Config(format!(
                "unknown match policy '{}', expected 'basic' or 'advanced'",
                other
            ))),
        }
    }
}

/// Query side of a comparison, computed once per query
#[derive(Debug, Clone)]
pub struct QueryFeatures<'a> {
    pub text: &'a str,
    pub keywords: Vec<String>,
    keyword_set: HashSet<String>,
    vector: Option<SparseVector>,
}

impl<'a> QueryFeatures<'a> {
    pub fn keyword_set(&self) -> &HashSet<String> {
        &self.keyword_set
    }
}

/// `|Q ∩ C| / max(|Q|, |C|)` over distinct tokens; 0 when either side is empty
pub fn keyword_overlap(query: &HashSet<String>, candidate: &[String]) -> f64 {
    let candidate: HashSet<&str> = candidate.iter().map(String::as_str).collect();
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }
    let common = query
        .iter()
        .filter(|t| candidate.contains(t.as_str()))
        .count();
    common as f64 / query.len().max(candidate.len()) as f64
}

/// Combines keyword, sequence and vector signals under one policy
#[derive(Debug, Clone, Copy)]
pub struct SimilarityScorer {
    policy: MatchPolicy,
    weights: Weights,
}

impl SimilarityScorer {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            policy,
            weights: policy.weights(),
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Prepare the query side. `model` is only consulted by policies that
    /// use vectors.
    pub fn features<'a>(
        &self,
        text: &'a str,
        keywords: Vec<String>,
        model: Option<&VectorSpaceModel>,
    ) -> QueryFeatures<'a> {
        let vector = if self.policy.uses_vectors() {
            model.map(|m| m.vectorize_tokens(&keywords))
        } else {
            None
        };
        let keyword_set = keywords.iter().cloned().collect();
        QueryFeatures {
            text,
            keywords,
            keyword_set,
            vector,
        }
    }

    /// Score one phrasing of a candidate
    pub fn score_phrasing(
        &self,
        query: &QueryFeatures<'_>,
        text: &str,
        keywords: &[String],
        row: Option<&SparseVector>,
    ) -> f64 {
        let w = self.weights;
        let mut score = 0.0;
        if w.keyword > 0.0 {
            score += w.keyword * keyword_overlap(&query.keyword_set, keywords);
        }
        if w.sequence > 0.0 {
            score += w.sequence * sequence_ratio(query.text, text);
        }
        if w.vector > 0.0 {
            if let (Some(q), Some(r)) = (&query.vector, row) {
                score += w.vector * cosine(q, r);
            }
        }
        score
    }

    /// Best score over the primary question and every alias
    pub fn score_entry(
        &self,
        query: &QueryFeatures<'_>,
        entry: &Entry,
        model: Option<&VectorSpaceModel>,
    ) -> f64 {
        let rows = if self.policy.uses_vectors() {
            model.and_then(|m| m.rows_for(entry.id))
        } else {
            None
        };

        entry
            .phrasings()
            .enumerate()
            .map(|(i, (text, keywords))| {
                let row = rows.and_then(|r| r.get(i));
                self.score_phrasing(query, text, keywords, row)
            })
            .fold(0.0, f64::max)
    }

    /// Upper bound on [`score_entry`](Self::score_entry) for an entry sharing
    /// no token with the query.
    ///
    /// Without a shared token both the keyword overlap and the cosine are 0,
    /// leaving only the sequence signal, which `quick_ratio` bounds.
    pub fn bound_without_overlap(&self, query: &QueryFeatures<'_>, entry: &Entry) -> f64 {
        let w = self.weights.sequence;
        entry
            .phrasings()
            .map(|(text, _)| w * sequence_upper_bound(query.text, text))
            .fold(0.0, f64::max)
    }
}

impl Default for SimilarityScorer {
    fn default() -> Self {
        Self::new(MatchPolicy::default())
    }
}
