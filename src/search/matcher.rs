//! Best-match selection over a search index snapshot
//!
//! 1. tokenize the query
//! 2. restrict to the category, if one is given
//! 3. prune to entries sharing a token with the query (full scan if none do)
//! 4. score the candidates
//! 5. keep the highest score; ties go to the entry inserted first
//! 6. accept it only if it reaches the threshold
//!
//! Pruning never changes the winner: entries outside the candidate set are
//! still scored whenever their sequence-only upper bound could reach the
//! best candidate score.

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use super::index::SearchIndex;
use super::scorer::{MatchPolicy, QueryFeatures, SimilarityScorer};
use super::tokenizer::Tokenizer;
use super::vector::VectorSpaceModel;
use crate::types::MatchOutcome;

/// Candidate count above which scoring runs on the rayon pool
const PARALLEL_SCORING_THRESHOLD: usize = 512;

/// Matcher settings
#[derive(Debug, Clone, Copy)]
pub struct MatchConfig {
    pub policy: MatchPolicy,
    /// Use the keyword index to skip entries that cannot win
    pub pruning: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            policy: MatchPolicy::Basic,
            pruning: true,
        }
    }
}

/// Finds the single best entry for a query
#[derive(Debug, Clone)]
pub struct Matcher {
    tokenizer: Arc<Tokenizer>,
    scorer: SimilarityScorer,
    pruning: bool,
}

impl Matcher {
    pub fn new(tokenizer: Arc<Tokenizer>, config: MatchConfig) -> Self {
        Self {
            tokenizer,
            scorer: SimilarityScorer::new(config.policy),
            pruning: config.pruning,
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.scorer.policy()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Best entry for `query` within `category` (or the whole corpus).
    ///
    /// Returns the entry when its score reaches `threshold`; otherwise no
    /// entry together with the best score attained. An empty corpus or an
    /// unknown category yields no match with score 0.
    pub fn find_best(
        &self,
        index: &SearchIndex,
        query: &str,
        threshold: f64,
        category: Option<&str>,
    ) -> MatchOutcome {
        let keywords = self.tokenizer.tokenize(query);

        // Stored category names are trimmed, and a blank one means none
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        let scope: Vec<usize> = match category {
            Some(category) => index.positions_in_category(category),
            None => (0..index.len()).collect(),
        };
        if scope.is_empty() {
            debug!(query, ?category, "empty search scope");
            return MatchOutcome::no_match(0.0);
        }

        let model = if self.scorer.policy().uses_vectors() {
            Some(index.vector_model())
        } else {
            None
        };
        let features = self.scorer.features(query, keywords, model);

        let (candidates, rest) = self.partition(index, &features, scope);
        let mut scored = self.score_positions(index, &features, model, &candidates);

        if !rest.is_empty() {
            let best_so_far = scored.iter().map(|(_, s)| *s).fold(0.0, f64::max);
            let contenders: Vec<usize> = rest
                .into_iter()
                .filter(|&pos| {
                    self.scorer
                        .bound_without_overlap(&features, &index.entries()[pos])
                        >= best_so_far
                })
                .collect();
            if !contenders.is_empty() {
                debug!(count = contenders.len(), "scoring pruned entries that could still win");
                scored.extend(self.score_positions(index, &features, model, &contenders));
            }
        }

        let Some((pos, score)) = select_best(&scored) else {
            return MatchOutcome::no_match(0.0);
        };

        let entry = &index.entries()[pos];
        debug!(
            query,
            entry_id = entry.id,
            score,
            candidates = candidates.len(),
            policy = %self.scorer.policy(),
            "best match"
        );

        if score >= threshold {
            MatchOutcome {
                entry: Some(entry.clone()),
                score,
            }
        } else {
            MatchOutcome::no_match(score)
        }
    }

    /// Split the scope into keyword candidates and the remaining entries.
    ///
    /// With pruning off, or when no entry shares a token with the query,
    /// every entry in scope is a candidate.
    fn partition(
        &self,
        index: &SearchIndex,
        features: &QueryFeatures<'_>,
        scope: Vec<usize>,
    ) -> (Vec<usize>, Vec<usize>) {
        if !self.pruning {
            return (scope, Vec::new());
        }

        let ids: HashSet<u64> = index.keyword_candidates(&features.keywords);
        let (candidates, rest): (Vec<usize>, Vec<usize>) = scope
            .iter()
            .partition(|&&pos| ids.contains(&index.entries()[pos].id));

        if candidates.is_empty() {
            (scope, Vec::new())
        } else {
            (candidates, rest)
        }
    }

    fn score_positions(
        &self,
        index: &SearchIndex,
        features: &QueryFeatures<'_>,
        model: Option<&VectorSpaceModel>,
        positions: &[usize],
    ) -> Vec<(usize, f64)> {
        let score = |&pos: &usize| {
            let entry = &index.entries()[pos];
            (pos, self.scorer.score_entry(features, entry, model))
        };

        if positions.len() > PARALLEL_SCORING_THRESHOLD {
            positions.par_iter().map(score).collect()
        } else {
            positions.iter().map(score).collect()
        }
    }
}

/// Highest score; among equal scores the lowest insertion position
fn select_best(scored: &[(usize, f64)]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for &(pos, score) in scored {
        best = match best {
            Some((best_pos, best_score))
                if score < best_score || (score == best_score && pos > best_pos) =>
            {
                Some((best_pos, best_score))
            }
            _ => Some((pos, score)),
        };
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alias, Entry};

    fn entry(id: u64, question: &str, category: Option<&str>, tokenizer: &Tokenizer) -> Entry {
        Entry::new(
            id,
            question.to_string(),
            format!("answer {}", id),
            tokenizer.tokenize(question),
            category.map(|c| c.to_string()),
            String::new(),
        )
    }

    fn matcher(policy: MatchPolicy, pruning: bool) -> Matcher {
        Matcher::new(Arc::new(Tokenizer::new()), MatchConfig { policy, pruning })
    }

    fn restart_corpus(tokenizer: &Tokenizer) -> SearchIndex {
        SearchIndex::from_entries(&[entry(1, "如何重启系统?", None, tokenizer)])
    }

    #[test]
    fn test_select_best_prefers_first_on_tie() {
        assert_eq!(select_best(&[(3, 0.5), (1, 0.5), (2, 0.4)]), Some((1, 0.5)));
        assert_eq!(select_best(&[(0, 0.1), (4, 0.9)]), Some((4, 0.9)));
        assert_eq!(select_best(&[]), None);
    }

    #[test]
    fn test_paraphrase_matches() {
        let m = matcher(MatchPolicy::Basic, true);
        let index = restart_corpus(m.tokenizer());

        let outcome = m.find_best(&index, "怎么重启系统", 0.3, None);
        assert_eq!(outcome.entry.map(|e| e.id), Some(1));
        assert!(outcome.score >= 0.3);
    }

    #[test]
    fn test_unrelated_query_does_not_match() {
        let m = matcher(MatchPolicy::Basic, true);
        let index = restart_corpus(m.tokenizer());

        let outcome = m.find_best(&index, "今天天气如何", 0.3, None);
        assert!(outcome.entry.is_none());
        assert!(outcome.score < 0.3);
        // The attained score is still reported
        assert!(outcome.score > 0.0);
    }

    #[test]
    fn test_empty_corpus_is_no_match() {
        let m = matcher(MatchPolicy::Basic, true);
        let outcome = m.find_best(&SearchIndex::new(), "重启", 0.0, None);
        assert_eq!(outcome, MatchOutcome::no_match(0.0));
    }

    #[test]
    fn test_unknown_category_is_no_match() {
        let m = matcher(MatchPolicy::Basic, true);
        let index = restart_corpus(m.tokenizer());
        let outcome = m.find_best(&index, "如何重启系统?", 0.0, Some("不存在"));
        assert_eq!(outcome, MatchOutcome::no_match(0.0));
    }

    #[test]
    fn test_category_restricts_candidates() {
        let m = matcher(MatchPolicy::Basic, true);
        let t = m.tokenizer();
        let index = SearchIndex::from_entries(&[
            entry(1, "群规是什么?", None, t),
            entry(2, "可以在群里发广告吗?", Some("群管理"), t),
        ]);

        let global = m.find_best(&index, "群规是什么?", 0.0, None);
        assert_eq!(global.entry.map(|e| e.id), Some(1));

        let scoped = m.find_best(&index, "群规是什么?", 0.0, Some("群管理"));
        assert_eq!(scoped.entry.map(|e| e.id), Some(2));
    }

    #[test]
    fn test_category_name_is_trimmed() {
        let m = matcher(MatchPolicy::Basic, true);
        let t = m.tokenizer();
        let index = SearchIndex::from_entries(&[
            entry(1, "如何重启系统?", None, t),
            entry(2, "群里如何重启机器人?", Some("群管理"), t),
        ]);

        let padded = m.find_best(&index, "如何重启系统", 0.0, Some(" 群管理 "));
        assert_eq!(padded.entry.map(|e| e.id), Some(2));

        let blank = m.find_best(&index, "如何重启系统", 0.0, Some("  "));
        assert_eq!(blank.entry.map(|e| e.id), Some(1));
    }

    #[test]
    fn test_alias_phrasing_wins() {
        let m = matcher(MatchPolicy::Basic, true);
        let t = m.tokenizer();
        let mut restart = entry(1, "如何重启系统?", None, t);
        restart
            .aliases
            .push(Alias::new("电脑死机了怎么办".into(), t.tokenize("电脑死机了怎么办")));
        let index = SearchIndex::from_entries(&[restart, entry(2, "群规是什么?", None, t)]);

        let outcome = m.find_best(&index, "电脑死机了怎么办", 0.5, None);
        assert_eq!(outcome.entry.map(|e| e.id), Some(1));
    }

    #[test]
    fn test_tie_goes_to_earliest_entry() {
        let m = matcher(MatchPolicy::Basic, true);
        let t = m.tokenizer();
        let index = SearchIndex::from_entries(&[
            entry(7, "重启系统", None, t),
            entry(3, "重启系统", None, t),
        ]);
        let outcome = m.find_best(&index, "重启系统", 0.0, None);
        assert_eq!(outcome.entry.map(|e| e.id), Some(7));
    }

    #[test]
    fn test_pruned_entry_that_can_still_win_is_scored() {
        let m = matcher(MatchPolicy::Basic, true);
        let t = m.tokenizer();
        // Entry 1 has no keywords at all but is a near-verbatim string match;
        // entry 2 shares the only query keyword and little else.
        let index = SearchIndex::from_entries(&[
            entry(1, "a b c d e f g h i j", None, t),
            entry(2, "zzz qqq www eee rrr ttt yyy uuu iii ooo ppp", None, t),
        ]);
        let query = "a b c d e f g h i j zzz";

        let pruned = m.find_best(&index, query, 0.0, None);
        let full = matcher(MatchPolicy::Basic, false).find_best(&index, query, 0.0, None);
        assert_eq!(pruned, full);
        assert_eq!(pruned.entry.map(|e| e.id), Some(1));
    }

    #[test]
    fn test_advanced_policy_verbatim_match() {
        let m = matcher(MatchPolicy::Advanced, true);
        let t = m.tokenizer();
        let index = SearchIndex::from_entries(&[
            entry(1, "如何重启系统?", None, t),
            entry(2, "怎样安装打印机驱动?", None, t),
        ]);

        let outcome = m.find_best(&index, "怎样安装打印机驱动?", 0.9, None);
        assert_eq!(outcome.entry.map(|e| e.id), Some(2));
        assert!((outcome.score - 1.0).abs() < 1e-9);
        assert!(index.has_vector_model());
    }

    #[test]
    fn test_basic_policy_never_builds_vector_model() {
        let m = matcher(MatchPolicy::Basic, true);
        let index = restart_corpus(m.tokenizer());
        m.find_best(&index, "重启", 0.3, None);
        assert!(!index.has_vector_model());
    }
}
