//! Knowledge Base - the QA entry store
//!
//! Owns the persisted [`QaData`] document and publishes immutable
//! [`SearchIndex`] snapshots that queries run against without locking.
//!
//! Writers serialize on the `data` lock: they mutate a copy of the document,
//! persist it, then swap in both the new document and the new snapshot.
//! Readers clone the current `Arc<SearchIndex>` and never block writers.

mod crud;
mod feedback;
mod import;
mod query;

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::config::{Config, DEFAULT_THRESHOLD};
use crate::error::QaResult;
use crate::search::{IndexStats, MatchConfig, Matcher, SearchIndex, Tokenizer};
use crate::storage::{JsonFileStorage, MemoryStorage, Storage};
use crate::types::{
    Alias, BatchRecord, BatchReport, Entry, EntryBrief, Feedback, MatchOutcome, QaData,
    QueryResult, Stats, StatsReport,
};

/// QA store with a lock-free query path
pub struct KnowledgeBase {
    pub(crate) storage: Box<dyn Storage>,
    pub(crate) data: RwLock<QaData>,
    pub(crate) index: RwLock<Arc<SearchIndex>>,
    pub(crate) tokenizer: Arc<Tokenizer>,
    pub(crate) matcher: Matcher,
    pub(crate) default_threshold: f64,
    pub(crate) total_queries: AtomicU64,
    pub(crate) matched_queries: AtomicU64,
}

impl KnowledgeBase {
    /// Open the store described by `config`, backed by its JSON data file
    pub fn open(config: &Config) -> QaResult<Self> {
        let kb = Self::with_storage(
            Box::new(JsonFileStorage::new(&config.data_file)),
            Arc::new(config.tokenizer()),
            config.match_config(),
            config.threshold,
        )?;
        Ok(kb)
    }

    /// Open a JSON-file backed store with default matching settings
    pub fn with_file_path<P: AsRef<Path>>(path: P) -> QaResult<Self> {
        Self::with_storage(
            Box::new(JsonFileStorage::new(path.as_ref())),
            Arc::new(Tokenizer::new()),
            MatchConfig::default(),
            DEFAULT_THRESHOLD,
        )
    }

    /// Empty store that never touches disk
    pub fn in_memory(config: MatchConfig) -> Self {
        let tokenizer = Arc::new(Tokenizer::new());
        Self::from_data(
            Box::new(MemoryStorage::new()),
            QaData::default(),
            tokenizer,
            config,
            DEFAULT_THRESHOLD,
        )
    }

    /// Load the document from `storage` and index it
    pub fn with_storage(
        storage: Box<dyn Storage>,
        tokenizer: Arc<Tokenizer>,
        config: MatchConfig,
        default_threshold: f64,
    ) -> QaResult<Self> {
        let data = storage.load()?;
        let kb = Self::from_data(storage, data, tokenizer, config, default_threshold);

        let snapshot = kb.snapshot();
        info!(
            storage = %kb.storage.describe(),
            entries = snapshot.len(),
            categories = snapshot.stats().category_count,
            policy = %kb.matcher.policy(),
            "knowledge base loaded"
        );
        Ok(kb)
    }

    fn from_data(
        storage: Box<dyn Storage>,
        mut data: QaData,
        tokenizer: Arc<Tokenizer>,
        config: MatchConfig,
        default_threshold: f64,
    ) -> Self {
        // Keywords are derived data; recompute them so the index always
        // reflects the current tokenizer and stop-word list.
        for entry in &mut data.questions {
            derive_keywords(&tokenizer, entry);
        }
        data.normalize();

        let index = SearchIndex::from_entries(&data.questions);
        let Stats {
            total_queries,
            matched_queries,
        } = data.stats;

        Self {
            storage,
            data: RwLock::new(data),
            index: RwLock::new(Arc::new(index)),
            matcher: Matcher::new(Arc::clone(&tokenizer), config),
            tokenizer,
            default_threshold,
            total_queries: AtomicU64::new(total_queries),
            matched_queries: AtomicU64::new(matched_queries),
        }
    }

    /// Current published snapshot
    pub fn snapshot(&self) -> Arc<SearchIndex> {
        Arc::clone(&self.index.read())
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn default_threshold(&self) -> f64 {
        self.default_threshold
    }

    pub fn storage_location(&self) -> String {
        self.storage.describe()
    }

    /// Apply one write.
    ///
    /// `apply` edits a copy of the document and a fork of the current
    /// snapshot and returns `None` when there is nothing to change. Otherwise
    /// the copy is persisted, and only then are the document and snapshot
    /// replaced, so a failed save leaves the store untouched.
    pub(crate) fn write<T, F>(&self, apply: F) -> QaResult<Option<T>>
    where
        F: FnOnce(&mut QaData, &mut SearchIndex) -> QaResult<Option<T>>,
    {
        let mut data = self.data.write();
        let mut next_data = data.clone();
        let mut next_index = self.snapshot().fork();

        let Some(out) = apply(&mut next_data, &mut next_index)? else {
            return Ok(None);
        };

        self.persist(&mut next_data)?;
        *data = next_data;
        self.publish(next_index);
        Ok(Some(out))
    }

    /// Apply a write that leaves the corpus alone (feedback votes). The
    /// published snapshot and its vector model are kept.
    pub(crate) fn write_data<T, F>(&self, apply: F) -> QaResult<Option<T>>
    where
        F: FnOnce(&mut QaData) -> QaResult<Option<T>>,
    {
        let mut data = self.data.write();
        let mut next_data = data.clone();

        let Some(out) = apply(&mut next_data)? else {
            return Ok(None);
        };

        self.persist(&mut next_data)?;
        *data = next_data;
        Ok(Some(out))
    }

    /// Save the document with the live query counters folded in
    pub(crate) fn persist(&self, data: &mut QaData) -> QaResult<()> {
        data.stats = self.query_stats();
        self.storage.save(data)
    }

    /// Make `index` the snapshot new queries see. Callers hold the `data`
    /// write lock so snapshots are published in write order.
    pub(crate) fn publish(&self, index: SearchIndex) {
        if self.matcher.policy().uses_vectors() {
            index.vector_model();
        }
        *self.index.write() = Arc::new(index);
    }

    pub(crate) fn query_stats(&self) -> Stats {
        Stats {
            total_queries: self.total_queries.load(Ordering::Relaxed),
            matched_queries: self.matched_queries.load(Ordering::Relaxed),
        }
    }

    /// Re-derive every entry's keywords and rebuild the snapshot from scratch
    pub fn rebuild_index(&self) -> QaResult<IndexStats> {
        let mut data = self.data.write();
        let mut next_data = data.clone();
        for entry in &mut next_data.questions {
            derive_keywords(&self.tokenizer, entry);
        }
        next_data.normalize();

        let index = SearchIndex::from_entries(&next_data.questions);
        self.persist(&mut next_data)?;
        *data = next_data;
        self.publish(index);

        let stats = self.snapshot().stats();
        info!(
            entries = stats.entry_count,
            tokens = stats.unique_tokens,
            "search index rebuilt"
        );
        Ok(stats)
    }
}

/// Recompute keywords of the primary question and every alias
pub(crate) fn derive_keywords(tokenizer: &Tokenizer, entry: &mut Entry) {
    entry.keywords = tokenizer.tokenize(&entry.question);
    for alias in &mut entry.aliases {
        alias.keywords = tokenizer.tokenize(&alias.text);
    }
}

// Public API, delegating to the submodules
impl KnowledgeBase {
    // CRUD operations (from crud.rs)
    pub fn create(&self, question: &str, answer: &str, category: Option<&str>) -> QaResult<u64> {
        crud::create(self, question, answer, category)
    }

    pub fn update(&self, id: u64, question: Option<&str>, answer: Option<&str>) -> QaResult<bool> {
        crud::update(self, id, question, answer)
    }

    pub fn set_category(&self, id: u64, category: Option<&str>) -> QaResult<bool> {
        crud::set_category(self, id, category)
    }

    pub fn add_alias(&self, id: u64, text: &str) -> QaResult<bool> {
        crud::add_alias(self, id, text)
    }

    pub fn delete(&self, id: u64) -> QaResult<bool> {
        crud::delete(self, id)
    }

    pub fn batch_add(&self, records: Vec<BatchRecord>) -> QaResult<BatchReport> {
        crud::batch_add(self, records)
    }

    pub fn batch_delete(&self, ids: &[u64]) -> QaResult<Vec<u64>> {
        crud::batch_delete(self, ids)
    }

    // Import (from import.rs)
    pub fn import_file<P: AsRef<Path>>(&self, path: P) -> QaResult<BatchReport> {
        import::import_file(self, path.as_ref())
    }

    // Reads and matching (from query.rs)
    pub fn get(&self, id: u64) -> Option<Entry> {
        query::get(self, id)
    }

    pub fn list_all(&self) -> Vec<Entry> {
        query::list_all(self)
    }

    pub fn list_brief(&self, category: Option<&str>) -> Vec<EntryBrief> {
        query::list_brief(self, category)
    }

    pub fn list_by_category(&self, category: &str) -> Vec<Entry> {
        query::list_by_category(self, category)
    }

    pub fn list_categories(&self) -> Vec<String> {
        query::list_categories(self)
    }

    pub fn aliases(&self, id: u64) -> Option<Vec<Alias>> {
        query::aliases(self, id)
    }

    pub fn query(
        &self,
        text: &str,
        threshold: Option<f64>,
        category: Option<&str>,
    ) -> QaResult<QueryResult> {
        query::query(self, text, threshold, category)
    }

    pub fn find_best(&self, text: &str, threshold: f64, category: Option<&str>) -> MatchOutcome {
        query::find_best(self, text, threshold, category)
    }

    // Feedback and statistics (from feedback.rs)
    pub fn record_feedback(&self, id: u64, helpful: bool) -> QaResult<bool> {
        feedback::record_feedback(self, id, helpful)
    }

    pub fn feedback(&self, id: u64) -> Option<Feedback> {
        feedback::feedback(self, id)
    }

    pub fn stats(&self) -> StatsReport {
        feedback::stats(self)
    }

    pub fn flush_stats(&self) -> QaResult<()> {
        feedback::flush_stats(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::MatchPolicy;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let kb = KnowledgeBase::with_file_path(dir.path().join("qa_data.json")).unwrap();
        assert!(kb.list_all().is_empty());
        assert!(kb.snapshot().is_empty());
    }

    #[test]
    fn test_noop_write_does_not_persist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("qa_data.json");
        let kb = KnowledgeBase::with_file_path(&path).unwrap();

        assert!(!kb.delete(42).unwrap());
        assert!(!kb.set_category(42, Some("群管理")).unwrap());
        assert!(!path.exists());
        assert_eq!(kb.storage_location(), path.display().to_string());
    }

    #[test]
    fn test_reload_rederives_keywords() {
        let mut data = QaData::new();
        let mut entry = Entry::new(
            1,
            "如何重启系统?".into(),
            "点击开始菜单，选择重启选项。".into(),
            vec!["stale".into()],
            None,
            String::new(),
        );
        entry.aliases.push(Alias::new("电脑死机了怎么重启?".into(), vec![]));
        data.questions.push(entry);

        let kb = KnowledgeBase::with_storage(
            Box::new(MemoryStorage::with_data(data)),
            Arc::new(Tokenizer::new()),
            MatchConfig::default(),
            DEFAULT_THRESHOLD,
        )
        .unwrap();

        let entry = kb.get(1).unwrap();
        assert!(!entry.keywords.contains(&"stale".to_string()));
        assert!(entry.keywords.contains(&"重启".to_string()));
        assert!(entry.aliases[0].keywords.contains(&"重启".to_string()));
        assert!(!kb.snapshot().keyword_index().contains("stale", 1));
    }

    #[test]
    fn test_advanced_policy_publishes_built_model() {
        let kb = KnowledgeBase::in_memory(MatchConfig {
            policy: MatchPolicy::Advanced,
            pruning: true,
        });
        kb.create("如何重启系统?", "点击开始菜单，选择重启选项。", None)
            .unwrap();
        assert!(kb.snapshot().has_vector_model());
    }

    #[test]
    fn test_basic_policy_never_builds_model() {
        let kb = KnowledgeBase::in_memory(MatchConfig::default());
        kb.create("如何重启系统?", "点击开始菜单，选择重启选项。", None)
            .unwrap();
        kb.query("怎么重启系统", None, None).unwrap();
        assert!(!kb.snapshot().has_vector_model());
    }

    #[test]
    fn test_rebuild_index_reports_stats() {
        let kb = KnowledgeBase::in_memory(MatchConfig::default());
        kb.create("如何重启系统?", "点击开始菜单。", Some("电脑问题"))
            .unwrap();
        kb.create("群规是什么?", "请大家互相尊重。", Some("群管理"))
            .unwrap();

        let stats = kb.rebuild_index().unwrap();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.category_count, 2);
        assert!(stats.unique_tokens >= 3);
    }

    #[test]
    fn test_snapshot_survives_later_writes() {
        let kb = KnowledgeBase::in_memory(MatchConfig::default());
        kb.create("如何重启系统?", "点击开始菜单。", None).unwrap();

        let before = kb.snapshot();
        kb.create("群规是什么?", "请大家互相尊重。", None).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(kb.snapshot().len(), 2);
    }
}
