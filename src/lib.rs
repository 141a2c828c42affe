//! QA Match Server
//!
//! Answers free-text questions by retrieving the best-matching stored
//! question and returning its answer.
//!
//! # Features
//!
//! - **Hybrid matching**: keyword overlap, character-sequence similarity and
//!   TF-IDF cosine, combined under a named match policy
//! - **Safe pruning**: an inverted keyword index narrows the candidates
//!   without ever changing the winner
//! - **Lock-free queries**: readers run against immutable index snapshots
//! - **Aliases and categories**: several phrasings per answer, scoped lookups
//! - **Two surfaces**: a JSON-RPC tool server on stdio and a REST API
//!
//! # Modules
//!
//! - `search`: tokenizer, keyword index, vector model, scorer and matcher
//! - `knowledge_base`: the entry store and its write/read operations
//! - `storage`: persistence backends for the data document
//! - `types`: entries, data document, feedback and match results
//! - `protocol`, `server`, `tools`: the stdio tool server
//! - `api`: the axum REST API
//! - `config`, `logging`, `error`, `utils`: ambient plumbing
//!
//! # Example
//!
//! ```no_run
//! use qa_match::{KnowledgeBase, MatchConfig};
//!
//! let kb = KnowledgeBase::in_memory(MatchConfig::default());
//! kb.create("如何重启系统?", "点击开始菜单，选择重启选项。", None)?;
//!
//! let result = kb.query("怎么重启系统", Some(0.3), None)?;
//! assert!(result.matched);
//! # Ok::<(), qa_match::QaError>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod knowledge_base;
pub mod logging;
pub mod protocol;
pub mod search;
pub mod server;
pub mod storage;
pub mod tools;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::Config;
pub use error::{QaError, QaResult};
pub use knowledge_base::KnowledgeBase;
pub use protocol::{ServerInfo, Tool, ToolDefinition};
pub use search::{MatchConfig, MatchPolicy, Matcher, SearchIndex, Tokenizer};
pub use server::ToolServer;
pub use types::{
    Alias, BatchRecord, BatchReport, Entry, EntryBrief, Feedback, MatchOutcome, QueryResult,
    StatsReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
