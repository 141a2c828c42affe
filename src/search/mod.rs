//! Question matching engine
//!
//! - Tokenizer: jieba segmentation with stop-word and length filtering
//! - Keyword index: inverted token → entry ids, used to prune candidates
//! - Vector space model: TF-IDF rows for every phrasing
//! - Scorer: keyword overlap, sequence ratio and cosine under a named policy
//! - Matcher: stable best-match selection with a threshold

mod index;
mod keywords;
mod matcher;
mod scorer;
mod sequence;
mod stopwords;
mod tokenizer;
mod vector;

pub use index::{IndexStats, SearchIndex};
pub use keywords::KeywordIndex;
pub use matcher::{MatchConfig, Matcher};
pub use scorer::{keyword_overlap, MatchPolicy, QueryFeatures, SimilarityScorer, Weights};
pub use sequence::{sequence_ratio, sequence_upper_bound, MatchBlock, SequenceMatcher};
pub use stopwords::{is_stop_word, STOP_WORDS};
pub use tokenizer::Tokenizer;
pub use vector::{cosine, SparseVector, VectorSpaceModel};
