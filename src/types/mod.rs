//! Data types for the QA matching server
//!
//! Entries, the persisted data document, feedback counters and match results.

mod data;
mod entry;
mod feedback;
mod outcome;

pub use data::QaData;
pub use entry::{Alias, Entry, EntryBrief};
pub use feedback::{Feedback, Stats, StatsReport};
pub use outcome::{BatchRecord, BatchReport, MatchOutcome, QueryResult};
