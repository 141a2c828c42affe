//! Categories, feedback, statistics and index maintenance

mod get_stats;
mod list_categories;
mod rebuild_index;
mod record_feedback;

pub use get_stats::GetStatsTool;
pub use list_categories::ListCategoriesTool;
pub use rebuild_index::RebuildIndexTool;
pub use record_feedback::RecordFeedbackTool;
