//! Tools exposed by the stdio server
//!
//! - QA tools (8): query, add, update, aliases, category, delete, get, list
//! - Batch tools (3): batch add, batch delete, file import
//! - Admin tools (4): categories, feedback, statistics, index rebuild

pub mod admin;
pub mod batch;
pub mod qa;

use std::io::{BufRead, Write};
use std::sync::Arc;

use crate::knowledge_base::KnowledgeBase;
use crate::server::ToolServer;

pub use admin::{GetStatsTool, ListCategoriesTool, RebuildIndexTool, RecordFeedbackTool};
pub use batch::{BatchAddQaTool, BatchDeleteQaTool, ImportQaFileTool};
pub use qa::{
    AddQaTool, AddSimilarQuestionTool, DeleteQaTool, GetQaTool, ListQaTool, QueryAnswerTool,
    SetCategoryTool, UpdateQaTool,
};

/// Register every tool with the server
pub fn register_all_tools<R: BufRead, W: Write>(
    server: &mut ToolServer<R, W>,
    kb: Arc<KnowledgeBase>,
) {
    // QA tools (8)
    server.register_tool(Box::new(QueryAnswerTool::new(kb.clone())));
    server.register_tool(Box::new(AddQaTool::new(kb.clone())));
    server.register_tool(Box::new(UpdateQaTool::new(kb.clone())));
    server.register_tool(Box::new(AddSimilarQuestionTool::new(kb.clone())));
    server.register_tool(Box::new(SetCategoryTool::new(kb.clone())));
    server.register_tool(Box::new(DeleteQaTool::new(kb.clone())));
    server.register_tool(Box::new(GetQaTool::new(kb.clone())));
    server.register_tool(Box::new(ListQaTool::new(kb.clone())));

    // Batch tools (3)
    server.register_tool(Box::new(BatchAddQaTool::new(kb.clone())));
    server.register_tool(Box::new(BatchDeleteQaTool::new(kb.clone())));
    server.register_tool(Box::new(ImportQaFileTool::new(kb.clone())));

    // Admin tools (4)
    server.register_tool(Box::new(ListCategoriesTool::new(kb.clone())));
    server.register_tool(Box::new(RecordFeedbackTool::new(kb.clone())));
    server.register_tool(Box::new(GetStatsTool::new(kb.clone())));
    server.register_tool(Box::new(RebuildIndexTool::new(kb)));
}
