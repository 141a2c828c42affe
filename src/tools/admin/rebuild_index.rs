//! Rebuild index tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::json_response;

pub struct RebuildIndexTool {
    kb: Arc<KnowledgeBase>,
}

impl RebuildIndexTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for RebuildIndexTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "rebuild_index",
            "Re-extract keywords for every entry and rebuild the search index.",
            json!({ "type": "object", "properties": {} }),
        )
    }

    fn execute(&self, _params: Value) -> QaResult<Value> {
        let stats = self.kb.rebuild_index()?;
        json_response(&stats)
    }
}
