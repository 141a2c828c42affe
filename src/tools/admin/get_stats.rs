//! Statistics tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::json_response;

pub struct GetStatsTool {
    kb: Arc<KnowledgeBase>,
}

impl GetStatsTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for GetStatsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_stats",
            "Query counters, match rate, feedback totals and index size.",
            json!({ "type": "object", "properties": {} }),
        )
    }

    fn execute(&self, _params: Value) -> QaResult<Value> {
        json_response(&json!({
            "stats": self.kb.stats(),
            "index": self.kb.snapshot().stats(),
        }))
    }
}
