//! Query answer tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{json_response, optional_f64, optional_str, required_str};

/// Answers a free-text question with the best-matching stored entry
pub struct QueryAnswerTool {
    kb: Arc<KnowledgeBase>,
}

impl QueryAnswerTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for QueryAnswerTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "query_answer",
            "Find the stored question that best matches the query and return its answer. \
             Returns matched=false with the best score when nothing reaches the threshold.",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The user's question"
                    },
                    "threshold": {
                        "type": "number",
                        "description": "Minimum score in [0, 1] for a match (default: server setting)"
                    },
                    "category": {
                        "type": "string",
                        "description": "Only consider entries in this category"
                    }
                },
                "required": ["query"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let query = required_str(&params, "query")?;
        let threshold = optional_f64(&params, "threshold")?;
        let category = optional_str(&params, "category")?;

        let result = self.kb.query(query, threshold, category)?;
        json_response(&result)
    }
}
