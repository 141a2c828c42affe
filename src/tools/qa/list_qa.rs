//! List QA tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{json_response, optional_str};

pub struct ListQaTool {
    kb: Arc<KnowledgeBase>,
}

impl ListQaTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for ListQaTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_qa",
            "List entries (id, question, category) in insertion order, optionally for one category.",
            json!({
                "type": "object",
                "properties": {
                    "category": {"type": "string"}
                }
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let category = optional_str(&params, "category")?;
        let entries = self.kb.list_brief(category);
        json_response(&json!({ "total": entries.len(), "entries": entries }))
    }
}
