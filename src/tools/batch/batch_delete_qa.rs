//! Batch delete tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{json_response, required_value};

pub struct BatchDeleteQaTool {
    kb: Arc<KnowledgeBase>,
}

impl BatchDeleteQaTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for BatchDeleteQaTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "batch_delete_qa",
            "Delete several entries. Returns the ids that existed and were deleted.",
            json!({
                "type": "object",
                "properties": {
                    "ids": {
                        "type": "array",
                        "items": {"type": "integer"}
                    }
                },
                "required": ["ids"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let ids: Vec<u64> = required_value(&params, "ids")?;
        let deleted = self.kb.batch_delete(&ids)?;
        json_response(&json!({ "deleted": deleted }))
    }
}
