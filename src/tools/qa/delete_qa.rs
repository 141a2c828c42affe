//! Delete QA tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{json_response, required_id};

pub struct DeleteQaTool {
    kb: Arc<KnowledgeBase>,
}

impl DeleteQaTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for DeleteQaTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "delete_qa",
            "Delete an entry with its aliases and feedback. Its id is never reused.",
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "integer"}
                },
                "required": ["id"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let id = required_id(&params, "id")?;
        let deleted = self.kb.delete(id)?;
        json_response(&json!({ "id": id, "deleted": deleted }))
    }
}
