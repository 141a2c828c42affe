//! Update QA tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{error_response, json_response, optional_str, required_id};

pub struct UpdateQaTool {
    kb: Arc<KnowledgeBase>,
}

impl UpdateQaTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for UpdateQaTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "update_qa",
            "Replace the question and/or answer of an entry. Aliases and category are kept.",
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "question": {"type": "string"},
                    "answer": {"type": "string"}
                },
                "required": ["id"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let id = required_id(&params, "id")?;
        let question = optional_str(&params, "question")?;
        let answer = optional_str(&params, "answer")?;

        if !self.kb.update(id, question, answer)? {
            return Ok(error_response(format!("entry {} not found", id)));
        }
        json_response(&json!({ "id": id, "updated": true }))
    }
}
