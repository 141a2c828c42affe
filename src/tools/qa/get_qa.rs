//! Get QA tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{error_response, json_response, required_id};

pub struct GetQaTool {
    kb: Arc<KnowledgeBase>,
}

impl GetQaTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for GetQaTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "get_qa",
            "Get one entry by id, including keywords, similar questions and feedback.",
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
        let Some(entry) = self.kb.get(id) else {
            return Ok(error_response(format!("entry {} not found", id)));
        };
        let feedback = self.kb.feedback(id).unwrap_or_default();
        json_response(&json!({ "entry": entry, "feedback": feedback }))
    }
}
