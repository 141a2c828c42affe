//! Feedback tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{error_response, json_response, required_bool, required_id};

/// Records whether an answer helped the user
pub struct RecordFeedbackTool {
    kb: Arc<KnowledgeBase>,
}

impl RecordFeedbackTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for RecordFeedbackTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "record_feedback",
            "Record whether the answer of an entry was helpful.",
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "helpful": {"type": "boolean"}
                },
                "required": ["id", "helpful"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let id = required_id(&params, "id")?;
        let helpful = required_bool(&params, "helpful")?;

        if !self.kb.record_feedback(id, helpful)? {
            return Ok(error_response(format!("entry {} not found", id)));
        }
        let feedback = self.kb.feedback(id).unwrap_or_default();
        json_response(&json!({ "id": id, "feedback": feedback }))
    }
}
