//! Add similar question tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{error_response, json_response, required_id, required_str};

/// Registers an alternative phrasing that should lead to the same answer
pub struct AddSimilarQuestionTool {
    kb: Arc<KnowledgeBase>,
}

impl AddSimilarQuestionTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for AddSimilarQuestionTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "add_similar_question",
            "Add another phrasing of an existing question. Queries close to any phrasing match the entry.",
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "question": {
                        "type": "string",
                        "description": "The alternative phrasing"
                    }
                },
                "required": ["id", "question"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let id = required_id(&params, "id")?;
        let text = required_str(&params, "question")?;

        if !self.kb.add_alias(id, text)? {
            return Ok(error_response(format!("entry {} not found", id)));
        }
        let aliases = self.kb.aliases(id).map(|a| a.len()).unwrap_or(0);
        json_response(&json!({ "id": id, "similar_questions": aliases }))
    }
}
