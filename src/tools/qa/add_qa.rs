//! Add QA tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{json_response, optional_str, required_str};

/// Stores a new question/answer pair
pub struct AddQaTool {
    kb: Arc<KnowledgeBase>,
}

impl AddQaTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for AddQaTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "add_qa",
            "Add a question and its answer. Keywords are extracted automatically. Returns the new id.",
            json!({
                "type": "object",
                "properties": {
                    "question": {"type": "string"},
                    "answer": {"type": "string"},
                    "category": {
                        "type": "string",
                        "description": "Optional category, e.g. 群管理"
                    }
                },
                "required": ["question", "answer"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let question = required_str(&params, "question")?;
        let answer = required_str(&params, "answer")?;
        let category = optional_str(&params, "category")?;

        let id = self.kb.create(question, answer, category)?;
        json_response(&json!({ "id": id }))
    }
}
