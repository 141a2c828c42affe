//! Batch add tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{json_response, required_value};
use crate::types::BatchRecord;

pub struct BatchAddQaTool {
    kb: Arc<KnowledgeBase>,
}

impl BatchAddQaTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for BatchAddQaTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "batch_add_qa",
            "Add many question/answer pairs at once. Records missing a question or an answer \
             are skipped and reported by position.",
            json!({
                "type": "object",
                "properties": {
                    "items": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "question": {"type": "string"},
                                "answer": {"type": "string"},
                                "category": {"type": "string"}
                            }
                        }
                    }
                },
                "required": ["items"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let items: Vec<BatchRecord> = required_value(&params, "items")?;
        let report = self.kb.batch_add(items)?;
        json_response(&report)
    }
}
