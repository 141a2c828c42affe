//! Set category tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{error_response, json_response, optional_str, required_id};

pub struct SetCategoryTool {
    kb: Arc<KnowledgeBase>,
}

impl SetCategoryTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for SetCategoryTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "set_category",
            "Move an entry to another category. Omit category to remove it from any category.",
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "integer"},
                    "category": {"type": "string"}
                },
                "required": ["id"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let id = required_id(&params, "id")?;
        let category = optional_str(&params, "category")?;

        if !self.kb.set_category(id, category)? {
            return Ok(error_response(format!("entry {} not found", id)));
        }
        json_response(&json!({ "id": id, "category": category }))
    }
}
