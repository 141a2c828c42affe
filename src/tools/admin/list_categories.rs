//! List categories tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::json_response;

pub struct ListCategoriesTool {
    kb: Arc<KnowledgeBase>,
}

impl ListCategoriesTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for ListCategoriesTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "list_categories",
            "List all category names.",
            json!({ "type": "object", "properties": {} }),
        )
    }

    fn execute(&self, _params: Value) -> QaResult<Value> {
        json_response(&json!({ "categories": self.kb.list_categories() }))
    }
}
