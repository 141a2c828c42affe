//! Import tool

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::QaResult;
use crate::knowledge_base::KnowledgeBase;
use crate::protocol::{Tool, ToolDefinition};
use crate::server::handlers::{json_response, required_str};

pub struct ImportQaFileTool {
    kb: Arc<KnowledgeBase>,
}

impl ImportQaFileTool {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self { kb }
    }
}

impl Tool for ImportQaFileTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "import_qa_file",
            "Import question/answer pairs from a JSON file on the server: either an array of \
             {question, answer, category} objects or a data file with a questions array.",
            json!({
                "type": "object",
                "properties": {
                    "path": {"type": "string"}
                },
                "required": ["path"]
            }),
        )
    }

    fn execute(&self, params: Value) -> QaResult<Value> {
        let path = required_str(&params, "path")?;
        let report = self.kb.import_file(path)?;
        json_response(&report)
    }
}
