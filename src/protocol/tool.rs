//! Tool descriptors and the handshake info

use serde::Serialize;
use serde_json::Value;

use crate::error::QaResult;

/// Protocol revision announced in the `initialize` reply
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Entry of the `tools/list` reply
#[derive(Serialize, Debug, Clone)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, input_schema: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Name and version reported during the handshake
#[derive(Clone, Debug)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: crate::NAME.to_string(),
            version: crate::VERSION.to_string(),
        }
    }
}

/// A callable operation exposed through `tools/call`
pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    /// Run the tool with the `arguments` object of the call
    fn execute(&self, params: Value) -> QaResult<Value>;

    fn name(&self) -> String {
        self.definition().name
    }
}
