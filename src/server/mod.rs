//! Stdio tool server
//!
//! Reads one JSON-RPC request per line and writes one response per line.
//! Supports `initialize`, `tools/list`, `tools/call` and `ping`.

pub mod handlers;

use std::collections::BTreeMap;
use std::io::{self, BufRead, BufReader, BufWriter, Stdin, Stdout, Write};

use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::QaResult;
use crate::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServerInfo, Tool, ToolDefinition,
    PROTOCOL_VERSION,
};

/// JSON-RPC server over a line-oriented reader/writer pair
pub struct ToolServer<R, W> {
    server_info: ServerInfo,
    tools: BTreeMap<String, Box<dyn Tool>>,
    reader: R,
    writer: W,
}

impl ToolServer<BufReader<Stdin>, BufWriter<Stdout>> {
    /// Server on the process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), BufWriter::new(io::stdout()))
    }
}

impl<R: BufRead, W: Write> ToolServer<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            server_info: ServerInfo::default(),
            tools: BTreeMap::new(),
            reader,
            writer,
        }
    }

    pub fn register_tool(&mut self, tool: Box<dyn Tool>) -> &mut Self {
        self.tools.insert(tool.name(), tool);
        self
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Serve until the reader is exhausted
    pub fn run(&mut self) -> QaResult<()> {
        let mut line = String::new();
        while self.reader.read_line(&mut line)? > 0 {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                self.handle_request(trimmed)?;
            }
            line.clear();
        }
        debug!("input closed, stopping tool server");
        Ok(())
    }

    /// Give back the writer, mainly so tests can inspect responses
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn handle_request(&mut self, request_str: &str) -> QaResult<()> {
        let request: JsonRpcRequest = match serde_json::from_str(request_str) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                return self.send(&JsonRpcError::parse_error(e.to_string()));
            }
        };

        if !request.is_valid() {
            return self.send(&JsonRpcError::invalid_request(
                request.id.unwrap_or(Value::Null),
                "jsonrpc must be '2.0'".to_string(),
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "notification");
            return Ok(());
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tool_call(id, request.params),
            "ping" => self.send(&JsonRpcResponse::new(id, json!({}))),
            method => self.send(&JsonRpcError::method_not_found(id, method)),
        }
    }

    fn handle_initialize(&mut self, id: Value) -> QaResult<()> {
        let result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.server_info.name,
                "version": self.server_info.version
            }
        });
        self.send(&JsonRpcResponse::new(id, result))
    }

    fn handle_tools_list(&mut self, id: Value) -> QaResult<()> {
        let tools: Vec<ToolDefinition> = self.tools.values().map(|t| t.definition()).collect();
        self.send(&JsonRpcResponse::new(id, json!({ "tools": tools })))
    }

    fn handle_tool_call(&mut self, id: Value, params: Option<Value>) -> QaResult<()> {
        let Some(params) = params else {
            return self.send(&JsonRpcError::invalid_params(
                id,
                "missing parameters".to_string(),
            ));
        };
        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
            return self.send(&JsonRpcError::invalid_params(
                id,
                "missing tool name".to_string(),
            ));
        };

        let Some(tool) = self.tools.get(tool_name) else {
            return self.send(&JsonRpcError::invalid_params(
                id,
                format!("unknown tool '{}'", tool_name),
            ));
        };

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
        debug!(tool = tool_name, "tool call");

        let reply = match tool.execute(arguments) {
            Ok(result) => serde_json::to_value(JsonRpcResponse::new(id, result))?,
            Err(e) => {
                warn!(tool = tool_name, error = %e, "tool failed");
                serde_json::to_value(JsonRpcError::internal_error(id, e.to_string()))?
            }
        };
        self.send(&reply)
    }

    fn send<T: Serialize>(&mut self, message: &T) -> QaResult<()> {
        let json = serde_json::to_string(message)?;
        writeln!(self.writer, "{}", json)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QaError;
    use std::io::Cursor;

    struct EchoTool;

    impl Tool for EchoTool {
        fn definition(&self) -> ToolDefinition {
            ToolDefinition::new("echo", "Echo the text argument", json!({"type": "object"}))
        }

        fn execute(&self, params: Value) -> QaResult<Value> {
            let text = handlers::required_str(&params, "text")?;
            Ok(handlers::text_response(text.to_string()))
        }
    }

    fn run(input: &str) -> Vec<Value> {
        let mut server = ToolServer::new(Cursor::new(input.to_string()), Vec::new());
        server.register_tool(Box::new(EchoTool));
        server.run().unwrap();
        String::from_utf8(server.into_writer())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_initialize_and_list() {
        let out = run(concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n"
        ));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["result"]["serverInfo"]["name"], "qa-match");
        assert_eq!(out[1]["result"]["tools"][0]["name"], "echo");
    }

    #[test]
    fn test_tool_call_success_and_failure() {
        let out = run(concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"echo","arguments":{"text":"hi"}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"echo","arguments":{}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"nope"}}"#,
            "\n"
        ));
        assert_eq!(out[0]["result"]["content"][0]["text"], "hi");
        assert_eq!(out[1]["error"]["code"], -32603);
        assert_eq!(out[2]["error"]["code"], -32602);
    }

    #[test]
    fn test_protocol_errors() {
        let out = run("not json\n{\"jsonrpc\":\"1.0\",\"id\":1,\"method\":\"ping\"}\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"bogus\"}\n");
        assert_eq!(out[0]["error"]["code"], -32700);
        assert_eq!(out[1]["error"]["code"], -32600);
        assert_eq!(out[2]["error"]["code"], -32601);
    }

    #[test]
    fn test_tool_error_is_reported_not_fatal() {
        let err = EchoTool.execute(json!({})).unwrap_err();
        assert!(matches!(err, QaError::InvalidInput(_)));
    }
}
