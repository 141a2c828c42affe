//! Wire types for the stdio tool server
//!
//! JSON-RPC 2.0 envelopes plus the tool descriptor and [`Tool`] trait used by
//! `tools/list` and `tools/call`.

mod jsonrpc;
mod tool;

pub use jsonrpc::{error_codes, ErrorObject, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use tool::{ServerInfo, Tool, ToolDefinition, PROTOCOL_VERSION};
