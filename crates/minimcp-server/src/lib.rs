//! MCP server implementation for MiniMCP.
//!
//! This crate provides the server side of the protocol:
//! - Server builder pattern
//! - Tool, resource, and prompt registration
//! - Request routing with per-tool argument validation
//!
//! The server is transport-agnostic: [`Server::handle`] maps one request
//! envelope to at most one response envelope, and [`Server::handle_bytes`]
//! does the same over raw JSON. Wiring either into stdio, a socket, or a
//! test harness is the embedder's concern.
//!
//! # Example
//!
//! ```
//! use minimcp_core::{DynamicValue, ValueMap};
//! use minimcp_protocol::{JsonRpcRequest, SchemaNode, Tool};
//! use minimcp_server::{FnTool, Server};
//!
//! let server = Server::new("demo", "1.0.0")
//!     .tool(FnTool::new(
//!         Tool::new("add")
//!             .param("a", SchemaNode::int())
//!             .param("b", SchemaNode::int()),
//!         |args: &ValueMap| {
//!             let a = args.get("a").and_then(DynamicValue::as_int).unwrap_or(0);
//!             let b = args.get("b").and_then(DynamicValue::as_int).unwrap_or(0);
//!             Ok(DynamicValue::Int(a + b))
//!         },
//!     ))
//!     .build();
//!
//! let request = JsonRpcRequest::new("tools/list", None, 1i64);
//! let response = server.handle(&request).unwrap();
//! assert!(!response.is_error());
//! ```

#![forbid(unsafe_code)]

mod builder;
mod handler;
mod registry;


pub use builder::ServerBuilder;
pub use handler::{
    BoxedPromptHandler, BoxedResourceHandler, BoxedToolHandler, FnPrompt, FnResource, FnTool,
    PromptArgs, PromptHandler, ResourceHandler, ToolHandler,
};
pub use registry::{
    LogSink, PromptRegistry, Registry, RegistryEvent, RegistrySink, ResourceRegistry,
    ToolRegistry,
};

use serde::Serialize;
use serde::de::DeserializeOwned;

use minimcp_core::logging::{debug, error, targets, trace, warn};
use minimcp_core::{DynamicValue, McpError, McpResult, ValueMap, codec, to_dynamic};
use minimcp_protocol::{
    CallToolParams, GetPromptParams, InitializeResult, JSONRPC_VERSION, JsonRpcRequest,
    JsonRpcResponse, ListPromptsResult, ListResourcesResult, ListToolsResult, PROTOCOL_VERSION,
    ReadResourceParams, ServerCapabilities, ServerInfo,
};

/// An MCP server: three entity registries behind a JSON-RPC dispatch.
pub struct Server {
    pub(crate) info: ServerInfo,
    pub(crate) capabilities: ServerCapabilities,
    pub(crate) tools: ToolRegistry,
    pub(crate) resources: ResourceRegistry,
    pub(crate) prompts: PromptRegistry,
    pub(crate) validation: bool,
}

impl Server {
    /// Starts building a server with the given name and version.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> ServerBuilder {
        ServerBuilder::new(name, version)
    }

    /// The server's name and version.
    #[must_use]
    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// The capabilities advertised during initialization.
    #[must_use]
    pub fn capabilities(&self) -> ServerCapabilities {
        self.capabilities
    }

    /// The tool registry.
    #[must_use]
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// The resource registry.
    #[must_use]
    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// The prompt registry.
    #[must_use]
    pub fn prompts(&self) -> &PromptRegistry {
        &self.prompts
    }

    /// Handles one request envelope.
    ///
    /// Returns `None` for notifications; failures during a notification
    /// are logged and dropped, since there is no envelope to carry them.
    pub fn handle(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(target: targets::SERVER, "handling request: {}", request.method);

        let result = if request.jsonrpc == JSONRPC_VERSION {
            self.dispatch(&request.method, request.params.as_ref())
        } else {
            Err(McpError::invalid_request(format!(
                "unsupported jsonrpc version: {}",
                request.jsonrpc
            )))
        };

        let Some(id) = request.id.clone() else {
            if let Err(err) = result {
                warn!(
                    target: targets::SERVER,
                    "notification {} failed: {err}", request.method
                );
            }
            return None;
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(err) => JsonRpcResponse::error(Some(id), err.into()),
        })
    }

    /// Handles one request given as raw JSON bytes, answering in kind.
    ///
    /// Undecodable input gets a `ParseError` response with a null ID; a
    /// notification gets no response at all. A response that itself fails
    /// to encode (a handler returning a non-finite float) is replaced by
    /// an `InternalError` envelope carrying the same ID, so an id-bearing
    /// request always gets an answer.
    pub fn handle_bytes(&self, bytes: &[u8]) -> Option<Vec<u8>> {
        let request: JsonRpcRequest = match serde_json::from_slice(bytes) {
            Ok(request) => request,
            Err(err) => {
                let error = McpError::parse_error(err.to_string());
                return Some(encode_response(&JsonRpcResponse::error(None, error.into())));
            }
        };
        let response = self.handle(&request)?;
        Some(encode_response(&response))
    }

    fn dispatch(&self, method: &str, params: Option<&DynamicValue>) -> McpResult<DynamicValue> {
        trace!(target: targets::DISPATCH, "dispatching {method}");

        match method {
            "initialize" => to_result(&InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_owned(),
                capabilities: self.capabilities,
                server_info: self.info.clone(),
            }),
            "ping" => Ok(DynamicValue::Object(ValueMap::new())),
            "tools/list" => to_result(&ListToolsResult {
                tools: self.tools.definitions(),
            }),
            "tools/call" => {
                let params: CallToolParams = parse_params(params)?;
                let arguments = params.arguments.unwrap_or_default();
                self.tools.execute(&params.name, &arguments, self.validation)
            }
            "resources/list" => to_result(&ListResourcesResult {
                resources: self.resources.definitions(),
            }),
            "resources/read" => {
                let params: ReadResourceParams = parse_params(params)?;
                self.resources.read(&params.uri)
            }
            "prompts/list" => to_result(&ListPromptsResult {
                prompts: self.prompts.definitions(),
            }),
            "prompts/get" => {
                let params: GetPromptParams = parse_params(params)?;
                let arguments = params.arguments.unwrap_or_default();
                self.prompts.render(&params.name, &arguments)
            }
            other => Err(McpError::method_not_found(other)),
        }
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("info", &self.info)
            .field("tools", &self.tools.len())
            .field("resources", &self.resources.len())
            .field("prompts", &self.prompts.len())
            .field("validation", &self.validation)
            .finish()
    }
}

/// Deserializes typed parameters from the dynamic `params` field.
///
/// Absent params parse as an empty object, so methods whose parameters are
/// all optional accept a bare request.
fn parse_params<T: DeserializeOwned>(params: Option<&DynamicValue>) -> McpResult<T> {
    let raw = match params {
        Some(value) => codec::to_json(value)?,
        None => serde_json::Value::Object(serde_json::Map::new()),
    };
    serde_json::from_value(raw).map_err(|err| McpError::invalid_params(err.to_string()))
}

fn to_result<T: Serialize>(value: &T) -> McpResult<DynamicValue> {
    Ok(to_dynamic(value)?)
}

/// Encodes a response, degrading to an `InternalError` envelope when the
/// payload itself refuses to serialize. The degraded envelope holds only
/// finite scalars, so the second attempt cannot fail the same way.
fn encode_response(response: &JsonRpcResponse) -> Vec<u8> {
    match serde_json::to_vec(response) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(target: targets::SERVER, "failed to encode response: {err}");
            let error = McpError::internal_error(format!("failed to encode response: {err}"));
            let fallback = JsonRpcResponse::error(response.id.clone(), error.into());
            serde_json::to_vec(&fallback).unwrap_or_else(|_| {
                br#"{"jsonrpc":"2.0","error":{"code":-32603,"message":"failed to encode response"},"id":null}"#.to_vec()
            })
        }
    }
}
