//! Protocol-level error type.
//!
//! [`McpError`] is the error surfaced to callers across a request/response
//! boundary. Codec failures convert into it so a failed encode becomes a
//! visible protocol failure rather than a silently empty payload.

use crate::codec::{DecodeError, EncodeError};
use crate::value::DynamicValue;

/// JSON-RPC style error codes used by MCP responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McpErrorCode {
    /// Invalid JSON was received (-32700).
    ParseError,
    /// The request envelope is not valid (-32600).
    InvalidRequest,
    /// The method does not exist (-32601).
    MethodNotFound,
    /// Invalid method parameters (-32602).
    InvalidParams,
    /// Internal server error (-32603).
    InternalError,
    /// No tool registered under the given name (-32001).
    ToolNotFound,
    /// No resource registered under the given URI (-32002).
    ResourceNotFound,
    /// No prompt registered under the given name (-32003).
    PromptNotFound,
}

impl From<McpErrorCode> for i32 {
    fn from(code: McpErrorCode) -> Self {
        match code {
            McpErrorCode::ParseError => -32700,
            McpErrorCode::InvalidRequest => -32600,
            McpErrorCode::MethodNotFound => -32601,
            McpErrorCode::InvalidParams => -32602,
            McpErrorCode::InternalError => -32603,
            McpErrorCode::ToolNotFound => -32001,
            McpErrorCode::ResourceNotFound => -32002,
            McpErrorCode::PromptNotFound => -32003,
        }
    }
}

/// An MCP protocol error.
#[derive(Debug, Clone, PartialEq)]
pub struct McpError {
    /// Error code.
    pub code: McpErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Optional structured detail.
    pub data: Option<DynamicValue>,
}

impl McpError {
    /// Creates an error with the given code and message.
    #[must_use]
    pub fn new(code: McpErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches structured detail to the error.
    #[must_use]
    pub fn with_data(mut self, data: DynamicValue) -> Self {
        self.data = Some(data);
        self
    }

    /// Invalid JSON on the wire.
    #[must_use]
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::new(McpErrorCode::ParseError, detail)
    }

    /// Malformed request envelope.
    #[must_use]
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(McpErrorCode::InvalidRequest, detail)
    }

    /// Unknown method.
    #[must_use]
    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            McpErrorCode::MethodNotFound,
            format!("method not found: {method}"),
        )
    }

    /// Parameters failed parsing or validation.
    #[must_use]
    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::new(McpErrorCode::InvalidParams, detail)
    }

    /// Unexpected internal failure.
    #[must_use]
    pub fn internal_error(detail: impl Into<String>) -> Self {
        Self::new(McpErrorCode::InternalError, detail)
    }

    /// Unknown tool name.
    #[must_use]
    pub fn tool_not_found(name: &str) -> Self {
        Self::new(McpErrorCode::ToolNotFound, format!("tool not found: {name}"))
    }

    /// Unknown resource URI.
    #[must_use]
    pub fn resource_not_found(uri: &str) -> Self {
        Self::new(
            McpErrorCode::ResourceNotFound,
            format!("resource not found: {uri}"),
        )
    }

    /// Unknown prompt name.
    #[must_use]
    pub fn prompt_not_found(name: &str) -> Self {
        Self::new(
            McpErrorCode::PromptNotFound,
            format!("prompt not found: {name}"),
        )
    }
}

impl std::fmt::Display for McpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, i32::from(self.code))
    }
}

impl std::error::Error for McpError {}

impl From<DecodeError> for McpError {
    fn from(err: DecodeError) -> Self {
        Self::parse_error(err.to_string())
    }
}

impl From<EncodeError> for McpError {
    fn from(err: EncodeError) -> Self {
        Self::internal_error(err.to_string())
    }
}

/// Result alias for operations that fail with an [`McpError`].
pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_jsonrpc_numbers() {
        assert_eq!(i32::from(McpErrorCode::ParseError), -32700);
        assert_eq!(i32::from(McpErrorCode::MethodNotFound), -32601);
        assert_eq!(i32::from(McpErrorCode::InvalidParams), -32602);
        assert_eq!(i32::from(McpErrorCode::ToolNotFound), -32001);
    }

    #[test]
    fn constructors_set_code_and_message() {
        let err = McpError::tool_not_found("echo");
        assert_eq!(err.code, McpErrorCode::ToolNotFound);
        assert!(err.message.contains("echo"));
        assert!(err.data.is_none());

        let err = err.with_data(DynamicValue::from("detail"));
        assert_eq!(err.data, Some(DynamicValue::from("detail")));
    }

    #[test]
    fn codec_errors_become_protocol_errors() {
        let decode_err = crate::codec::decode(b"{").unwrap_err();
        let err = McpError::from(decode_err);
        assert_eq!(err.code, McpErrorCode::ParseError);

        let encode_err = crate::codec::encode(&DynamicValue::Float(f64::NAN)).unwrap_err();
        let err = McpError::from(encode_err);
        assert_eq!(err.code, McpErrorCode::InternalError);
    }
}
