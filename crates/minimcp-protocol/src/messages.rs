//! Typed request parameters and results for the MCP methods.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use minimcp_core::ValueMap;

use crate::types::{Prompt, Resource, ServerCapabilities, ServerInfo, Tool};

/// initialize response result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    /// Protocol version accepted.
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities.
    pub capabilities: ServerCapabilities,
    /// Server info.
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

/// tools/list response result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
    /// List of available tools.
    pub tools: Vec<Tool>,
}

/// tools/call request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
    /// Tool name to call.
    pub name: String,
    /// Tool arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<ValueMap>,
}

/// resources/list response result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResourcesResult {
    /// List of available resources.
    pub resources: Vec<Resource>,
}

/// resources/read request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceParams {
    /// Resource URI.
    pub uri: String,
}

/// prompts/list response result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPromptsResult {
    /// List of available prompts.
    pub prompts: Vec<Prompt>,
}

/// prompts/get request params.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptParams {
    /// Prompt name.
    pub name: String,
    /// Prompt arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<IndexMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimcp_core::DynamicValue;

    #[test]
    fn call_params_parse_with_dynamic_arguments() {
        let params: CallToolParams = serde_json::from_str(
            r#"{"name":"add","arguments":{"a":1,"b":2.5}}"#,
        )
        .unwrap();

        assert_eq!(params.name, "add");
        let args = params.arguments.unwrap();
        assert_eq!(args.get("a"), Some(&DynamicValue::Int(1)));
        assert_eq!(args.get("b"), Some(&DynamicValue::Float(2.5)));
    }

    #[test]
    fn call_params_arguments_are_optional() {
        let params: CallToolParams = serde_json::from_str(r#"{"name":"ping"}"#).unwrap();
        assert!(params.arguments.is_none());
    }
}
