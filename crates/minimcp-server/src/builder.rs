//! Server builder for configuring MCP servers.

use std::sync::Arc;

use minimcp_protocol::{ServerCapabilities, ServerInfo};

use crate::registry::{PromptRegistry, RegistrySink, ResourceRegistry, ToolRegistry};
use crate::{PromptHandler, ResourceHandler, Server, ToolHandler};

/// Builder for configuring an MCP server.
pub struct ServerBuilder {
    info: ServerInfo,
    capabilities: ServerCapabilities,
    tools: ToolRegistry,
    resources: ResourceRegistry,
    prompts: PromptRegistry,
    validation: bool,
}

impl ServerBuilder {
    /// Creates a new server builder.
    ///
    /// Argument validation is on by default.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
            capabilities: ServerCapabilities::default(),
            tools: ToolRegistry::new(),
            resources: ResourceRegistry::new(),
            prompts: PromptRegistry::new(),
            validation: true,
        }
    }

    /// Routes registry events to the given sink.
    ///
    /// Call this before registering handlers; earlier registrations report
    /// to the default log-based sink.
    #[must_use]
    pub fn registry_sink(mut self, sink: Arc<dyn RegistrySink>) -> Self {
        self.tools.set_sink(sink.clone());
        self.resources.set_sink(sink.clone());
        self.prompts.set_sink(sink);
        self
    }

    /// Enables or disables tool argument validation.
    #[must_use]
    pub fn validation(mut self, enabled: bool) -> Self {
        self.validation = enabled;
        self
    }

    /// Registers a tool handler.
    #[must_use]
    pub fn tool<H: ToolHandler + 'static>(mut self, handler: H) -> Self {
        self.tools.add(handler);
        self.capabilities.tools = true;
        self
    }

    /// Registers a resource handler.
    #[must_use]
    pub fn resource<H: ResourceHandler + 'static>(mut self, handler: H) -> Self {
        self.resources.add(handler);
        self.capabilities.resources = true;
        self
    }

    /// Registers a prompt handler.
    #[must_use]
    pub fn prompt<H: PromptHandler + 'static>(mut self, handler: H) -> Self {
        self.prompts.add(handler);
        self.capabilities.prompts = true;
        self
    }

    /// Builds the server.
    #[must_use]
    pub fn build(self) -> Server {
        Server {
            info: self.info,
            capabilities: self.capabilities,
            tools: self.tools,
            resources: self.resources,
            prompts: self.prompts,
            validation: self.validation,
        }
    }
}
