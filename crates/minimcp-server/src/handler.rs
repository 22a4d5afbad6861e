//! Handler traits for tools, resources, and prompts.
//!
//! Handlers are synchronous: a call runs to completion on the caller's
//! thread and returns a [`DynamicValue`]. Implement the trait directly,
//! or wrap a closure with [`FnTool`], [`FnResource`], or [`FnPrompt`].

use indexmap::IndexMap;

use minimcp_core::{DynamicValue, McpResult, ValueMap};
use minimcp_protocol::{Prompt, Resource, Tool};

/// Prompt arguments as passed by the client, in declaration order.
pub type PromptArgs = IndexMap<String, String>;

/// Handler for a tool.
pub trait ToolHandler: Send + Sync {
    /// Returns the tool definition.
    fn definition(&self) -> Tool;

    /// Calls the tool with validated arguments.
    fn call(&self, arguments: &ValueMap) -> McpResult<DynamicValue>;
}

/// Handler for a resource.
pub trait ResourceHandler: Send + Sync {
    /// Returns the resource definition.
    fn definition(&self) -> Resource;

    /// Reads the resource content.
    fn read(&self) -> McpResult<DynamicValue>;
}

/// Handler for a prompt.
pub trait PromptHandler: Send + Sync {
    /// Returns the prompt definition.
    fn definition(&self) -> Prompt;

    /// Renders the prompt with the given arguments.
    fn get(&self, arguments: &PromptArgs) -> McpResult<DynamicValue>;
}

/// A boxed tool handler.
pub type BoxedToolHandler = Box<dyn ToolHandler>;

/// A boxed resource handler.
pub type BoxedResourceHandler = Box<dyn ResourceHandler>;

/// A boxed prompt handler.
pub type BoxedPromptHandler = Box<dyn PromptHandler>;

/// A tool handler backed by a closure.
pub struct FnTool<F> {
    definition: Tool,
    call_fn: F,
}

impl<F> FnTool<F>
where
    F: Fn(&ValueMap) -> McpResult<DynamicValue> + Send + Sync,
{
    /// Wraps a closure as a tool handler.
    pub fn new(definition: Tool, call_fn: F) -> Self {
        Self {
            definition,
            call_fn,
        }
    }
}

impl<F> ToolHandler for FnTool<F>
where
    F: Fn(&ValueMap) -> McpResult<DynamicValue> + Send + Sync,
{
    fn definition(&self) -> Tool {
        self.definition.clone()
    }

    fn call(&self, arguments: &ValueMap) -> McpResult<DynamicValue> {
        (self.call_fn)(arguments)
    }
}

impl<F> std::fmt::Debug for FnTool<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.definition.name)
            .finish_non_exhaustive()
    }
}

/// A resource handler backed by a closure.
pub struct FnResource<F> {
    definition: Resource,
    read_fn: F,
}

impl<F> FnResource<F>
where
    F: Fn() -> McpResult<DynamicValue> + Send + Sync,
{
    /// Wraps a closure as a resource handler.
    pub fn new(definition: Resource, read_fn: F) -> Self {
        Self {
            definition,
            read_fn,
        }
    }
}

impl<F> ResourceHandler for FnResource<F>
where
    F: Fn() -> McpResult<DynamicValue> + Send + Sync,
{
    fn definition(&self) -> Resource {
        self.definition.clone()
    }

    fn read(&self) -> McpResult<DynamicValue> {
        (self.read_fn)()
    }
}

impl<F> std::fmt::Debug for FnResource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnResource")
            .field("uri", &self.definition.uri)
            .finish_non_exhaustive()
    }
}

/// A prompt handler backed by a closure.
pub struct FnPrompt<F> {
    definition: Prompt,
    get_fn: F,
}

impl<F> FnPrompt<F>
where
    F: Fn(&PromptArgs) -> McpResult<DynamicValue> + Send + Sync,
{
    /// Wraps a closure as a prompt handler.
    pub fn new(definition: Prompt, get_fn: F) -> Self {
        Self { definition, get_fn }
    }
}

impl<F> PromptHandler for FnPrompt<F>
where
    F: Fn(&PromptArgs) -> McpResult<DynamicValue> + Send + Sync,
{
    fn definition(&self) -> Prompt {
        self.definition.clone()
    }

    fn get(&self, arguments: &PromptArgs) -> McpResult<DynamicValue> {
        (self.get_fn)(arguments)
    }
}

impl<F> std::fmt::Debug for FnPrompt<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnPrompt")
            .field("name", &self.definition.name)
            .finish_non_exhaustive()
    }
}
