//! Name-keyed registries for tools, resources, and prompts.
//!
//! One registry per entity kind, each over an order-preserving map, so
//! listings come back in registration order. Duplicate registration
//! replaces the existing entry and reports the replacement; removing a
//! name that was never registered reports too. Reports go through an
//! injectable [`RegistrySink`] so embedders decide where they land; the
//! default sink logs through the `log` facade.

use std::sync::Arc;

use indexmap::IndexMap;

use minimcp_core::logging::{debug, targets, warn};
use minimcp_core::{DynamicValue, McpError, McpResult, ValueMap};
use minimcp_protocol::{Prompt, Resource, Tool, ValidationReport, validate};

use crate::handler::{
    BoxedPromptHandler, BoxedResourceHandler, BoxedToolHandler, PromptArgs, PromptHandler,
    ResourceHandler, ToolHandler,
};

/// A registry lifecycle event worth reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryEvent<'a> {
    /// A registration displaced an existing entry with the same name.
    Replaced {
        /// Entity kind ("tool", "resource", "prompt").
        kind: &'static str,
        /// The contested name.
        name: &'a str,
    },
    /// A removal targeted a name that was never registered.
    MissingRemoval {
        /// Entity kind ("tool", "resource", "prompt").
        kind: &'static str,
        /// The missing name.
        name: &'a str,
    },
}

/// Receives registry lifecycle events.
pub trait RegistrySink: Send + Sync {
    /// Reports one event.
    fn report(&self, event: RegistryEvent<'_>);
}

/// The default sink; logs events at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl RegistrySink for LogSink {
    fn report(&self, event: RegistryEvent<'_>) {
        match event {
            RegistryEvent::Replaced { kind, name } => {
                warn!(target: targets::REGISTRY, "replaced existing {kind}: {name}");
            }
            RegistryEvent::MissingRemoval { kind, name } => {
                warn!(target: targets::REGISTRY, "removal of unknown {kind}: {name}");
            }
        }
    }
}

/// A name-keyed registry over boxed handlers of one entity kind.
pub struct Registry<H: ?Sized> {
    kind: &'static str,
    entries: IndexMap<String, Box<H>>,
    sink: Arc<dyn RegistrySink>,
}

/// Registry of tool handlers, keyed by tool name.
pub type ToolRegistry = Registry<dyn ToolHandler>;

/// Registry of resource handlers, keyed by resource URI.
pub type ResourceRegistry = Registry<dyn ResourceHandler>;

/// Registry of prompt handlers, keyed by prompt name.
pub type PromptRegistry = Registry<dyn PromptHandler>;

impl<H: ?Sized> Registry<H> {
    fn with_kind(kind: &'static str) -> Self {
        Self {
            kind,
            entries: IndexMap::new(),
            sink: Arc::new(LogSink),
        }
    }

    /// Replaces the event sink.
    pub fn set_sink(&mut self, sink: Arc<dyn RegistrySink>) {
        self.sink = sink;
    }

    /// Registers a handler under `name`.
    ///
    /// Returns the previous handler when `name` was already registered;
    /// the replacement is reported through the sink.
    pub fn register(&mut self, name: String, handler: Box<H>) -> Option<Box<H>> {
        debug!(target: targets::REGISTRY, "registering {}: {name}", self.kind);
        let previous = self.entries.insert(name.clone(), handler);
        if previous.is_some() {
            self.sink.report(RegistryEvent::Replaced {
                kind: self.kind,
                name: &name,
            });
        }
        previous
    }

    /// Removes the handler registered under `name`, preserving the order
    /// of the remaining entries.
    ///
    /// A removal that matched nothing is reported through the sink.
    pub fn remove(&mut self, name: &str) -> Option<Box<H>> {
        let removed = self.entries.shift_remove(name);
        if removed.is_none() {
            self.sink.report(RegistryEvent::MissingRemoval {
                kind: self.kind,
                name,
            });
        }
        removed
    }

    /// Looks up the handler registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&H> {
        self.entries.get(name).map(Box::as_ref)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn handlers(&self) -> impl Iterator<Item = &H> {
        self.entries.values().map(Box::as_ref)
    }
}

impl<H: ?Sized> std::fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl ToolRegistry {
    /// Creates an empty tool registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind("tool")
    }

    /// Registers a tool handler under its declared name.
    pub fn add<T: ToolHandler + 'static>(&mut self, handler: T) -> Option<BoxedToolHandler> {
        let name = handler.definition().name;
        self.register(name, Box::new(handler))
    }

    /// All tool definitions, in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<Tool> {
        self.handlers().map(ToolHandler::definition).collect()
    }

    /// Validates `arguments` against the tool's schema, then invokes the
    /// handler.
    ///
    /// When validation fails the handler is never invoked; the returned
    /// `InvalidParams` error carries every finding, path-qualified, in
    /// its `data` field. Set `check_params` to false to skip validation.
    pub fn execute(
        &self,
        name: &str,
        arguments: &ValueMap,
        check_params: bool,
    ) -> McpResult<DynamicValue> {
        let handler = self
            .get(name)
            .ok_or_else(|| McpError::tool_not_found(name))?;

        if check_params {
            let tool = handler.definition();
            if let Some(expected) = tool.params() {
                let report = validate(arguments, expected);
                if !report.is_valid() {
                    debug!(
                        target: targets::VALIDATOR,
                        "rejecting call to {name}: {} error(s)",
                        report.errors.len()
                    );
                    return Err(invalid_arguments(name, &report));
                }
            }
        }

        handler.call(arguments)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceRegistry {
    /// Creates an empty resource registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind("resource")
    }

    /// Registers a resource handler under its declared URI.
    pub fn add<R: ResourceHandler + 'static>(
        &mut self,
        handler: R,
    ) -> Option<BoxedResourceHandler> {
        let uri = handler.definition().uri;
        self.register(uri, Box::new(handler))
    }

    /// All resource definitions, in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<Resource> {
        self.handlers().map(ResourceHandler::definition).collect()
    }

    /// Reads the resource registered under `uri`.
    pub fn read(&self, uri: &str) -> McpResult<DynamicValue> {
        self.get(uri)
            .ok_or_else(|| McpError::resource_not_found(uri))?
            .read()
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRegistry {
    /// Creates an empty prompt registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_kind("prompt")
    }

    /// Registers a prompt handler under its declared name.
    pub fn add<P: PromptHandler + 'static>(&mut self, handler: P) -> Option<BoxedPromptHandler> {
        let name = handler.definition().name;
        self.register(name, Box::new(handler))
    }

    /// All prompt definitions, in registration order.
    #[must_use]
    pub fn definitions(&self) -> Vec<Prompt> {
        self.handlers().map(PromptHandler::definition).collect()
    }

    /// Renders the prompt registered under `name`.
    pub fn render(&self, name: &str, arguments: &PromptArgs) -> McpResult<DynamicValue> {
        self.get(name)
            .ok_or_else(|| McpError::prompt_not_found(name))?
            .get(arguments)
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the `InvalidParams` error for a failed validation, with every
/// finding as a `{path, message}` object in `data`.
fn invalid_arguments(tool: &str, report: &ValidationReport) -> McpError {
    let findings: DynamicValue = report
        .errors
        .iter()
        .map(|err| {
            [
                ("path".to_owned(), DynamicValue::from(err.path.as_str())),
                ("message".to_owned(), DynamicValue::from(err.message())),
            ]
            .into_iter()
            .collect::<DynamicValue>()
        })
        .collect();

    McpError::invalid_params(format!(
        "invalid arguments for tool {tool}: {} error(s)",
        report.errors.len()
    ))
    .with_data(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use minimcp_protocol::SchemaNode;

    use crate::handler::FnTool;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<String>>,
    }

    impl RegistrySink for RecordingSink {
        fn report(&self, event: RegistryEvent<'_>) {
            let line = match event {
                RegistryEvent::Replaced { kind, name } => format!("replaced {kind} {name}"),
                RegistryEvent::MissingRemoval { kind, name } => {
                    format!("missing {kind} {name}")
                }
            };
            self.events.lock().unwrap().push(line);
        }
    }

    fn adder() -> impl ToolHandler {
        FnTool::new(
            Tool::new("add")
                .param("a", SchemaNode::int())
                .param("b", SchemaNode::int()),
            |args: &ValueMap| {
                let a = args.get("a").and_then(DynamicValue::as_int).unwrap_or(0);
                let b = args.get("b").and_then(DynamicValue::as_int).unwrap_or(0);
                Ok(DynamicValue::Int(a + b))
            },
        )
    }

    fn int_args(a: i64, b: DynamicValue) -> ValueMap {
        let mut args = ValueMap::new();
        args.insert("a".to_owned(), DynamicValue::Int(a));
        args.insert("b".to_owned(), b);
        args
    }

    #[test]
    fn execute_calls_handler_when_arguments_match() {
        let mut tools = ToolRegistry::new();
        tools.add(adder());

        let result = tools.execute("add", &int_args(2, DynamicValue::Int(3)), true);
        assert_eq!(result.unwrap(), DynamicValue::Int(5));
    }

    #[test]
    fn execute_rejects_bad_arguments_without_calling_handler() {
        let mut tools = ToolRegistry::new();
        tools.add(FnTool::new(
            Tool::new("add")
                .param("a", SchemaNode::int())
                .param("b", SchemaNode::int()),
            |_: &ValueMap| panic!("handler must not run"),
        ));

        let err = tools
            .execute("add", &int_args(2, DynamicValue::from("three")), true)
            .unwrap_err();

        assert_eq!(i32::from(err.code), -32602);
        let data = err.data.unwrap();
        let findings = data.as_array().unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].get("path"),
            Some(&DynamicValue::from("b"))
        );
    }

    #[test]
    fn execute_reports_every_finding() {
        let mut tools = ToolRegistry::new();
        tools.add(adder());

        let mut args = ValueMap::new();
        args.insert("a".to_owned(), DynamicValue::Bool(true));

        let err = tools.execute("add", &args, true).unwrap_err();
        let data = err.data.unwrap();
        assert_eq!(data.as_array().unwrap().len(), 2);
    }

    #[test]
    fn execute_skips_validation_when_disabled() {
        let mut tools = ToolRegistry::new();
        tools.add(adder());

        // "b" defaults to 0 inside the handler when the type is wrong
        let result = tools.execute("add", &int_args(2, DynamicValue::from("x")), false);
        assert_eq!(result.unwrap(), DynamicValue::Int(2));
    }

    #[test]
    fn unknown_tool_is_a_structured_error() {
        let tools = ToolRegistry::new();
        let err = tools.execute("nope", &ValueMap::new(), true).unwrap_err();
        assert_eq!(i32::from(err.code), -32001);
    }

    #[test]
    fn duplicate_registration_replaces_and_reports() {
        let sink = Arc::new(RecordingSink::default());
        let mut tools = ToolRegistry::new();
        tools.set_sink(sink.clone());

        assert!(tools.add(adder()).is_none());
        let previous = tools.add(FnTool::new(Tool::new("add"), |_: &ValueMap| {
            Ok(DynamicValue::Null)
        }));

        assert!(previous.is_some());
        assert_eq!(tools.len(), 1);
        assert_eq!(
            sink.events.lock().unwrap().as_slice(),
            ["replaced tool add"]
        );
    }

    #[test]
    fn missing_removal_reports() {
        let sink = Arc::new(RecordingSink::default());
        let mut tools = ToolRegistry::new();
        tools.set_sink(sink.clone());

        assert!(tools.remove("ghost").is_none());
        assert_eq!(
            sink.events.lock().unwrap().as_slice(),
            ["missing tool ghost"]
        );
    }

    #[test]
    fn definitions_preserve_registration_order() {
        let mut tools = ToolRegistry::new();
        tools.add(FnTool::new(Tool::new("zeta"), |_: &ValueMap| {
            Ok(DynamicValue::Null)
        }));
        tools.add(FnTool::new(Tool::new("alpha"), |_: &ValueMap| {
            Ok(DynamicValue::Null)
        }));

        let names: Vec<String> = tools.definitions().into_iter().map(|t| t.name).collect();
        assert_eq!(names, ["zeta", "alpha"]);
    }
}
