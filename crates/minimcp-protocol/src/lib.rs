//! MCP protocol types, schema grammar, and parameter validation.
//!
//! This crate provides:
//! - JSON-RPC 2.0 message envelopes with dynamic payloads
//! - MCP entity metadata (tools, resources, prompts)
//! - A typed parameter schema grammar parsed once at authoring time
//! - A recursive, error-collecting parameter validator
//!
//! # Validation Model
//!
//! Schemas are authored (or parsed from their wire form) into
//! [`SchemaNode`] values up front, so validation walks a checked grammar.
//! The validator collects every finding into a [`ValidationReport`]
//! rather than stopping at the first mismatch; each finding carries a
//! dotted/indexed path such as `profile.age` or `items[1].id`.

#![forbid(unsafe_code)]

mod jsonrpc;
mod messages;
pub mod schema;
mod types;
pub mod validate;

pub use jsonrpc::{
    JSONRPC_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId,
};
pub use messages::*;
pub use schema::{PrimitiveKind, SchemaMap, SchemaNode};
pub use types::*;
pub use validate::{
    ValidationError, ValidationErrorKind, ValidationReport, validate, validate_raw,
};
