//! Core types for MiniMCP.
//!
//! This crate provides the fundamental building blocks:
//! - [`DynamicValue`], a closed sum type over the JSON data model
//! - [`codec`], the strict encode/decode contract to and from JSON bytes
//! - [`diagnostics`], the shared path-qualified error convention
//! - [`McpError`], the protocol-level error type
//!
//! # Design Principles
//!
//! - The codec and validator layers are pure, synchronous functions over
//!   immutable inputs: no shared state, no I/O, safe to call from any
//!   thread without locking.
//! - Dynamic data is a tagged enum, never a downcast: every consumption
//!   site matches exhaustively, so no unhandled runtime type slips through.

#![forbid(unsafe_code)]

pub mod codec;
pub mod diagnostics;
mod error;
pub mod logging;
mod value;

pub use codec::{DecodeError, EncodeError, decode, encode, encode_value, to_dynamic};
pub use diagnostics::Diagnostic;
pub use error::{McpError, McpErrorCode, McpResult};
pub use value::{DynamicValue, ValueMap};
