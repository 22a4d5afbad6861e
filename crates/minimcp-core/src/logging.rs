//! Structured logging for MiniMCP.
//!
//! Built on the standard [`log`] facade; the library ships no backend.
//! Applications pick one (`env_logger`, `simple_logger`, ...) and filter by
//! the hierarchical targets below, e.g.
//! `RUST_LOG=minimcp::registry=debug,minimcp::dispatch=trace`.

// Re-export log macros for ergonomic use
pub use log::{debug, error, info, trace, warn};

// Re-export log level types for programmatic use
pub use log::{Level, LevelFilter};

/// Log targets used by MiniMCP components.
pub mod targets {
    /// Root target for all MiniMCP logs.
    pub const MINIMCP: &str = "minimcp";

    /// Server facade and request handling.
    pub const SERVER: &str = "minimcp::server";

    /// Method routing and dispatch.
    pub const DISPATCH: &str = "minimcp::dispatch";

    /// Entity registration and lookup.
    pub const REGISTRY: &str = "minimcp::registry";

    /// JSON encoding/decoding.
    pub const CODEC: &str = "minimcp::codec";

    /// Parameter schema validation.
    pub const VALIDATOR: &str = "minimcp::validator";
}

/// Returns whether logging is enabled at the given level for the given
/// target, for conditionally computing expensive log data.
#[inline]
#[must_use]
pub fn is_enabled(level: Level, target: &str) -> bool {
    log::log_enabled!(target: target, level)
}
