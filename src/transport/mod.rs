//! Transport runners
//!
//! Exactly one transport is active per process: MCP over stdin/stdout, or the
//! plain JSON HTTP proxy. Both are thin adapters over the shared tool
//! registry.

pub mod http;
pub mod stdio;
