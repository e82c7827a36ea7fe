//! MCP server module
//!
//! Exposes the ingredient engine as MCP tools over stdio.

pub mod server;

pub use server::SousService;
