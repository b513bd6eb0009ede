//! MCP (Model Context Protocol) tool server.

mod handlers;
pub mod server;
mod tools;

pub use server::McpServer;
pub use tools::{Tool, ToolError, ToolHandler, ToolRegistry};
