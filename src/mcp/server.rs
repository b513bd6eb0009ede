//! MCP server implementation using pmcp.
//!
//! Serves the tool registry over stdio or streamable HTTP.

use crate::mcp::tools::{ToolError, ToolRegistry};
use crate::paper::PaperService;
use async_trait::async_trait;
use pmcp::{
    server::streamable_http_server::StreamableHttpServer, shared::Transport, Error,
    RequestHandlerExtra, Server, ServerCapabilities, StdioTransport, ToolHandler, ToolInfo,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// The MCP server for paper-forge
///
/// Exposes paper generation, citation, analysis and export tools. The
/// built [`Server`] is owned until a transport consumes it.
#[derive(Debug)]
pub struct McpServer {
    server: Server,
    tool_names: Vec<String>,
}

impl McpServer {
    /// Create a new MCP server over the given paper service
    pub fn new(papers: PaperService) -> Result<Self, pmcp::Error> {
        let tools = ToolRegistry::new(papers);
        let tool_names = tools.names().into_iter().map(String::from).collect();
        let server = Self::build_server_impl(tools)?;
        Ok(Self { server, tool_names })
    }

    /// Names of the registered tools
    pub fn tool_names(&self) -> &[String] {
        &self.tool_names
    }

    fn build_server_impl(tools: ToolRegistry) -> Result<Server, pmcp::Error> {
        let mut builder = Server::builder()
            .name("paper-forge")
            .version(env!("CARGO_PKG_VERSION"))
            .capabilities(ServerCapabilities::default());

        for tool in tools.all() {
            let tool_handler = ToolWrapper {
                name: tool.name.clone(),
                description: Some(tool.description.clone()),
                input_schema: tool.input_schema.clone(),
                handler: tool.handler.clone(),
            };
            builder = builder.tool(tool_handler.name.clone(), tool_handler);
        }

        builder.build()
    }

    /// Run the server in stdio mode
    pub async fn run(self) -> Result<(), pmcp::Error> {
        tracing::info!(tools = self.tool_names.len(), "Starting MCP server in stdio mode");
        self.run_with_transport(StdioTransport::new()).await
    }

    /// Run the server over any pmcp transport
    pub async fn run_with_transport<T: Transport + 'static>(
        self,
        transport: T,
    ) -> Result<(), pmcp::Error> {
        tracing::debug!(transport = transport.transport_type(), "Serving tools");
        self.server.run(transport).await
    }

    /// Run the server over streamable HTTP
    pub async fn run_http(self, addr: &str) -> Result<(SocketAddr, JoinHandle<()>), pmcp::Error> {
        tracing::info!("Starting MCP server in HTTP mode on {}", addr);

        let socket_addr: SocketAddr = addr
            .parse()
            .map_err(|e| Error::invalid_params(format!("Invalid address: {}", e)))?;

        let http_server = StreamableHttpServer::new(socket_addr, Arc::new(Mutex::new(self.server)));
        http_server.start().await
    }
}

/// Map handler errors onto JSON-RPC errors
fn to_rpc_error(err: ToolError) -> Error {
    match err {
        ToolError::InvalidParams(msg) | ToolError::NotFound(msg) => Error::invalid_params(msg),
        ToolError::Internal(msg) => Error::internal(&msg),
    }
}

/// Adapts a registry [`Tool`](crate::mcp::Tool) to pmcp's ToolHandler
#[derive(Clone)]
struct ToolWrapper {
    name: String,
    description: Option<String>,
    input_schema: Value,
    handler: Arc<dyn crate::mcp::tools::ToolHandler>,
}

#[async_trait]
impl ToolHandler for ToolWrapper {
    async fn handle(&self, args: Value, _extra: RequestHandlerExtra) -> Result<Value, Error> {
        tracing::debug!(tool = %self.name, "Tool call");
        self.handler.execute(args).await.map_err(|e| {
            tracing::warn!(tool = %self.name, error = %e, "Tool call failed");
            to_rpc_error(e)
        })
    }

    fn metadata(&self) -> Option<ToolInfo> {
        Some(ToolInfo::new(
            self.name.clone(),
            self.description.clone(),
            self.input_schema.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmcp::shared::TransportMessage;
    use std::time::Duration;

    /// A transport whose peer has already gone away
    #[derive(Debug)]
    struct ClosedTransport;

    #[async_trait]
    impl Transport for ClosedTransport {
        async fn send(&mut self, _message: TransportMessage) -> Result<(), Error> {
            Ok(())
        }

        async fn receive(&mut self) -> Result<TransportMessage, Error> {
            Err(Error::internal("peer closed"))
        }

        async fn close(&mut self) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn test_server_registers_all_tools() {
        let server = McpServer::new(PaperService::offline()).unwrap();
        assert_eq!(server.tool_names().len(), 21);
        assert!(server.tool_names().iter().any(|n| n == "generate_section"));
    }

    #[tokio::test]
    async fn test_transport_run_starts_serving() {
        let server = McpServer::new(PaperService::offline()).unwrap();

        // pmcp keeps serving until the process exits, so a timeout means it started
        let outcome =
            tokio::time::timeout(Duration::from_millis(300), server.run_with_transport(ClosedTransport))
                .await;
        if let Ok(Err(err)) = outcome {
            let err = err.to_string();
            assert!(!err.contains("Cannot unwrap"), "unexpected startup error: {}", err);
        }
    }

    #[tokio::test]
    async fn test_http_binds_ephemeral_port() {
        let server = McpServer::new(PaperService::offline()).unwrap();
        let (addr, handle) = server.run_http("127.0.0.1:0").await.unwrap();
        assert_ne!(addr.port(), 0);
        handle.abort();
    }

    #[tokio::test]
    async fn test_http_rejects_bad_address() {
        let server = McpServer::new(PaperService::offline()).unwrap();
        assert!(server.run_http("not-an-address").await.is_err());
    }
}
