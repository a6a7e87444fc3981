// MCP tool server: exposes get_sysinfo over stdio

use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    transport::stdio,
};
use std::sync::Arc;

use crate::aggregator::SnapshotAggregator;
use crate::version::{NAME, VERSION};

#[derive(Clone)]
pub struct SysinfoServer {
    aggregator: Arc<SnapshotAggregator>,
    tool_router: ToolRouter<SysinfoServer>,
}

#[tool_router]
impl SysinfoServer {
    pub fn new(aggregator: Arc<SnapshotAggregator>) -> Self {
        Self {
            aggregator,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Get comprehensive system information: OS identity, CPU (name, cores, frequency, usage), memory and disk usage in GB, and GPU details (memory, utilization, temperature) when available."
    )]
    pub async fn get_sysinfo(&self) -> Result<CallToolResult, McpError> {
        match self.aggregator.snapshot().await {
            Ok(snapshot) => Ok(CallToolResult::success(vec![Content::json(snapshot)?])),
            Err(e) => {
                tracing::warn!("get_sysinfo failed: {}", e);
                Err(McpError::internal_error(e.to_string(), None))
            }
        }
    }
}

#[tool_handler]
impl ServerHandler for SysinfoServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = NAME.into();
        server_info.version = VERSION.into();

        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(
                "Call get_sysinfo for a fresh snapshot of this machine's system, CPU, memory, disk and GPU state."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

/// Serve the tool over stdin/stdout until the client disconnects.
pub async fn serve_stdio(aggregator: Arc<SnapshotAggregator>) -> anyhow::Result<()> {
    let service = SysinfoServer::new(aggregator)
        .serve(stdio())
        .await
        .inspect_err(|e| tracing::error!("MCP handshake failed: {:?}", e))?;
    tracing::info!("MCP server running on stdio");
    let reason = service.waiting().await?;
    tracing::info!("MCP session ended: {:?}", reason);
    Ok(())
}
