use crate::mcp::handler::MessageHandler;
use crate::session::Session;
use crate::tools::core::ToolRegistry;
use anyhow::Result;
use std::sync::Arc;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Newline-delimited JSON-RPC over stdio. Runs until the client closes
/// its end of the pipe.
pub struct MCPServer {
    handler: MessageHandler,
}

impl MCPServer {
    pub fn new(session: Arc<Session>, registry: ToolRegistry) -> Self {
        Self {
            handler: MessageHandler::new(session, registry, tokio::io::stdout()),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Starting MCP server using stdio transport");

        let stdin = stdin();
        let mut reader = BufReader::new(stdin);

        let mut line = String::new();
        while let Ok(n) = reader.read_line(&mut line).await {
            if n == 0 {
                break; // EOF: client closed the transport
            }

            if let Err(e) = self.handler.handle_message(&line).await {
                warn!("Error handling message: {e}");
            }

            line.clear();
        }

        info!("MCP server shutting down");
        Ok(())
    }
}
