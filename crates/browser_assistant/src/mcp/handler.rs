use super::types::*;
use crate::session::Session;
use crate::tools::core::{
    check_modal_gate, ToolBehavior, ToolContext, ToolError, ToolExecutor, ToolRegistry,
};
use anyhow::Result;
use std::sync::Arc;
use tokio::io::Stdout;
use tracing::{debug, error, trace};

use crate::utils::{MessageWriter, StdoutWriter};

pub struct MessageHandler {
    session: Arc<Session>,
    registry: ToolRegistry,
    message_writer: Box<dyn MessageWriter>,
}

impl MessageHandler {
    pub fn new(session: Arc<Session>, registry: ToolRegistry, stdout: Stdout) -> Self {
        Self {
            session,
            registry,
            message_writer: Box::new(StdoutWriter::new(stdout)),
        }
    }

    #[cfg(test)]
    pub fn with_dependencies(
        session: Arc<Session>,
        registry: ToolRegistry,
        message_writer: Box<dyn MessageWriter>,
    ) -> Self {
        Self {
            session,
            registry,
            message_writer,
        }
    }

    /// Sends a JSON-RPC response
    async fn send_response<T: serde::Serialize>(&mut self, id: RequestId, result: T) -> Result<()> {
        let response = JSONRPCResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result,
        };
        self.send_message(&serde_json::to_value(response)?).await
    }

    /// Sends a JSON-RPC error response
    async fn send_error(
        &mut self,
        id: RequestId,
        code: i32,
        message: String,
        data: Option<serde_json::Value>,
    ) -> Result<()> {
        let error = JSONRPCError {
            jsonrpc: "2.0".to_string(),
            id,
            error: ErrorObject {
                code,
                message,
                data,
            },
        };
        self.send_message(&serde_json::to_value(error)?).await
    }

    /// Helper method to send any JSON message
    async fn send_message(&mut self, message: &serde_json::Value) -> Result<()> {
        let message_str = serde_json::to_string(message)?;
        debug!("Sending message: {}", message_str);
        self.message_writer.write_message(&message_str).await
    }

    /// Handle initialize request
    async fn handle_initialize(&mut self, id: RequestId, params: InitializeParams) -> Result<()> {
        debug!("Initialize params: {:?}", params);

        // Remember who is on the other side for later diagnostics
        self.session.record_client_version(format!(
            "{}/{}",
            params.client_info.name, params.client_info.version
        ));

        self.send_response(
            id,
            InitializeResult {
                capabilities: ServerCapabilities {
                    tools: Some(ToolsCapability {
                        list_changed: Some(false),
                    }),
                    experimental: None,
                },
                protocol_version: params.protocol_version,
                server_info: Implementation {
                    name: "browser-assistant".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
                instructions: Some(
                    "Browser Assistant drives a browser session for you.".to_string(),
                ),
            },
        )
        .await
    }

    /// Handle tools/list request
    async fn handle_tools_list(&mut self, id: RequestId) -> Result<()> {
        debug!("Handling tools/list request");

        let tools_json = self
            .registry
            .tools()
            .iter()
            .map(|tool| {
                let spec = tool.spec();
                serde_json::json!({
                    "name": spec.name,
                    "description": spec.description,
                    "inputSchema": spec.input_schema,
                    "annotations": {
                        "title": spec.title,
                        "readOnlyHint": spec.behavior == ToolBehavior::ReadOnly,
                        "destructiveHint": spec.behavior == ToolBehavior::Destructive,
                        "openWorldHint": true
                    }
                })
            })
            .collect();

        self.send_response(
            id,
            ListToolsResult {
                tools: tools_json,
                next_cursor: None,
            },
        )
        .await
    }

    /// Handle tools/call request. This is the single point where every
    /// failure is normalized into an error envelope; nothing propagates
    /// past it.
    async fn handle_tool_call(&mut self, id: RequestId, params: ToolCallParams) -> Result<()> {
        debug!("Handling tool call for {}", params.name);

        let result = self.call_tool(&params).await;
        let response = match result {
            Ok(result) => result,
            Err(e) => ToolCallResult::error(e.to_string()),
        };
        self.send_response(id, response).await
    }

    async fn call_tool(&self, params: &ToolCallParams) -> Result<ToolCallResult, ToolError> {
        let tool = self
            .registry
            .get(&params.name)
            .ok_or_else(|| ToolError::NotFound(params.name.clone()))?
            .clone();

        // One execution at a time per session
        let _permit = self.session.try_begin_execution()?;

        // Modal state may have changed since the last call
        let states = self.session.modal_states().await;
        check_modal_gate(tool.as_ref(), &states)?;

        let context = ToolContext {
            session: self.session.clone(),
        };
        let arguments = params
            .arguments
            .clone()
            .unwrap_or_else(|| serde_json::json!({}));
        ToolExecutor::execute(&tool, &context, arguments).await
    }

    /// Handle ping request (protocol liveness probe)
    async fn handle_ping(&mut self, id: RequestId) -> Result<()> {
        trace!("Handling ping request");
        self.send_response(id, EmptyResult { meta: None }).await
    }

    /// Main message handling entry point
    pub async fn handle_message(&mut self, message: &str) -> Result<()> {
        // Parse the message first
        let message: JSONRPCMessage = match serde_json::from_str(message) {
            Ok(msg) => msg,
            Err(e) => {
                // A single malformed frame must never take the session down
                error!("Invalid JSON-RPC message: {}", e);
                return Ok(());
            }
        };

        match message {
            JSONRPCMessage::Request {
                method, id, params, ..
            } => {
                trace!("Processing request: method={}, id={:?}", method, id);
                match method.as_str() {
                    "initialize" => {
                        let params: InitializeParams =
                            serde_json::from_value(params.unwrap_or_default())?;
                        self.handle_initialize(id, params).await?;
                    }

                    "tools/list" => {
                        self.handle_tools_list(id).await?;
                    }

                    "tools/call" => {
                        match serde_json::from_value::<ToolCallParams>(params.unwrap_or_default()) {
                            Ok(params) => {
                                self.handle_tool_call(id, params).await?;
                            }
                            Err(e) => {
                                self.send_response(
                                    id,
                                    ToolCallResult::error(format!("Invalid tool parameters: {e}")),
                                )
                                .await?;
                            }
                        }
                    }

                    "ping" => {
                        self.handle_ping(id).await?;
                    }

                    method => {
                        self.send_error(id, -32601, format!("Method not found: {method}"), None)
                            .await?;
                    }
                }
            }

            JSONRPCMessage::Notification { method, params, .. } => match method.as_str() {
                "notifications/initialized" => {
                    if let Some(params) = params {
                        debug!("Client initialized with params: {:?}", params);
                    } else {
                        debug!("Client initialized");
                    }
                }
                _ => {
                    debug!("Unknown notification: {}", method);
                }
            },
        }

        Ok(())
    }
}
