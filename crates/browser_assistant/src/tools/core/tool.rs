use super::error::ToolError;
use super::spec::{Capability, ToolSpec};
use crate::mcp::types::{ToolCallResult, ToolResultContent};
use crate::session::{ModalStateKind, Session};
use anyhow::Result;
use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Context provided to tools during execution
pub struct ToolContext {
    /// The session owning the automation target and its modal state
    pub session: Arc<Session>,
}

/// The two-phase result of a tool handler.
///
/// Building a `ToolOutcome` performs no side effect: `code` is the
/// replayable trace of what the tool is about to do, and `action` is the
/// deferred side effect, inert until the executor awaits it. The trace is
/// therefore available even when the action later fails.
pub struct ToolOutcome {
    /// Ordered trace lines describing the action taken
    pub code: Vec<String>,
    /// Deferred side effect. Resolves to extra content appended to the
    /// default success envelope.
    pub action: Option<BoxFuture<'static, Result<Vec<ToolResultContent>>>>,
    /// Re-capture the page snapshot after the action completes
    pub capture_snapshot: bool,
    /// Await network quiescence after the action completes
    pub wait_for_network: bool,
    /// Fully-formed response bypassing default formatting
    pub result_override: Option<ToolCallResult>,
}

impl ToolOutcome {
    pub fn new(code: Vec<String>) -> Self {
        Self {
            code,
            action: None,
            capture_snapshot: false,
            wait_for_network: false,
            result_override: None,
        }
    }

    pub fn with_action(
        mut self,
        action: BoxFuture<'static, Result<Vec<ToolResultContent>>>,
    ) -> Self {
        self.action = Some(action);
        self
    }

    pub fn capture_snapshot(mut self, capture: bool) -> Self {
        self.capture_snapshot = capture;
        self
    }

    pub fn wait_for_network(mut self, wait: bool) -> Self {
        self.wait_for_network = wait;
        self
    }

    pub fn with_override(mut self, result: ToolCallResult) -> Self {
        self.result_override = Some(result);
        self
    }
}

/// Core trait for tools, defining the execution interface
#[async_trait::async_trait]
pub trait Tool: Send + Sync + 'static {
    /// Input type for this tool, must be deserializable from JSON
    type Input: DeserializeOwned + Send;

    /// Get the metadata for this tool
    fn spec(&self) -> ToolSpec;

    /// Permission tag for allow-listing. Core tools are always offered.
    fn capability(&self) -> Capability {
        Capability::Core
    }

    /// The modal-state kind this tool resolves, if any. A tool that clears
    /// a modal state is the only tool allowed to run while that state is
    /// present.
    fn clears_modal_state(&self) -> Option<ModalStateKind> {
        None
    }

    /// Produce the two-phase outcome for this invocation. Read-only
    /// inspection may happen here; side effects belong in the outcome's
    /// deferred action.
    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome>;
}

/// Type-erased tool interface for storing heterogeneous tools in the
/// registry's catalogs
#[async_trait::async_trait]
pub trait DynTool: Send + Sync + 'static {
    fn spec(&self) -> ToolSpec;
    fn capability(&self) -> Capability;
    fn clears_modal_state(&self) -> Option<ModalStateKind>;

    /// Validate raw JSON arguments and run the handler.
    async fn invoke(
        &self,
        context: &ToolContext,
        arguments: serde_json::Value,
    ) -> Result<ToolOutcome, ToolError>;
}

/// Automatic implementation of DynTool for any type that implements Tool
#[async_trait::async_trait]
impl<T> DynTool for T
where
    T: Tool,
    T::Input: DeserializeOwned,
{
    fn spec(&self) -> ToolSpec {
        Tool::spec(self)
    }

    fn capability(&self) -> Capability {
        Tool::capability(self)
    }

    fn clears_modal_state(&self) -> Option<ModalStateKind> {
        Tool::clears_modal_state(self)
    }

    async fn invoke(
        &self,
        context: &ToolContext,
        arguments: serde_json::Value,
    ) -> Result<ToolOutcome, ToolError> {
        let input: T::Input =
            serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
                tool: self.spec().name.to_string(),
                message: e.to_string(),
            })?;

        self.execute(context, input).await.map_err(ToolError::Action)
    }
}
