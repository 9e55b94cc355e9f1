use super::error::ToolError;
use super::tool::{DynTool, ToolContext};
use crate::mcp::types::{ToolCallResult, ToolResultContent};
use std::sync::Arc;
use tracing::debug;

/// Runs a tool through its two-phase contract: validate arguments, obtain
/// the outcome (trace + deferred action), perform the action, then apply
/// the post-action state-capture policy.
pub struct ToolExecutor;

impl ToolExecutor {
    pub async fn execute(
        tool: &Arc<dyn DynTool>,
        context: &ToolContext,
        arguments: serde_json::Value,
    ) -> Result<ToolCallResult, ToolError> {
        let name = tool.spec().name;
        debug!("Executing tool {}", name);

        // Validation and trace generation happen here; no side effect yet
        let outcome = tool.invoke(context, arguments).await?;

        if let Some(result) = outcome.result_override {
            return Ok(result);
        }

        let mut extra = Vec::new();
        if let Some(action) = outcome.action {
            extra = action.await.map_err(ToolError::Action)?;
        }

        if outcome.wait_for_network {
            context
                .session
                .wait_for_network()
                .await
                .map_err(ToolError::Action)?;
        }

        // Re-capture regardless of whether this tool consumes the snapshot,
        // so subsequent reads see the latest visible state
        if outcome.capture_snapshot {
            context
                .session
                .capture_snapshot()
                .await
                .map_err(ToolError::Action)?;
        }

        let mut content = Vec::new();
        if !outcome.code.is_empty() {
            content.push(ToolResultContent::Text {
                text: outcome.code.join("\n"),
            });
        }
        content.extend(extra);

        Ok(ToolCallResult {
            content,
            is_error: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::tests::mocks::{test_session, MockPageDriver};
    use crate::tools::core::{Tool, ToolBehavior, ToolOutcome, ToolSpec};
    use anyhow::{anyhow, Result};
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Deserialize)]
    struct EchoInput {
        message: String,
    }

    /// Test tool with configurable two-phase behavior
    struct EchoTool {
        fail_action: bool,
        capture_snapshot: bool,
        with_override: bool,
    }

    impl EchoTool {
        fn plain() -> Self {
            Self {
                fail_action: false,
                capture_snapshot: false,
                with_override: false,
            }
        }
    }

    #[async_trait::async_trait]
    impl Tool for EchoTool {
        type Input = EchoInput;

        fn spec(&self) -> ToolSpec {
            ToolSpec {
                name: "echo",
                title: "Echo",
                description: "Echoes its input",
                input_schema: json!({
                    "type": "object",
                    "properties": {"message": {"type": "string"}},
                    "required": ["message"]
                }),
                behavior: ToolBehavior::ReadOnly,
            }
        }

        async fn execute(&self, _: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
            let outcome = ToolOutcome::new(vec![format!("// echo {}", input.message)]);
            if self.with_override {
                return Ok(outcome.with_override(ToolCallResult {
                    content: vec![ToolResultContent::Text {
                        text: "override wins".to_string(),
                    }],
                    is_error: false,
                }));
            }
            let fail = self.fail_action;
            let message = input.message;
            Ok(outcome
                .capture_snapshot(self.capture_snapshot)
                .with_action(Box::pin(async move {
                    if fail {
                        return Err(anyhow!("action exploded"));
                    }
                    Ok(vec![ToolResultContent::Text {
                        text: format!("did {message}"),
                    }])
                })))
        }
    }

    fn context(session: Arc<Session>) -> ToolContext {
        ToolContext { session }
    }

    #[tokio::test]
    async fn composes_trace_and_action_content() {
        let (session, _driver) = test_session(MockPageDriver::new());
        let tool: Arc<dyn DynTool> = Arc::new(EchoTool::plain());
        let result = ToolExecutor::execute(&tool, &context(session), json!({"message": "hi"}))
            .await
            .unwrap();
        assert!(!result.is_error);
        assert_eq!(result.content.len(), 2);
        match &result.content[0] {
            ToolResultContent::Text { text } => assert_eq!(text, "// echo hi"),
            other => panic!("unexpected content: {other:?}"),
        }
        match &result.content[1] {
            ToolResultContent::Text { text } => assert_eq!(text, "did hi"),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_arguments_fail_before_any_action() {
        let (session, driver) = test_session(MockPageDriver::new());
        let tool: Arc<dyn DynTool> = Arc::new(EchoTool::plain());
        let err = ToolExecutor::execute(&tool, &context(session), json!({"wrong": 1}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
        assert!(driver.calls().is_empty());
    }

    #[tokio::test]
    async fn action_failure_surfaces_as_action_error() {
        let (session, _driver) = test_session(MockPageDriver::new());
        let tool: Arc<dyn DynTool> = Arc::new(EchoTool {
            fail_action: true,
            capture_snapshot: false,
            with_override: false,
        });
        let err = ToolExecutor::execute(&tool, &context(session), json!({"message": "x"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Action(_)));
        assert_eq!(err.to_string(), "action exploded");
    }

    #[tokio::test]
    async fn result_override_bypasses_default_formatting() {
        let (session, driver) = test_session(MockPageDriver::new());
        let tool: Arc<dyn DynTool> = Arc::new(EchoTool {
            fail_action: false,
            capture_snapshot: true,
            with_override: true,
        });
        let result = ToolExecutor::execute(&tool, &context(session), json!({"message": "x"}))
            .await
            .unwrap();
        assert_eq!(result.content.len(), 1);
        match &result.content[0] {
            ToolResultContent::Text { text } => assert_eq!(text, "override wins"),
            other => panic!("unexpected content: {other:?}"),
        }
        // Override short-circuits the post-action policy
        assert!(driver.calls().is_empty());
    }

    #[tokio::test]
    async fn snapshot_captured_once_after_action() {
        let (session, driver) = test_session(MockPageDriver::new());
        let tool: Arc<dyn DynTool> = Arc::new(EchoTool {
            fail_action: false,
            capture_snapshot: true,
            with_override: false,
        });
        ToolExecutor::execute(&tool, &context(session.clone()), json!({"message": "x"}))
            .await
            .unwrap();
        let calls = driver.calls();
        assert_eq!(
            calls.iter().filter(|c| c.as_str() == "snapshot").count(),
            1
        );
        assert!(session.latest_snapshot().is_some());
    }

    #[tokio::test]
    async fn failed_action_skips_snapshot_capture() {
        let (session, driver) = test_session(MockPageDriver::new());
        let tool: Arc<dyn DynTool> = Arc::new(EchoTool {
            fail_action: true,
            capture_snapshot: true,
            with_override: false,
        });
        let result =
            ToolExecutor::execute(&tool, &context(session), json!({"message": "x"})).await;
        assert!(result.is_err());
        assert!(driver.calls().is_empty());
    }
}
