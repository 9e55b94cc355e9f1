use crate::mcp::types::{ToolCallResult, ToolResultContent};
use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct ConsoleMessagesInput {}

/// Reads collected console output. Pure inspection, so the response is a
/// fully-formed override instead of the default trace envelope.
pub struct ConsoleMessagesTool;

#[async_trait::async_trait]
impl Tool for ConsoleMessagesTool {
    type Input = ConsoleMessagesInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_console_messages",
            title: "Console messages",
            description: "Return all console messages the page has emitted",
            input_schema: json!({"type": "object", "properties": {}}),
            behavior: ToolBehavior::ReadOnly,
        }
    }

    async fn execute(&self, context: &ToolContext, _: Self::Input) -> Result<ToolOutcome> {
        let messages = context.session.driver().await?.console_messages().await?;
        let text = if messages.is_empty() {
            "No console messages".to_string()
        } else {
            messages
                .iter()
                .map(|m| format!("[{}] {}", m.level, m.text))
                .collect::<Vec<_>>()
                .join("\n")
        };

        Ok(
            ToolOutcome::new(vec!["// Read console messages".to_string()]).with_override(
                ToolCallResult {
                    content: vec![ToolResultContent::Text { text }],
                    is_error: false,
                },
            ),
        )
    }
}
