use crate::mcp::types::ToolResultContent;
use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct SnapshotInput {}

/// Capture a structural outline of the current page. The capture itself
/// happens in the action so the retained session snapshot stays in step
/// with what this tool reports.
pub struct SnapshotTool;

#[async_trait::async_trait]
impl Tool for SnapshotTool {
    type Input = SnapshotInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_snapshot",
            title: "Page snapshot",
            description: "Capture a structural snapshot of the current page. \
                          Better than a screenshot for reading and addressing page content.",
            input_schema: json!({"type": "object", "properties": {}}),
            behavior: ToolBehavior::ReadOnly,
        }
    }

    async fn execute(&self, context: &ToolContext, _: Self::Input) -> Result<ToolOutcome> {
        let session = context.session.clone();
        Ok(
            ToolOutcome::new(vec!["// Capture page snapshot".to_string()]).with_action(Box::pin(
                async move {
                    session.capture_snapshot().await?;
                    let snapshot = session
                        .latest_snapshot()
                        .ok_or_else(|| anyhow::anyhow!("snapshot capture produced no state"))?;
                    Ok(vec![ToolResultContent::Text {
                        text: snapshot.render(),
                    }])
                },
            )),
        )
    }
}
