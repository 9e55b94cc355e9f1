use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct CloseInput {}

pub struct CloseTool;

#[async_trait::async_trait]
impl Tool for CloseTool {
    type Input = CloseInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_close",
            title: "Close the browser",
            description: "Close the page and shut the browser down",
            input_schema: json!({"type": "object", "properties": {}}),
            behavior: ToolBehavior::Destructive,
        }
    }

    async fn execute(&self, context: &ToolContext, _: Self::Input) -> Result<ToolOutcome> {
        let session = context.session.clone();
        Ok(
            ToolOutcome::new(vec!["// Close the browser".to_string()]).with_action(Box::pin(
                async move {
                    session.driver().await?.close().await?;
                    Ok(vec![])
                },
            )),
        )
    }
}
