use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct HoverInput {
    pub selector: String,
    pub element: Option<String>,
}

pub struct HoverTool {
    capture_snapshot: bool,
}

impl HoverTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for HoverTool {
    type Input = HoverInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_hover",
            title: "Hover mouse",
            description: "Hover the mouse over an element of the page",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "selector": {
                        "type": "string",
                        "description": "CSS selector of the element to hover over"
                    },
                    "element": {
                        "type": "string",
                        "description": "Human-readable element description"
                    }
                },
                "required": ["selector"]
            }),
            behavior: ToolBehavior::Other,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let label = input.element.unwrap_or_else(|| input.selector.clone());
        let code = vec![format!("// Hover over \"{label}\" ({})", input.selector)];
        let session = context.session.clone();
        let selector = input.selector;
        Ok(ToolOutcome::new(code)
            .capture_snapshot(self.capture_snapshot)
            .with_action(Box::pin(async move {
                session.driver().await?.hover(&selector).await?;
                Ok(vec![])
            })))
    }
}
