use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct ClickInput {
    pub selector: String,
    /// Human-readable description of the element, used in the trace
    pub element: Option<String>,
}

pub struct ClickTool {
    capture_snapshot: bool,
}

impl ClickTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for ClickTool {
    type Input = ClickInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_click",
            title: "Click",
            description: "Perform a click on an element of the page",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "selector": {
                        "type": "string",
                        "description": "CSS selector of the element to click"
                    },
                    "element": {
                        "type": "string",
                        "description": "Human-readable element description"
                    }
                },
                "required": ["selector"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let label = input.element.unwrap_or_else(|| input.selector.clone());
        let code = vec![format!("// Click \"{label}\" ({})", input.selector)];

        let session = context.session.clone();
        let selector = input.selector;
        Ok(ToolOutcome::new(code)
            .capture_snapshot(self.capture_snapshot)
            .wait_for_network(true)
            .with_action(Box::pin(async move {
                session.driver().await?.click(&selector).await?;
                Ok(vec![])
            })))
    }
}
