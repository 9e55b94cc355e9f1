use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct SelectOptionInput {
    pub selector: String,
    pub values: Vec<String>,
    pub element: Option<String>,
}

pub struct SelectOptionTool {
    capture_snapshot: bool,
}

impl SelectOptionTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for SelectOptionTool {
    type Input = SelectOptionInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_select_option",
            title: "Select option",
            description: "Select one or more options in a dropdown",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "selector": {
                        "type": "string",
                        "description": "CSS selector of the select element"
                    },
                    "values": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Values or labels of the options to select"
                    },
                    "element": {
                        "type": "string",
                        "description": "Human-readable element description"
                    }
                },
                "required": ["selector", "values"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let label = input.element.unwrap_or_else(|| input.selector.clone());
        let code = vec![format!(
            "// Select {:?} in \"{label}\" ({})",
            input.values, input.selector
        )];
        let session = context.session.clone();
        let (selector, values) = (input.selector, input.values);
        Ok(ToolOutcome::new(code)
            .capture_snapshot(self.capture_snapshot)
            .wait_for_network(true)
            .with_action(Box::pin(async move {
                session
                    .driver()
                    .await?
                    .select_option(&selector, &values)
                    .await?;
                Ok(vec![])
            })))
    }
}
