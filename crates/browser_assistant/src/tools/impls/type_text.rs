use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct TypeInput {
    pub selector: String,
    pub text: String,
    /// Press Enter after typing
    #[serde(default)]
    pub submit: bool,
    pub element: Option<String>,
}

pub struct TypeTool {
    capture_snapshot: bool,
}

impl TypeTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for TypeTool {
    type Input = TypeInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_type",
            title: "Type text",
            description: "Type text into an editable element",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "selector": {
                        "type": "string",
                        "description": "CSS selector of the element to type into"
                    },
                    "text": {
                        "type": "string",
                        "description": "Text to type into the element"
                    },
                    "submit": {
                        "type": "boolean",
                        "description": "Whether to submit the entered text (press Enter after)"
                    },
                    "element": {
                        "type": "string",
                        "description": "Human-readable element description"
                    }
                },
                "required": ["selector", "text"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let label = input.element.unwrap_or_else(|| input.selector.clone());
        let mut code = vec![format!(
            "// Type \"{}\" into \"{label}\" ({})",
            input.text, input.selector
        )];
        if input.submit {
            code.push("// Submit with Enter".to_string());
        }

        let session = context.session.clone();
        let (selector, text, submit) = (input.selector, input.text, input.submit);
        Ok(ToolOutcome::new(code)
            .capture_snapshot(self.capture_snapshot)
            .wait_for_network(true)
            .with_action(Box::pin(async move {
                session
                    .driver()
                    .await?
                    .type_text(&selector, &text, submit)
                    .await?;
                Ok(vec![])
            })))
    }
}
