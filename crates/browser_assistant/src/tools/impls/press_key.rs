use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct PressKeyInput {
    pub key: String,
}

pub struct PressKeyTool {
    capture_snapshot: bool,
}

impl PressKeyTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for PressKeyTool {
    type Input = PressKeyInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_press_key",
            title: "Press a key",
            description: "Press a key on the keyboard",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "key": {
                        "type": "string",
                        "description": "Name of the key to press, e.g. ArrowLeft or a"
                    }
                },
                "required": ["key"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let code = vec![format!("// Press \"{}\"", input.key)];
        let session = context.session.clone();
        let key = input.key;
        Ok(ToolOutcome::new(code)
            .capture_snapshot(self.capture_snapshot)
            .wait_for_network(true)
            .with_action(Box::pin(async move {
                session.driver().await?.press_key(&key).await?;
                Ok(vec![])
            })))
    }
}
