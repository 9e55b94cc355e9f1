use crate::tools::core::spec::Capability;
use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

#[derive(Deserialize)]
pub struct WaitForInput {
    /// Text to wait for on the page
    pub text: Option<String>,
    /// Time to wait, in seconds
    pub time: Option<f64>,
}

pub struct WaitForTool {
    capture_snapshot: bool,
}

impl WaitForTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for WaitForTool {
    type Input = WaitForInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_wait_for",
            title: "Wait",
            description: "Wait for a fixed time or until text appears on the page",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Text to wait for on the page"
                    },
                    "time": {
                        "type": "number",
                        "description": "Time to wait, in seconds"
                    }
                }
            }),
            behavior: ToolBehavior::Other,
        }
    }

    fn capability(&self) -> Capability {
        Capability::Wait
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        if input.text.is_none() && input.time.is_none() {
            return Err(anyhow!("either text or time must be provided"));
        }

        let mut code = Vec::new();
        if let Some(time) = input.time {
            code.push(format!("// Wait for {time} seconds"));
        }
        if let Some(text) = &input.text {
            code.push(format!("// Wait for text \"{text}\""));
        }

        let session = context.session.clone();
        Ok(ToolOutcome::new(code)
            .capture_snapshot(self.capture_snapshot)
            .with_action(Box::pin(async move {
                if let Some(time) = input.time {
                    tokio::time::sleep(Duration::from_secs_f64(time)).await;
                }
                if let Some(text) = input.text {
                    let found = session
                        .driver()
                        .await?
                        .wait_for_text(&text, Duration::from_secs(10))
                        .await?;
                    if !found {
                        return Err(anyhow!("timed out waiting for text \"{text}\""));
                    }
                }
                Ok(vec![])
            })))
    }
}
