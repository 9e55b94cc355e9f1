use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct ResizeInput {
    pub width: u32,
    pub height: u32,
}

pub struct ResizeTool {
    capture_snapshot: bool,
}

impl ResizeTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for ResizeTool {
    type Input = ResizeInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_resize",
            title: "Resize viewport",
            description: "Resize the page viewport",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "width": {"type": "integer", "description": "Viewport width in pixels"},
                    "height": {"type": "integer", "description": "Viewport height in pixels"}
                },
                "required": ["width", "height"]
            }),
            behavior: ToolBehavior::Other,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let code = vec![format!(
            "// Resize viewport to {}x{}",
            input.width, input.height
        )];
        let session = context.session.clone();
        let (width, height) = (input.width, input.height);
        Ok(ToolOutcome::new(code)
            .capture_snapshot(self.capture_snapshot)
            .with_action(Box::pin(async move {
                session.driver().await?.set_viewport(width, height).await?;
                Ok(vec![])
            })))
    }
}
