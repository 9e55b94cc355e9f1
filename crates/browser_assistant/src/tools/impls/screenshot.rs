use crate::mcp::types::ToolResultContent;
use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use page_driver::ScreenshotFormat;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct ScreenshotInput {
    /// "png" (default) or "jpeg"
    pub format: Option<String>,
}

fn parse_format(format: Option<&str>) -> Result<ScreenshotFormat> {
    match format {
        None | Some("png") => Ok(ScreenshotFormat::Png),
        Some("jpeg") => Ok(ScreenshotFormat::Jpeg),
        Some(other) => Err(anyhow::anyhow!("unsupported screenshot format: {other}")),
    }
}

pub struct TakeScreenshotTool;

#[async_trait::async_trait]
impl Tool for TakeScreenshotTool {
    type Input = ScreenshotInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_take_screenshot",
            title: "Take a screenshot",
            description: "Take a screenshot of the current page viewport",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "format": {
                        "type": "string",
                        "enum": ["png", "jpeg"],
                        "description": "Image format, defaults to png"
                    }
                }
            }),
            behavior: ToolBehavior::ReadOnly,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let format = parse_format(input.format.as_deref())?;
        let code = vec!["// Take a screenshot of the page".to_string()];
        let session = context.session.clone();
        Ok(ToolOutcome::new(code).with_action(Box::pin(async move {
            let bytes = session.driver().await?.screenshot(format).await?;
            Ok(vec![ToolResultContent::Image {
                data: STANDARD.encode(bytes),
                mime_type: format.mime_type().to_string(),
            }])
        })))
    }
}
