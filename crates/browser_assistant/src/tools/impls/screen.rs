use crate::mcp::types::ToolResultContent;
use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use page_driver::ScreenshotFormat;
use serde::Deserialize;
use serde_json::json;

// Vision catalog: the page is addressed through screenshots and viewport
// coordinates instead of selectors.

#[derive(Deserialize)]
pub struct ScreenCaptureInput {}

pub struct ScreenCaptureTool;

#[async_trait::async_trait]
impl Tool for ScreenCaptureTool {
    type Input = ScreenCaptureInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_screen_capture",
            title: "Screenshot",
            description: "Take a screenshot of the current page",
            input_schema: json!({"type": "object", "properties": {}}),
            behavior: ToolBehavior::ReadOnly,
        }
    }

    async fn execute(&self, context: &ToolContext, _: Self::Input) -> Result<ToolOutcome> {
        let code = vec!["// Take a screenshot of the page".to_string()];
        let session = context.session.clone();
        Ok(ToolOutcome::new(code).with_action(Box::pin(async move {
            let bytes = session
                .driver()
                .await?
                .screenshot(ScreenshotFormat::Jpeg)
                .await?;
            Ok(vec![ToolResultContent::Image {
                data: STANDARD.encode(bytes),
                mime_type: ScreenshotFormat::Jpeg.mime_type().to_string(),
            }])
        })))
    }
}

#[derive(Deserialize)]
pub struct ScreenMoveMouseInput {
    pub x: f64,
    pub y: f64,
}

pub struct ScreenMoveMouseTool;

#[async_trait::async_trait]
impl Tool for ScreenMoveMouseTool {
    type Input = ScreenMoveMouseInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_screen_move_mouse",
            title: "Move mouse",
            description: "Move the mouse to a position on the page",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "x": {"type": "number", "description": "X coordinate"},
                    "y": {"type": "number", "description": "Y coordinate"}
                },
                "required": ["x", "y"]
            }),
            behavior: ToolBehavior::Other,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let code = vec![format!("// Move mouse to ({}, {})", input.x, input.y)];
        let session = context.session.clone();
        let (x, y) = (input.x, input.y);
        Ok(ToolOutcome::new(code).with_action(Box::pin(async move {
            session.driver().await?.move_mouse(x, y).await?;
            Ok(vec![])
        })))
    }
}

#[derive(Deserialize)]
pub struct ScreenClickInput {
    pub x: f64,
    pub y: f64,
}

pub struct ScreenClickTool;

#[async_trait::async_trait]
impl Tool for ScreenClickTool {
    type Input = ScreenClickInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_screen_click",
            title: "Click",
            description: "Click the left mouse button at a position on the page",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "x": {"type": "number", "description": "X coordinate"},
                    "y": {"type": "number", "description": "Y coordinate"}
                },
                "required": ["x", "y"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let code = vec![format!("// Click at ({}, {})", input.x, input.y)];
        let session = context.session.clone();
        let (x, y) = (input.x, input.y);
        Ok(ToolOutcome::new(code)
            .wait_for_network(true)
            .with_action(Box::pin(async move {
                session.driver().await?.click_at(x, y).await?;
                Ok(vec![])
            })))
    }
}

#[derive(Deserialize)]
pub struct ScreenDragInput {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

pub struct ScreenDragTool;

#[async_trait::async_trait]
impl Tool for ScreenDragTool {
    type Input = ScreenDragInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_screen_drag",
            title: "Drag mouse",
            description: "Drag the left mouse button between two positions",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "start_x": {"type": "number", "description": "Start X coordinate"},
                    "start_y": {"type": "number", "description": "Start Y coordinate"},
                    "end_x": {"type": "number", "description": "End X coordinate"},
                    "end_y": {"type": "number", "description": "End Y coordinate"}
                },
                "required": ["start_x", "start_y", "end_x", "end_y"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let code = vec![format!(
            "// Drag from ({}, {}) to ({}, {})",
            input.start_x, input.start_y, input.end_x, input.end_y
        )];
        let session = context.session.clone();
        let (from, to) = ((input.start_x, input.start_y), (input.end_x, input.end_y));
        Ok(ToolOutcome::new(code).with_action(Box::pin(async move {
            session.driver().await?.drag(from, to).await?;
            Ok(vec![])
        })))
    }
}

#[derive(Deserialize)]
pub struct ScreenTypeInput {
    pub text: String,
    #[serde(default)]
    pub submit: bool,
}

pub struct ScreenTypeTool;

#[async_trait::async_trait]
impl Tool for ScreenTypeTool {
    type Input = ScreenTypeInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_screen_type",
            title: "Type text",
            description: "Type text at the current focus",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string", "description": "Text to type"},
                    "submit": {
                        "type": "boolean",
                        "description": "Whether to submit the entered text (press Enter after)"
                    }
                },
                "required": ["text"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let mut code = vec![format!("// Type \"{}\"", input.text)];
        if input.submit {
            code.push("// Submit with Enter".to_string());
        }
        let session = context.session.clone();
        let (text, submit) = (input.text, input.submit);
        Ok(ToolOutcome::new(code)
            .wait_for_network(true)
            .with_action(Box::pin(async move {
                let driver = session.driver().await?;
                driver.type_chars(&text).await?;
                if submit {
                    driver.press_key("Enter").await?;
                }
                Ok(vec![])
            })))
    }
}
