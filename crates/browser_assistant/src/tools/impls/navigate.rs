use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use crate::tools::core::spec::Capability;
use anyhow::{Context as _, Result};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct NavigateInput {
    pub url: String,
}

pub struct NavigateTool {
    capture_snapshot: bool,
}

impl NavigateTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for NavigateTool {
    type Input = NavigateInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_navigate",
            title: "Navigate to a URL",
            description: "Navigate the page to the given URL",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "The URL to navigate to"
                    }
                },
                "required": ["url"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let url = url::Url::parse(&input.url).context("invalid URL")?;
        let code = vec![format!("// Navigate to {url}")];

        let session = context.session.clone();
        let target = url.to_string();
        Ok(ToolOutcome::new(code)
            .capture_snapshot(self.capture_snapshot)
            .with_action(Box::pin(async move {
                session.driver().await?.navigate(&target).await?;
                Ok(vec![])
            })))
    }
}

#[derive(Deserialize)]
pub struct NoInput {}

pub struct NavigateBackTool {
    capture_snapshot: bool,
}

impl NavigateBackTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for NavigateBackTool {
    type Input = NoInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_navigate_back",
            title: "Go back",
            description: "Go back to the previous page in the history",
            input_schema: json!({"type": "object", "properties": {}}),
            behavior: ToolBehavior::Destructive,
        }
    }

    fn capability(&self) -> Capability {
        Capability::History
    }

    async fn execute(&self, context: &ToolContext, _: Self::Input) -> Result<ToolOutcome> {
        let session = context.session.clone();
        Ok(
            ToolOutcome::new(vec!["// Navigate back in history".to_string()])
                .capture_snapshot(self.capture_snapshot)
                .with_action(Box::pin(async move {
                    session.driver().await?.go_back().await?;
                    Ok(vec![])
                })),
        )
    }
}

pub struct NavigateForwardTool {
    capture_snapshot: bool,
}

impl NavigateForwardTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for NavigateForwardTool {
    type Input = NoInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_navigate_forward",
            title: "Go forward",
            description: "Go forward to the next page in the history",
            input_schema: json!({"type": "object", "properties": {}}),
            behavior: ToolBehavior::Destructive,
        }
    }

    fn capability(&self) -> Capability {
        Capability::History
    }

    async fn execute(&self, context: &ToolContext, _: Self::Input) -> Result<ToolOutcome> {
        let session = context.session.clone();
        Ok(
            ToolOutcome::new(vec!["// Navigate forward in history".to_string()])
                .capture_snapshot(self.capture_snapshot)
                .with_action(Box::pin(async move {
                    session.driver().await?.go_forward().await?;
                    Ok(vec![])
                })),
        )
    }
}
