use crate::mcp::types::ToolResultContent;
use crate::tools::core::spec::Capability;
use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::{Context as _, Result};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct PdfSaveInput {}

pub struct PdfSaveTool;

#[async_trait::async_trait]
impl Tool for PdfSaveTool {
    type Input = PdfSaveInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_pdf_save",
            title: "Save as PDF",
            description: "Print the current page to a PDF file",
            input_schema: json!({"type": "object", "properties": {}}),
            behavior: ToolBehavior::ReadOnly,
        }
    }

    fn capability(&self) -> Capability {
        Capability::Pdf
    }

    async fn execute(&self, context: &ToolContext, _: Self::Input) -> Result<ToolOutcome> {
        let code = vec!["// Print the page to PDF".to_string()];
        let session = context.session.clone();
        Ok(ToolOutcome::new(code).with_action(Box::pin(async move {
            let bytes = session.driver().await?.print_pdf().await?;
            let file = tempfile::Builder::new()
                .prefix("page-")
                .suffix(".pdf")
                .tempfile()
                .context("could not create output file")?;
            let (mut handle, path) = file.keep().context("could not persist output file")?;
            use std::io::Write;
            handle.write_all(&bytes)?;
            Ok(vec![ToolResultContent::Text {
                text: format!("Saved page as {}", path.display()),
            }])
        })))
    }
}
