use crate::session::ModalStateKind;
use crate::tools::core::spec::Capability;
use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;

#[derive(Deserialize)]
pub struct FileUploadInput {
    pub paths: Vec<String>,
}

/// Serves a pending file chooser; only runnable while one is open.
pub struct FileUploadTool {
    capture_snapshot: bool,
}

impl FileUploadTool {
    pub fn new(capture_snapshot: bool) -> Self {
        Self { capture_snapshot }
    }
}

#[async_trait::async_trait]
impl Tool for FileUploadTool {
    type Input = FileUploadInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_file_upload",
            title: "Upload files",
            description: "Provide absolute file paths to the open file chooser",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "paths": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Absolute paths of the files to upload"
                    }
                },
                "required": ["paths"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    fn capability(&self) -> Capability {
        Capability::Files
    }

    fn clears_modal_state(&self) -> Option<ModalStateKind> {
        Some(ModalStateKind::FileChooser)
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let code = vec![format!("// Upload {} file(s)", input.paths.len())];
        let paths: Vec<PathBuf> = input.paths.iter().map(PathBuf::from).collect();
        let session = context.session.clone();
        Ok(ToolOutcome::new(code)
            .capture_snapshot(self.capture_snapshot)
            .with_action(Box::pin(async move {
                session.upload_files(&paths).await?;
                Ok(vec![])
            })))
    }
}
