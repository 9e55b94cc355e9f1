use crate::session::ModalStateKind;
use crate::tools::core::{Tool, ToolBehavior, ToolContext, ToolOutcome, ToolSpec};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct HandleDialogInput {
    pub accept: bool,
    /// Text to enter when the dialog is a prompt
    pub prompt_text: Option<String>,
}

/// The one tool allowed to run while a dialog modal state is present;
/// resolving the dialog pops that state.
pub struct HandleDialogTool;

#[async_trait::async_trait]
impl Tool for HandleDialogTool {
    type Input = HandleDialogInput;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: "browser_handle_dialog",
            title: "Handle a dialog",
            description: "Accept or dismiss the currently open dialog",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "accept": {
                        "type": "boolean",
                        "description": "Whether to accept the dialog"
                    },
                    "prompt_text": {
                        "type": "string",
                        "description": "Text to enter if the dialog is a prompt"
                    }
                },
                "required": ["accept"]
            }),
            behavior: ToolBehavior::Destructive,
        }
    }

    fn clears_modal_state(&self) -> Option<ModalStateKind> {
        Some(ModalStateKind::Dialog)
    }

    async fn execute(&self, context: &ToolContext, input: Self::Input) -> Result<ToolOutcome> {
        let code = vec![if input.accept {
            "// Accept the dialog".to_string()
        } else {
            "// Dismiss the dialog".to_string()
        }];
        let session = context.session.clone();
        let (accept, prompt_text) = (input.accept, input.prompt_text);
        Ok(ToolOutcome::new(code).with_action(Box::pin(async move {
            session.handle_dialog(accept, prompt_text.as_deref()).await?;
            Ok(vec![])
        })))
    }
}
