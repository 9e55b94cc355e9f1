mod click;
mod close;
mod console_messages;
mod file_upload;
mod handle_dialog;
mod hover;
mod navigate;
mod pdf_save;
mod press_key;
mod resize;
mod screen;
mod screenshot;
mod select_option;
mod snapshot;
mod type_text;
mod wait_for;

pub use click::ClickTool;
pub use close::CloseTool;
pub use console_messages::ConsoleMessagesTool;
pub use file_upload::FileUploadTool;
pub use handle_dialog::HandleDialogTool;
pub use hover::HoverTool;
pub use navigate::{NavigateBackTool, NavigateForwardTool, NavigateTool};
pub use pdf_save::PdfSaveTool;
pub use press_key::PressKeyTool;
pub use resize::ResizeTool;
pub use screen::{
    ScreenCaptureTool, ScreenClickTool, ScreenDragTool, ScreenMoveMouseTool, ScreenTypeTool,
};
pub use screenshot::TakeScreenshotTool;
pub use select_option::SelectOptionTool;
pub use snapshot::SnapshotTool;
pub use type_text::TypeTool;
pub use wait_for::WaitForTool;

use crate::tools::core::DynTool;
use std::sync::Arc;

/// The structural snapshot catalog, in declaration order. State-changing
/// tools re-capture the page snapshot after their action.
pub fn snapshot_tools() -> Vec<Arc<dyn DynTool>> {
    vec![
        Arc::new(SnapshotTool),
        Arc::new(NavigateTool::new(true)),
        Arc::new(NavigateBackTool::new(true)),
        Arc::new(NavigateForwardTool::new(true)),
        Arc::new(ClickTool::new(true)),
        Arc::new(TypeTool::new(true)),
        Arc::new(PressKeyTool::new(true)),
        Arc::new(HoverTool::new(true)),
        Arc::new(SelectOptionTool::new(true)),
        Arc::new(HandleDialogTool),
        Arc::new(FileUploadTool::new(true)),
        Arc::new(WaitForTool::new(true)),
        Arc::new(ConsoleMessagesTool),
        Arc::new(TakeScreenshotTool),
        Arc::new(PdfSaveTool),
        Arc::new(ResizeTool::new(true)),
        Arc::new(CloseTool),
    ]
}

/// The vision catalog: screenshot/coordinate driven. Disjoint from the
/// snapshot catalog; the two are never merged.
pub fn vision_tools() -> Vec<Arc<dyn DynTool>> {
    vec![
        Arc::new(ScreenCaptureTool),
        Arc::new(ScreenMoveMouseTool),
        Arc::new(ScreenClickTool),
        Arc::new(ScreenDragTool),
        Arc::new(ScreenTypeTool),
        Arc::new(PressKeyTool::new(false)),
        Arc::new(NavigateTool::new(false)),
        Arc::new(NavigateBackTool::new(false)),
        Arc::new(NavigateForwardTool::new(false)),
        Arc::new(HandleDialogTool),
        Arc::new(FileUploadTool::new(false)),
        Arc::new(WaitForTool::new(false)),
        Arc::new(ConsoleMessagesTool),
        Arc::new(ResizeTool::new(false)),
        Arc::new(CloseTool),
    ]
}
