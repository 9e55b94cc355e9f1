use serde::{Deserialize, Serialize};

/// A captured representation of the page's current state, refreshed after
/// state-changing actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    /// Structural outline of the page: headings, landmarks and
    /// interactive elements with their visible names.
    pub content: String,
}

impl PageSnapshot {
    pub fn render(&self) -> String {
        format!(
            "- Page URL: {}\n- Page Title: {}\n- Page Snapshot\n{}",
            self.url, self.title, self.content
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleMessage {
    pub level: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenshotFormat {
    Png,
    Jpeg,
}

impl ScreenshotFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ScreenshotFormat::Png => "image/png",
            ScreenshotFormat::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Alert,
    Confirm,
    Prompt,
    BeforeUnload,
}

impl std::fmt::Display for DialogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DialogKind::Alert => "alert",
            DialogKind::Confirm => "confirm",
            DialogKind::Prompt => "prompt",
            DialogKind::BeforeUnload => "beforeunload",
        };
        write!(f, "{s}")
    }
}

/// Out-of-band page events surfaced to the session between invocations.
#[derive(Debug, Clone)]
pub enum PageEvent {
    DialogOpened { kind: DialogKind, message: String },
    FileChooserOpened,
}
