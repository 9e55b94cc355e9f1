use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

mod cdp;
mod types;

pub use cdp::{CdpDriver, LaunchOptions};
pub use types::{ConsoleMessage, DialogKind, PageEvent, PageSnapshot, ScreenshotFormat};

/// The execution surface of the automation target. Tool handlers reach the
/// browser exclusively through this trait; the session owns the single
/// driver instance for its lifetime.
///
/// Dialog and file-chooser openings are reported out-of-band as
/// [`PageEvent`]s collected via [`take_events`](PageDriver::take_events),
/// so the caller can track unresolved obstructions between invocations.
#[async_trait::async_trait]
pub trait PageDriver: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<()>;
    async fn go_back(&self) -> Result<()>;
    async fn go_forward(&self) -> Result<()>;

    async fn click(&self, selector: &str) -> Result<()>;
    async fn hover(&self, selector: &str) -> Result<()>;
    /// Focus the element, type `text` into it, optionally submitting with Enter.
    async fn type_text(&self, selector: &str, text: &str, submit: bool) -> Result<()>;
    /// Send a key press to the focused element (e.g. "Enter", "a").
    async fn press_key(&self, key: &str) -> Result<()>;
    async fn select_option(&self, selector: &str, values: &[String]) -> Result<()>;

    // Coordinate-based input, used by the vision tool set.
    async fn move_mouse(&self, x: f64, y: f64) -> Result<()>;
    async fn click_at(&self, x: f64, y: f64) -> Result<()>;
    async fn drag(&self, from: (f64, f64), to: (f64, f64)) -> Result<()>;
    /// Insert text at the current focus without simulating individual keys.
    async fn type_chars(&self, text: &str) -> Result<()>;

    async fn snapshot(&self) -> Result<PageSnapshot>;
    async fn screenshot(&self, format: ScreenshotFormat) -> Result<Vec<u8>>;
    async fn print_pdf(&self) -> Result<Vec<u8>>;
    async fn console_messages(&self) -> Result<Vec<ConsoleMessage>>;

    async fn set_viewport(&self, width: u32, height: u32) -> Result<()>;
    async fn upload_files(&self, paths: &[PathBuf]) -> Result<()>;
    async fn handle_dialog(&self, accept: bool, prompt_text: Option<&str>) -> Result<()>;

    async fn wait_for_network_idle(&self) -> Result<()>;
    /// Poll until `text` appears in the page body, up to `timeout`.
    /// Returns whether the text was found.
    async fn wait_for_text(&self, text: &str, timeout: Duration) -> Result<bool>;

    /// Drain pending page events (dialog openings, file chooser openings)
    /// observed since the last call.
    async fn take_events(&self) -> Vec<PageEvent>;

    async fn close(&self) -> Result<()>;
}
