use crate::config::SessionConfig;
use crate::session::Session;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use page_driver::{
    ConsoleMessage, PageDriver, PageEvent, PageSnapshot, ScreenshotFormat,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Shared-state mock of the automation target. Records every call it
/// receives, serves scripted events and snapshots, and can be switched
/// into a failing mode.
#[derive(Clone)]
pub struct MockPageDriver {
    calls: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Vec<PageEvent>>>,
    snapshot: Arc<Mutex<PageSnapshot>>,
    console: Arc<Mutex<Vec<ConsoleMessage>>>,
    fail_message: Arc<Mutex<Option<String>>>,
}

impl MockPageDriver {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            events: Arc::new(Mutex::new(Vec::new())),
            snapshot: Arc::new(Mutex::new(PageSnapshot {
                url: "https://example.com/".to_string(),
                title: "Example Domain".to_string(),
                content: "- h1 \"Example Domain\" (h1)".to_string(),
            })),
            console: Arc::new(Mutex::new(Vec::new())),
            fail_message: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queue_event(&self, event: PageEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn set_console(&self, messages: Vec<ConsoleMessage>) {
        *self.console.lock().unwrap() = messages;
    }

    /// Make every subsequent driver call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.fail_message.lock().unwrap() = Some(message.to_string());
    }

    fn record(&self, call: impl Into<String>) -> Result<()> {
        if let Some(message) = self.fail_message.lock().unwrap().clone() {
            return Err(anyhow!(message));
        }
        self.calls.lock().unwrap().push(call.into());
        Ok(())
    }
}

#[async_trait]
impl PageDriver for MockPageDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.record(format!("navigate {url}"))
    }

    async fn go_back(&self) -> Result<()> {
        self.record("go_back")
    }

    async fn go_forward(&self) -> Result<()> {
        self.record("go_forward")
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.record(format!("click {selector}"))
    }

    async fn hover(&self, selector: &str) -> Result<()> {
        self.record(format!("hover {selector}"))
    }

    async fn type_text(&self, selector: &str, text: &str, submit: bool) -> Result<()> {
        self.record(format!("type {selector} {text} submit={submit}"))
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        self.record(format!("press_key {key}"))
    }

    async fn select_option(&self, selector: &str, values: &[String]) -> Result<()> {
        self.record(format!("select_option {selector} {}", values.join(",")))
    }

    async fn move_mouse(&self, x: f64, y: f64) -> Result<()> {
        self.record(format!("move_mouse {x},{y}"))
    }

    async fn click_at(&self, x: f64, y: f64) -> Result<()> {
        self.record(format!("click_at {x},{y}"))
    }

    async fn drag(&self, from: (f64, f64), to: (f64, f64)) -> Result<()> {
        self.record(format!("drag {},{} -> {},{}", from.0, from.1, to.0, to.1))
    }

    async fn type_chars(&self, text: &str) -> Result<()> {
        self.record(format!("type_chars {text}"))
    }

    async fn snapshot(&self) -> Result<PageSnapshot> {
        self.record("snapshot")?;
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn screenshot(&self, format: ScreenshotFormat) -> Result<Vec<u8>> {
        self.record(format!("screenshot {:?}", format))?;
        Ok(vec![0x89, 0x50, 0x4e, 0x47])
    }

    async fn print_pdf(&self) -> Result<Vec<u8>> {
        self.record("print_pdf")?;
        Ok(b"%PDF-1.4".to_vec())
    }

    async fn console_messages(&self) -> Result<Vec<ConsoleMessage>> {
        self.record("console_messages")?;
        Ok(self.console.lock().unwrap().clone())
    }

    async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        self.record(format!("set_viewport {width}x{height}"))
    }

    async fn upload_files(&self, paths: &[PathBuf]) -> Result<()> {
        self.record(format!("upload_files {}", paths.len()))
    }

    async fn handle_dialog(&self, accept: bool, _prompt_text: Option<&str>) -> Result<()> {
        self.record(format!("handle_dialog accept={accept}"))
    }

    async fn wait_for_network_idle(&self) -> Result<()> {
        self.record("wait_for_network")
    }

    async fn wait_for_text(&self, text: &str, _timeout: Duration) -> Result<bool> {
        self.record(format!("wait_for_text {text}"))?;
        Ok(true)
    }

    async fn take_events(&self) -> Vec<PageEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    async fn close(&self) -> Result<()> {
        self.record("close")
    }
}

/// Session over a mock driver with default configuration. Returns the
/// driver alongside for scripting and call inspection.
pub fn test_session(driver: MockPageDriver) -> (Arc<Session>, MockPageDriver) {
    let session = Session::with_driver(SessionConfig::default(), Arc::new(driver.clone()));
    (session, driver)
}
