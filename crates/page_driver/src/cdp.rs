use crate::{
    ConsoleMessage, DialogKind, PageDriver, PageEvent, PageSnapshot, ScreenshotFormat,
};
use anyhow::{anyhow, Context, Result};
use chromiumoxide::cdp::browser_protocol::dom::SetFileInputFilesParams;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, InsertTextParams, MouseButton,
};
use chromiumoxide::cdp::browser_protocol::page::{
    DialogType, EventFileChooserOpened, EventJavascriptDialogOpening,
    HandleJavaScriptDialogParams, PrintToPdfParams, SetInterceptFileChooserDialogParams,
};
use chromiumoxide::cdp::js_protocol::runtime::EventConsoleApiCalled;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Mutex as TokioMutex;
use tracing::{debug, warn};

/// Options controlling how the browser process is launched.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub headless: bool,
    pub executable: Option<PathBuf>,
}

/// Chromium-backed implementation of [`PageDriver`] over the DevTools
/// protocol. One browser process, one page, owned for the driver's
/// lifetime.
pub struct CdpDriver {
    browser: TokioMutex<Browser>,
    page: Page,
    events: Arc<Mutex<Vec<PageEvent>>>,
    console: Arc<Mutex<Vec<ConsoleMessage>>>,
    _user_data_dir: TempDir,
}

impl CdpDriver {
    pub async fn launch(options: LaunchOptions) -> Result<Self> {
        // Temporary profile so repeated runs start from a clean slate
        let user_data_dir = tempfile::tempdir()?;

        let mut config = BrowserConfig::builder().user_data_dir(user_data_dir.path());
        if !options.headless {
            config = config.with_head();
        }
        if let Some(path) = &options.executable {
            config = config.chrome_executable(path);
        }
        let (browser, mut handler) = Browser::launch(
            config.build().map_err(|e| anyhow!("{e}"))?,
        )
        .await
        .context("failed to launch browser")?;

        // Drive CDP messages in the background for the browser's lifetime
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser handler: {e}");
                }
            }
        });

        let page = browser.new_page("about:blank").await?;

        // File chooser interception has to be opted into before the first
        // file input is triggered
        if let Err(e) = page
            .execute(SetInterceptFileChooserDialogParams::new(true))
            .await
        {
            warn!("could not enable file chooser interception: {e}");
        }

        let events = Arc::new(Mutex::new(Vec::new()));
        let console = Arc::new(Mutex::new(Vec::new()));
        Self::spawn_listeners(&page, events.clone(), console.clone()).await?;

        Ok(Self {
            browser: TokioMutex::new(browser),
            page,
            events,
            console,
            _user_data_dir: user_data_dir,
        })
    }

    async fn spawn_listeners(
        page: &Page,
        events: Arc<Mutex<Vec<PageEvent>>>,
        console: Arc<Mutex<Vec<ConsoleMessage>>>,
    ) -> Result<()> {
        let mut dialogs = page.event_listener::<EventJavascriptDialogOpening>().await?;
        let dialog_events = events.clone();
        tokio::spawn(async move {
            while let Some(ev) = dialogs.next().await {
                let kind = match &ev.r#type {
                    DialogType::Alert => DialogKind::Alert,
                    DialogType::Confirm => DialogKind::Confirm,
                    DialogType::Prompt => DialogKind::Prompt,
                    DialogType::Beforeunload => DialogKind::BeforeUnload,
                };
                dialog_events.lock().unwrap().push(PageEvent::DialogOpened {
                    kind,
                    message: ev.message.clone(),
                });
            }
        });

        let mut choosers = page.event_listener::<EventFileChooserOpened>().await?;
        let chooser_events = events;
        tokio::spawn(async move {
            while choosers.next().await.is_some() {
                chooser_events
                    .lock()
                    .unwrap()
                    .push(PageEvent::FileChooserOpened);
            }
        });

        let mut console_events = page.event_listener::<EventConsoleApiCalled>().await?;
        tokio::spawn(async move {
            while let Some(ev) = console_events.next().await {
                let text = ev
                    .args
                    .iter()
                    .map(|arg| {
                        arg.value
                            .as_ref()
                            .map(|v| match v {
                                serde_json::Value::String(s) => s.clone(),
                                other => other.to_string(),
                            })
                            .or_else(|| arg.description.clone())
                            .unwrap_or_default()
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                console.lock().unwrap().push(ConsoleMessage {
                    level: format!("{:?}", ev.r#type).to_lowercase(),
                    text,
                });
            }
        });

        Ok(())
    }

    async fn dispatch_mouse(
        &self,
        event_type: DispatchMouseEventType,
        x: f64,
        y: f64,
        button: Option<MouseButton>,
    ) -> Result<()> {
        let mut params = DispatchMouseEventParams::new(event_type, x, y);
        if let Some(button) = button {
            params.button = Some(button);
            params.click_count = Some(1);
        }
        self.page.execute(params).await?;
        Ok(())
    }

    async fn dispatch_key(&self, event_type: DispatchKeyEventType, key: &str) -> Result<()> {
        let mut params = DispatchKeyEventParams::new(event_type);
        params.key = Some(key.to_string());
        // Printable single characters also carry text so inputs receive them
        if key.chars().count() == 1 {
            params.text = Some(key.to_string());
        } else if key == "Enter" {
            params.text = Some("\r".to_string());
        }
        self.page.execute(params).await?;
        Ok(())
    }
}

// Builds a readable outline of the document: headings, landmarks and
// interactive elements with their visible names.
const SNAPSHOT_JS: &str = r#"
(() => {
  const lines = [];
  const name = (el) => {
    const label = el.getAttribute('aria-label')
      || el.getAttribute('alt')
      || el.getAttribute('placeholder')
      || el.getAttribute('title');
    if (label) return label;
    const text = (el.innerText || el.value || '').trim().replace(/\s+/g, ' ');
    return text.length > 80 ? text.slice(0, 77) + '...' : text;
  };
  const selectorOf = (el) => {
    if (el.id) return '#' + el.id;
    let sel = el.tagName.toLowerCase();
    if (el.name) sel += `[name="${el.name}"]`;
    return sel;
  };
  const interesting = 'h1,h2,h3,h4,h5,h6,a[href],button,input,select,textarea,' +
    '[role=button],[role=link],[role=textbox],[role=checkbox],[role=radio],' +
    'nav,main,form,dialog,img[alt]';
  document.querySelectorAll(interesting).forEach((el) => {
    if (!(el.offsetParent !== null || el.tagName === 'DIALOG')) return;
    const tag = el.tagName.toLowerCase();
    const label = name(el);
    lines.push(`- ${tag} "${label}" (${selectorOf(el)})`);
  });
  return lines.join('\n');
})()
"#;

#[async_trait::async_trait]
impl PageDriver for CdpDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        let url = url::Url::parse(url).context("invalid URL")?;
        self.page.goto(url.as_str()).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn go_back(&self) -> Result<()> {
        self.page.evaluate("history.back()").await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn go_forward(&self) -> Result<()> {
        self.page.evaluate("history.forward()").await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .with_context(|| format!("no element matches {selector}"))?;
        element.scroll_into_view().await?;
        element.click().await?;
        Ok(())
    }

    async fn hover(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .with_context(|| format!("no element matches {selector}"))?;
        element.scroll_into_view().await?;
        let point = element.clickable_point().await?;
        self.dispatch_mouse(DispatchMouseEventType::MouseMoved, point.x, point.y, None)
            .await
    }

    async fn type_text(&self, selector: &str, text: &str, submit: bool) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .with_context(|| format!("no element matches {selector}"))?;
        element.click().await?;
        element.type_str(text).await?;
        if submit {
            element.press_key("Enter").await?;
        }
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<()> {
        self.dispatch_key(DispatchKeyEventType::KeyDown, key).await?;
        self.dispatch_key(DispatchKeyEventType::KeyUp, key).await
    }

    async fn select_option(&self, selector: &str, values: &[String]) -> Result<()> {
        let values_json = serde_json::to_string(values)?;
        let js = format!(
            r#"(() => {{
  const select = document.querySelector({selector:?});
  if (!select) return false;
  const values = {values_json};
  for (const option of select.options) {{
    option.selected = values.includes(option.value) || values.includes(option.label);
  }}
  select.dispatchEvent(new Event('input', {{ bubbles: true }}));
  select.dispatchEvent(new Event('change', {{ bubbles: true }}));
  return true;
}})()"#
        );
        let found: bool = self.page.evaluate(js).await?.into_value()?;
        if !found {
            return Err(anyhow!("no element matches {selector}"));
        }
        Ok(())
    }

    async fn move_mouse(&self, x: f64, y: f64) -> Result<()> {
        self.dispatch_mouse(DispatchMouseEventType::MouseMoved, x, y, None)
            .await
    }

    async fn click_at(&self, x: f64, y: f64) -> Result<()> {
        self.dispatch_mouse(DispatchMouseEventType::MouseMoved, x, y, None)
            .await?;
        self.dispatch_mouse(
            DispatchMouseEventType::MousePressed,
            x,
            y,
            Some(MouseButton::Left),
        )
        .await?;
        self.dispatch_mouse(
            DispatchMouseEventType::MouseReleased,
            x,
            y,
            Some(MouseButton::Left),
        )
        .await
    }

    async fn drag(&self, from: (f64, f64), to: (f64, f64)) -> Result<()> {
        self.dispatch_mouse(
            DispatchMouseEventType::MousePressed,
            from.0,
            from.1,
            Some(MouseButton::Left),
        )
        .await?;
        self.dispatch_mouse(DispatchMouseEventType::MouseMoved, to.0, to.1, None)
            .await?;
        self.dispatch_mouse(
            DispatchMouseEventType::MouseReleased,
            to.0,
            to.1,
            Some(MouseButton::Left),
        )
        .await
    }

    async fn type_chars(&self, text: &str) -> Result<()> {
        self.page.execute(InsertTextParams::new(text)).await?;
        Ok(())
    }

    async fn snapshot(&self) -> Result<PageSnapshot> {
        let url = self.page.url().await?.unwrap_or_default();
        let title = self.page.get_title().await?.unwrap_or_default();
        let content: String = self.page.evaluate(SNAPSHOT_JS).await?.into_value()?;
        Ok(PageSnapshot {
            url,
            title,
            content,
        })
    }

    async fn screenshot(&self, format: ScreenshotFormat) -> Result<Vec<u8>> {
        use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
        let format = match format {
            ScreenshotFormat::Png => CaptureScreenshotFormat::Png,
            ScreenshotFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
        };
        let bytes = self
            .page
            .screenshot(ScreenshotParams::builder().format(format).build())
            .await?;
        Ok(bytes)
    }

    async fn print_pdf(&self) -> Result<Vec<u8>> {
        let bytes = self.page.pdf(PrintToPdfParams::default()).await?;
        Ok(bytes)
    }

    async fn console_messages(&self) -> Result<Vec<ConsoleMessage>> {
        Ok(self.console.lock().unwrap().clone())
    }

    async fn set_viewport(&self, width: u32, height: u32) -> Result<()> {
        self.page
            .execute(SetDeviceMetricsOverrideParams::new(
                width as i64,
                height as i64,
                1.0,
                false,
            ))
            .await?;
        Ok(())
    }

    async fn upload_files(&self, paths: &[PathBuf]) -> Result<()> {
        let files: Vec<String> = paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect();
        let element = self
            .page
            .find_element("input[type=file]")
            .await
            .context("no file input on the page")?;
        let mut params = SetFileInputFilesParams::new(files);
        params.backend_node_id = Some(element.backend_node_id);
        self.page.execute(params).await?;
        Ok(())
    }

    async fn handle_dialog(&self, accept: bool, prompt_text: Option<&str>) -> Result<()> {
        let mut params = HandleJavaScriptDialogParams::new(accept);
        params.prompt_text = prompt_text.map(str::to_string);
        self.page.execute(params).await?;
        Ok(())
    }

    async fn wait_for_network_idle(&self) -> Result<()> {
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn wait_for_text(&self, text: &str, timeout: Duration) -> Result<bool> {
        let needle = serde_json::to_string(text)?;
        let js = format!("document.body && document.body.innerText.includes({needle})");
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let found: bool = self
                .page
                .evaluate(js.as_str())
                .await?
                .into_value()
                .unwrap_or(false);
            if found {
                return Ok(true);
            }
            if tokio::time::Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    async fn take_events(&self) -> Vec<PageEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    async fn close(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        browser.close().await?;
        Ok(())
    }
}
