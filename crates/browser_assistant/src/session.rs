use crate::config::SessionConfig;
use crate::tools::core::ToolError;
use anyhow::Result;
use futures::future::BoxFuture;
use page_driver::{PageDriver, PageEvent, PageSnapshot};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tracing::debug;

/// The kind of an unresolved interactive obstruction on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalStateKind {
    Dialog,
    FileChooser,
}

impl std::fmt::Display for ModalStateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ModalStateKind::Dialog => "dialog",
            ModalStateKind::FileChooser => "fileChooser",
        };
        write!(f, "{s}")
    }
}

/// A stack entry representing an unresolved interactive obstruction.
/// Owned and mutated exclusively by the session; the dispatch core only
/// reads it for gating decisions.
#[derive(Debug, Clone)]
pub struct ModalState {
    pub kind: ModalStateKind,
    pub description: String,
}

/// Render a modal-state stack the way gate rejections and status output
/// present it.
pub fn format_modal_states(states: &[ModalState]) -> String {
    let mut out = String::from("### Modal state");
    if states.is_empty() {
        out.push_str("\n- There is no modal state present");
    }
    for state in states {
        out.push_str(&format!("\n- [{}] {}", state.kind, state.description));
    }
    out
}

type DriverFactory =
    Box<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn PageDriver>>> + Send + Sync>;

/// Per-connection session state: the automation target handle, the
/// modal-state stack, the latest captured snapshot and the negotiated
/// client version. The browser is launched lazily on first use.
pub struct Session {
    config: SessionConfig,
    driver: OnceCell<Arc<dyn PageDriver>>,
    driver_factory: DriverFactory,
    modal_states: Mutex<Vec<ModalState>>,
    latest_snapshot: Mutex<Option<PageSnapshot>>,
    client_version: Mutex<Option<String>>,
    execution_lock: tokio::sync::Mutex<()>,
}

impl Session {
    pub fn new(config: SessionConfig, driver_factory: DriverFactory) -> Arc<Self> {
        Arc::new(Self {
            config,
            driver: OnceCell::new(),
            driver_factory,
            modal_states: Mutex::new(Vec::new()),
            latest_snapshot: Mutex::new(None),
            client_version: Mutex::new(None),
            execution_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Build a session around an already-running driver.
    pub fn with_driver(config: SessionConfig, driver: Arc<dyn PageDriver>) -> Arc<Self> {
        Arc::new(Self {
            config,
            driver: OnceCell::new_with(Some(driver)),
            driver_factory: Box::new(|| {
                Box::pin(async { Err(anyhow::anyhow!("driver already attached")) })
            }),
            modal_states: Mutex::new(Vec::new()),
            latest_snapshot: Mutex::new(None),
            client_version: Mutex::new(None),
            execution_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// The automation target, launched on first access.
    pub async fn driver(&self) -> Result<Arc<dyn PageDriver>> {
        self.driver
            .get_or_try_init(|| (self.driver_factory)())
            .await
            .cloned()
    }

    /// Fold pending driver events into the modal-state stack.
    async fn sync_page_events(&self) {
        let Some(driver) = self.driver.get() else {
            return;
        };
        for event in driver.take_events().await {
            let state = match event {
                PageEvent::DialogOpened { kind, message } => ModalState {
                    kind: ModalStateKind::Dialog,
                    description: format!("{kind} dialog: \"{message}\""),
                },
                PageEvent::FileChooserOpened => ModalState {
                    kind: ModalStateKind::FileChooser,
                    description: "file chooser waiting for files".to_string(),
                },
            };
            debug!("modal state opened: [{}] {}", state.kind, state.description);
            self.modal_states.lock().unwrap().push(state);
        }
    }

    /// The current modal-state stack, refreshed from the driver. State may
    /// change between calls, so gating must re-read this on every
    /// invocation.
    pub async fn modal_states(&self) -> Vec<ModalState> {
        self.sync_page_events().await;
        self.modal_states.lock().unwrap().clone()
    }

    pub fn render_modal_states(&self) -> String {
        format_modal_states(&self.modal_states.lock().unwrap())
    }

    fn resolve_modal_state(&self, kind: ModalStateKind) {
        let mut states = self.modal_states.lock().unwrap();
        if let Some(pos) = states.iter().rposition(|state| state.kind == kind) {
            let state = states.remove(pos);
            debug!("modal state resolved: [{}] {}", state.kind, state.description);
        }
    }

    /// Resolve the topmost open dialog and pop it from the stack.
    pub async fn handle_dialog(&self, accept: bool, prompt_text: Option<&str>) -> Result<()> {
        self.driver().await?.handle_dialog(accept, prompt_text).await?;
        self.resolve_modal_state(ModalStateKind::Dialog);
        Ok(())
    }

    /// Serve the pending file chooser and pop it from the stack.
    pub async fn upload_files(&self, paths: &[PathBuf]) -> Result<()> {
        self.driver().await?.upload_files(paths).await?;
        self.resolve_modal_state(ModalStateKind::FileChooser);
        Ok(())
    }

    pub fn record_client_version(&self, version: String) {
        debug!("client version: {version}");
        *self.client_version.lock().unwrap() = Some(version);
    }

    pub fn client_version(&self) -> Option<String> {
        self.client_version.lock().unwrap().clone()
    }

    /// Request a fresh state snapshot from the target and retain it for
    /// subsequent read operations.
    pub async fn capture_snapshot(&self) -> Result<()> {
        let snapshot = self.driver().await?.snapshot().await?;
        *self.latest_snapshot.lock().unwrap() = Some(snapshot);
        Ok(())
    }

    pub fn latest_snapshot(&self) -> Option<PageSnapshot> {
        self.latest_snapshot.lock().unwrap().clone()
    }

    pub async fn wait_for_network(&self) -> Result<()> {
        self.driver().await?.wait_for_network_idle().await
    }

    /// Claim the session's single execution slot. Fails fast when another
    /// tool call is still in flight; pipelined calls are unsupported.
    pub fn try_begin_execution(&self) -> Result<tokio::sync::MutexGuard<'_, ()>, ToolError> {
        self.execution_lock.try_lock().map_err(|_| ToolError::Busy)
    }

    /// Tear down the automation target. A session configured keep-open
    /// leaves its target running for later connections.
    pub async fn close(&self) -> Result<()> {
        if self.config.keep_open {
            debug!("session configured keep-open, leaving target running");
            return Ok(());
        }
        if let Some(driver) = self.driver.get() {
            driver.close().await?;
        }
        Ok(())
    }
}
