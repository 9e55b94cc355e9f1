use crate::cli::Args;
use crate::tools::core::{Capability, ToolMode};
use std::path::PathBuf;

/// Configuration a connection's session is built from. Fixed for the
/// session's lifetime.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Which tool catalog the connection offers
    pub mode: ToolMode,
    /// Capability allow-list. Empty means every tool of the selected
    /// catalog is offered.
    pub capabilities: Vec<Capability>,
    /// Leave the browser running when the connection closes
    pub keep_open: bool,
    pub headless: bool,
    /// Explicit browser binary, otherwise autodetected
    pub executable: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: ToolMode::Snapshot,
            capabilities: Vec::new(),
            keep_open: false,
            headless: true,
            executable: None,
        }
    }
}

impl From<&Args> for SessionConfig {
    fn from(args: &Args) -> Self {
        Self {
            mode: if args.vision {
                ToolMode::Vision
            } else {
                ToolMode::Snapshot
            },
            capabilities: args.caps.clone(),
            keep_open: args.keep_open,
            headless: !args.headed,
            executable: args.executable.clone(),
        }
    }
}
