// Core tools implementation
pub mod error;
pub mod executor;
pub mod gate;
pub mod registry;
pub mod spec;
pub mod tool;

// Re-export all core components for easier imports
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use gate::check_modal_gate;
pub use registry::ToolRegistry;
pub use spec::{Capability, ToolBehavior, ToolMode, ToolSpec};
pub use tool::{DynTool, Tool, ToolContext, ToolOutcome};
