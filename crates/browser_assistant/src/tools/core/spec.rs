use clap::ValueEnum;

/// Selects which of the two tool catalogs a connection offers.
/// Catalogs are disjoint and never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolMode {
    /// Structural snapshot catalog: tools address elements by selector and
    /// read the page through accessibility-style outlines.
    Snapshot,
    /// Vision catalog: tools address the page through screenshots and
    /// viewport coordinates.
    Vision,
}

/// How a tool affects the automation target. Surfaced to the client as
/// safety hint annotations during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolBehavior {
    ReadOnly,
    Destructive,
    Other,
}

/// Coarse permission tag grouping tools for allow-listing. `Core` tools
/// are always offered; any other tag must appear in the configured
/// allow-list (when one is configured) for its tools to be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Capability {
    Core,
    History,
    Wait,
    Files,
    Pdf,
}

/// Specification for a tool, including metadata
#[derive(Clone)]
pub struct ToolSpec {
    /// Unique name of the tool
    pub name: &'static str,
    /// Human-readable label
    pub title: &'static str,
    /// Detailed description of what the tool does
    pub description: &'static str,
    /// JSON Schema for the tool's arguments
    pub input_schema: serde_json::Value,
    /// Safety classification surfaced as discovery annotations
    pub behavior: ToolBehavior,
}
