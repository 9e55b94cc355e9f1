use std::sync::Arc;

use super::spec::{Capability, ToolMode, ToolSpec};
use super::tool::DynTool;
use crate::tools::impls::{snapshot_tools, vision_tools};

/// The active tool set of a connection. Computed once from the selected
/// catalog and capability allow-list, immutable afterwards.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn DynTool>>,
}

impl ToolRegistry {
    /// Build the active set for `mode`, keeping a tool iff its capability
    /// is `Core` or appears in `capabilities`. An empty allow-list offers
    /// the whole catalog. Catalog declaration order is preserved.
    pub fn select(mode: ToolMode, capabilities: &[Capability]) -> Self {
        let catalog = match mode {
            ToolMode::Snapshot => snapshot_tools(),
            ToolMode::Vision => vision_tools(),
        };
        let tools = catalog
            .into_iter()
            .filter(|tool| {
                capabilities.is_empty()
                    || tool.capability() == Capability::Core
                    || capabilities.contains(&tool.capability())
            })
            .collect();
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn DynTool>> {
        self.tools.iter().find(|tool| tool.spec().name == name)
    }

    pub fn tools(&self) -> &[Arc<dyn DynTool>] {
        &self.tools
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|tool| tool.spec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(registry: &ToolRegistry) -> Vec<&'static str> {
        registry.specs().iter().map(|s| s.name).collect()
    }

    #[test]
    fn empty_allow_list_offers_whole_catalog() {
        let all = ToolRegistry::select(ToolMode::Snapshot, &[]);
        assert!(names(&all).contains(&"browser_pdf_save"));
        assert!(names(&all).contains(&"browser_navigate_back"));
        assert!(names(&all).contains(&"browser_file_upload"));
        assert!(names(&all).contains(&"browser_wait_for"));
    }

    #[test]
    fn allow_list_filters_non_core_capabilities() {
        let filtered = ToolRegistry::select(ToolMode::Snapshot, &[Capability::Pdf]);
        let names = names(&filtered);
        assert!(names.contains(&"browser_pdf_save"));
        assert!(!names.contains(&"browser_navigate_back"));
        assert!(!names.contains(&"browser_file_upload"));
        // Core tools always survive filtering
        assert!(names.contains(&"browser_navigate"));
        assert!(names.contains(&"browser_snapshot"));
    }

    #[test]
    fn catalogs_are_disjoint_per_mode() {
        let snapshot = ToolRegistry::select(ToolMode::Snapshot, &[]);
        let vision = ToolRegistry::select(ToolMode::Vision, &[]);
        assert!(names(&snapshot).contains(&"browser_snapshot"));
        assert!(!names(&snapshot).contains(&"browser_screen_capture"));
        assert!(names(&vision).contains(&"browser_screen_capture"));
        assert!(!names(&vision).contains(&"browser_snapshot"));
    }

    #[test]
    fn selection_preserves_declaration_order() {
        let registry = ToolRegistry::select(ToolMode::Snapshot, &[]);
        let names = names(&registry);
        let snapshot_pos = names.iter().position(|n| *n == "browser_snapshot");
        let close_pos = names.iter().position(|n| *n == "browser_close");
        assert_eq!(snapshot_pos, Some(0));
        assert_eq!(close_pos, Some(names.len() - 1));
    }

    #[test]
    fn lookup_by_name() {
        let registry = ToolRegistry::select(ToolMode::Snapshot, &[]);
        assert!(registry.get("browser_click").is_some());
        assert!(registry.get("no_such_tool").is_none());
    }
}
