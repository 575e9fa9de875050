//! Name-to-tool lookup used when agents are assembled from config.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::builtin;
use super::Tool;
use crate::config::PlaygroundConfig;

/// Registered tools, kept in registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in tool.
    pub fn with_builtin_tools(config: &PlaygroundConfig) -> Self {
        let mut registry = Self::new();
        for tool in builtin::all_tools(config) {
            registry.register(tool);
        }
        registry
    }

    /// Add a tool, replacing any previous tool of the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Look tools up by name, keeping the requested order.
    ///
    /// Unknown names are skipped.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Vec<Arc<dyn Tool>> {
        names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let found = self.get(name);
                if found.is_none() {
                    tracing::debug!(tool = name, "dropping unknown tool name");
                }
                found
            })
            .collect()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_registry_lists_all_tools() {
        let registry = ToolRegistry::with_builtin_tools(&PlaygroundConfig::new());
        assert_eq!(
            registry.names(),
            vec![
                "advanced_research",
                "basic_research",
                "get_todays_date",
                "scrape_with_firecrawl",
                "crawl_with_firecrawl",
                "map_with_firecrawl",
            ]
        );
    }

    #[test]
    fn resolve_keeps_requested_order() {
        let registry = ToolRegistry::with_builtin_tools(&PlaygroundConfig::new());
        let tools = registry.resolve(&["map_with_firecrawl", "get_todays_date"]);
        let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["map_with_firecrawl", "get_todays_date"]);
    }

    #[test]
    fn resolve_of_nothing_known_is_empty() {
        let registry = ToolRegistry::with_builtin_tools(&PlaygroundConfig::new());
        assert!(registry.resolve(&["nope", "also_nope"]).is_empty());
    }
}
