//! Builds agents from [`AgentConfig`]s.

use std::fmt;

use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::models::ModelSelector;
use crate::provider::{default_provider_factory, ProviderFactory};
use crate::tools::ToolRegistry;

use super::agent::DEFAULT_RECURSION_LIMIT;
use super::{Agent, AgentConfig};

/// Shared ingredients for every agent of a team: credentials, tool registry
/// and the provider factory.
#[derive(Clone)]
pub struct AgentFactory {
    pub(crate) config: PlaygroundConfig,
    pub(crate) registry: ToolRegistry,
    pub(crate) provider_factory: ProviderFactory,
    pub(crate) recursion_limit: usize,
}

impl AgentFactory {
    pub fn new(config: PlaygroundConfig, registry: ToolRegistry) -> Self {
        Self {
            config,
            registry,
            provider_factory: default_provider_factory(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Factory whose registry holds the built-in tools.
    pub fn from_config(config: PlaygroundConfig) -> Self {
        let registry = ToolRegistry::with_builtin_tools(&config);
        Self::new(config, registry)
    }

    pub fn with_provider_factory(mut self, factory: ProviderFactory) -> Self {
        self.provider_factory = factory;
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Build one agent.
    ///
    /// Fails only when `model_id` cannot be parsed. Tool names the registry
    /// does not know are dropped, and credentials are not checked until the
    /// agent first runs.
    pub fn build_agent(&self, config: &AgentConfig) -> Result<Agent, PlaygroundError> {
        let model = ModelSelector::parse(&config.model_id)?;
        let tools = self.registry.resolve(&config.tool_names);
        if tools.len() < config.tool_names.len() {
            tracing::debug!(
                agent = %config.display_name,
                requested = config.tool_names.len(),
                resolved = tools.len(),
                "some tools were not found in the registry"
            );
        }

        Ok(Agent::new(config.display_name.clone(), model)
            .with_system_prompt(config.system_prompt.clone())
            .with_tools(tools)
            .with_config(self.config.clone())
            .with_provider_factory(self.provider_factory.clone())
            .with_recursion_limit(self.recursion_limit))
    }
}

impl fmt::Debug for AgentFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentFactory")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}
