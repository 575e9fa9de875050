//! Supervisor: an agent whose tools hand the conversation to sub-agents.

pub mod handoff;

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::BoxStream;

pub use handoff::{delegation_history, sanitize_agent_name, HandoffTool, HANDOFF_PREFIX};

use crate::agent::{Agent, AgentConfig, AgentFactory, AgentOutput};
use crate::error::PlaygroundError;
use crate::events::{AgentEvent, AgentEventSink};
use crate::tools::Tool;
use crate::types::ModelMessage;

/// Coordinating agent over a fixed set of sub-agents.
///
/// The model decides the routing; each `transfer_to_<agent>` call runs one
/// sub-agent and its final answer comes back as the tool result. The turn
/// ends when the model replies without calling a tool.
#[derive(Debug, Clone)]
pub struct Supervisor {
    agent: Agent,
    /// Sanitized name and agent, in handoff tool order.
    sub_agents: Vec<(String, Agent)>,
}

impl Supervisor {
    pub fn name(&self) -> &str {
        self.agent.name()
    }

    /// The underlying coordinating agent.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Sanitized sub-agent names, in handoff tool order.
    pub fn sub_agent_names(&self) -> Vec<&str> {
        self.sub_agents.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Sub-agent by sanitized name.
    pub fn sub_agent(&self, name: &str) -> Option<&Agent> {
        self.sub_agents
            .iter()
            .find(|(sub_name, _)| sub_name == name)
            .map(|(_, agent)| agent)
    }

    pub async fn invoke(&self, history: Vec<ModelMessage>) -> Result<AgentOutput, PlaygroundError> {
        self.agent.invoke(history).await
    }

    pub async fn run_with_sink(
        &self,
        history: Vec<ModelMessage>,
        sink: Option<AgentEventSink>,
    ) -> Result<AgentOutput, PlaygroundError> {
        self.agent.run_with_sink(history, sink).await
    }

    /// Events of the supervisor and of every sub-agent it hands off to, in
    /// emission order.
    pub fn stream(&self, history: Vec<ModelMessage>) -> BoxStream<'static, Result<AgentEvent, PlaygroundError>> {
        self.agent.stream(history)
    }
}

impl AgentFactory {
    /// Build a supervisor over `sub_agents`.
    ///
    /// The supervisor gets one handoff tool per sub-agent, followed by the
    /// tools named in its own config, and asks the model for one tool call
    /// per step.
    pub fn build_supervisor(
        &self,
        sub_agents: Vec<Agent>,
        config: &AgentConfig,
    ) -> Result<Supervisor, PlaygroundError> {
        if sub_agents.is_empty() {
            return Err(PlaygroundError::Configuration(
                "a supervisor needs at least one sub-agent".into(),
            ));
        }

        let mut seen = HashSet::new();
        let mut members = Vec::with_capacity(sub_agents.len());
        let mut tools: Vec<Arc<dyn Tool>> = Vec::with_capacity(sub_agents.len());
        for agent in sub_agents {
            let handoff = HandoffTool::new(agent);
            let target = handoff.handoff_target().unwrap_or_default().to_string();
            if target.is_empty() {
                return Err(PlaygroundError::Configuration(format!(
                    "sub-agent name '{}' is empty after sanitizing",
                    handoff.agent().name()
                )));
            }
            if !seen.insert(target.clone()) {
                return Err(PlaygroundError::Configuration(format!(
                    "duplicate sub-agent name '{target}'"
                )));
            }
            members.push((target, handoff.agent().clone()));
            tools.push(Arc::new(handoff));
        }

        let base = self.build_agent(config)?;
        tools.extend(base.tools().iter().cloned());
        let mut settings = base.settings.clone();
        settings.parallel_tool_calls = Some(false);

        tracing::debug!(
            supervisor = %config.display_name,
            tools = tools.len(),
            "supervisor assembled"
        );
        Ok(Supervisor {
            agent: base.with_tools(tools).with_settings(settings),
            sub_agents: members,
        })
    }
}
