//! Handoff tools: one per sub-agent, each runs that agent to completion.

use std::collections::HashSet;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::agent::Agent;
use crate::error::PlaygroundError;
use crate::tools::{AgentToolParameters, Tool, ToolArguments, ToolExecutionContext};
use crate::types::{ModelMessage, Role};

pub const HANDOFF_PREFIX: &str = "transfer_to_";

static DISALLOWED_NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[<>|\\/]").expect("agent name sanitizer regex must compile")
});

/// Make an agent name usable inside a tool name.
pub fn sanitize_agent_name(name: &str) -> String {
    DISALLOWED_NAME_CHARS
        .replace_all(&name.replace(' ', "_"), "")
        .into_owned()
}

/// Tool that delegates the conversation to one sub-agent and returns its
/// final message.
#[derive(Debug)]
pub struct HandoffTool {
    tool_name: String,
    target: String,
    description: String,
    parameters: AgentToolParameters,
    agent: Agent,
}

impl HandoffTool {
    pub fn new(agent: Agent) -> Self {
        let target = sanitize_agent_name(agent.name());
        Self {
            tool_name: format!("{HANDOFF_PREFIX}{target}"),
            description: format!("Ask agent '{target}' for help"),
            target,
            parameters: AgentToolParameters::empty(),
            agent,
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }
}

#[async_trait]
impl Tool for HandoffTool {
    fn name(&self) -> &str {
        &self.tool_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    fn handoff_target(&self) -> Option<&str> {
        Some(&self.target)
    }

    async fn execute(
        &self,
        _args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<Value, PlaygroundError> {
        let history = delegation_history(&ctx.messages);
        tracing::debug!(
            agent = %self.target,
            call_id = ctx.tool_call_id.as_deref().unwrap_or_default(),
            messages = history.len(),
            "handing off"
        );
        let output = self
            .agent
            .run_with_sink(history, ctx.event_sink.clone())
            .await?;
        Ok(Value::String(output.text))
    }
}

/// Conversation as a sub-agent sees it: user messages, assistant text, and
/// earlier sub-agent answers as assistant messages. Tool plumbing is dropped.
pub fn delegation_history(messages: &[ModelMessage]) -> Vec<ModelMessage> {
    let handoff_calls: HashSet<&str> = messages
        .iter()
        .flat_map(|m| m.tool_calls())
        .filter(|call| call.name.starts_with(HANDOFF_PREFIX))
        .map(|call| call.id.as_str())
        .collect();

    let mut history = Vec::new();
    for message in messages {
        match message.role {
            Role::System => {}
            Role::User => history.push(ModelMessage::user(message.text())),
            Role::Assistant => {
                let text = message.text();
                if !text.is_empty() {
                    let mut reply = ModelMessage::assistant(text);
                    reply.name = message.name.clone();
                    history.push(reply);
                }
            }
            Role::Tool => {
                for result in message.tool_results() {
                    if result.is_error || !handoff_calls.contains(result.tool_call_id.as_str()) {
                        continue;
                    }
                    let text = match &result.result {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    history.push(ModelMessage::assistant(text));
                }
            }
        }
    }
    history
}
