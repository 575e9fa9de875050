//! Core Agent struct with invoke/stream capabilities.

use std::fmt;
use std::sync::Arc;

use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::events::{AgentEvent, AgentEventSink, EventEmitter};
use crate::models::LanguageModel;
use crate::provider::{default_provider_factory, ProviderFactory};
use crate::tools::Tool;
use crate::types::{GenerationSettings, ModelMessage, Usage};

use super::runner::run_tool_loop;

/// Model steps allowed per run before giving up.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Result of one completed agent run.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutput {
    /// Text of the final assistant message.
    pub text: String,
    /// Messages the run appended after the input history, ending with the
    /// final assistant message.
    pub messages: Vec<ModelMessage>,
    /// Token counts summed over every model step of the run. Steps whose
    /// provider reported nothing count as zero.
    pub usage: Usage,
}

/// A single-purpose agent: one model, one system prompt, a set of tools.
///
/// Agents hold no conversation state; every run receives its history.
#[derive(Clone)]
pub struct Agent {
    name: String,
    model: LanguageModel,
    pub(crate) system_prompt: String,
    pub(crate) tools: Vec<Arc<dyn Tool>>,
    pub(crate) settings: GenerationSettings,
    pub(crate) config: PlaygroundConfig,
    pub(crate) provider_factory: ProviderFactory,
    pub(crate) recursion_limit: usize,
}

impl Agent {
    pub fn new(name: impl Into<String>, model: LanguageModel) -> Self {
        Self {
            name: name.into(),
            model,
            system_prompt: String::new(),
            tools: Vec::new(),
            settings: GenerationSettings::default(),
            config: PlaygroundConfig::global().clone(),
            provider_factory: default_provider_factory(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_tools(mut self, tools: Vec<Arc<dyn Tool>>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_config(mut self, config: PlaygroundConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_provider_factory(mut self, factory: ProviderFactory) -> Self {
        self.provider_factory = factory;
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Run once and return the final answer.
    pub async fn invoke(&self, history: Vec<ModelMessage>) -> Result<AgentOutput, PlaygroundError> {
        self.run_with_sink(history, None).await
    }

    /// Run once, reporting every step to `sink`.
    pub async fn run_with_sink(
        &self,
        history: Vec<ModelMessage>,
        sink: Option<AgentEventSink>,
    ) -> Result<AgentOutput, PlaygroundError> {
        let emitter = EventEmitter::new(self.name.clone(), sink);
        run_tool_loop(self, &emitter, history).await
    }

    /// Run on a background task and stream its events.
    ///
    /// The stream ends after `on_chain_end`, or with a single `Err` item if
    /// the run fails.
    pub fn stream(&self, history: Vec<ModelMessage>) -> BoxStream<'static, Result<AgentEvent, PlaygroundError>> {
        let (tx, rx) = mpsc::unbounded_channel();
        let agent = self.clone();
        tokio::spawn(async move {
            let events = tx.clone();
            let sink: AgentEventSink = Arc::new(move |event| {
                let _ = events.send(Ok(event));
            });
            if let Err(err) = agent.run_with_sink(history, Some(sink)).await {
                tracing::debug!(agent = %agent.name, error = %err, "agent run failed");
                let _ = tx.send(Err(err));
            }
        });
        UnboundedReceiverStream::new(rx).boxed()
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("model", &self.model.to_string())
            .field("tools", &self.tool_names())
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}
