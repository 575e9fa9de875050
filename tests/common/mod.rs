//! Shared test helpers and a scripted mock provider.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::Value;

use playground::agent::{Agent, AgentFactory};
use playground::config::PlaygroundConfig;
use playground::error::PlaygroundError;
use playground::events::{AgentEvent, AgentEventSink};
use playground::models::LanguageModel;
use playground::provider::{ModelProvider, ProviderFactory, ProviderRequest};
use playground::types::*;

/// One model step: the deltas `stream_text` yields for a single request.
pub type Step = Vec<TextStreamDelta>;

/// Model steps served in order to every provider the factory creates.
///
/// Agents sharing a script consume it in call order, so a supervisor step,
/// the sub-agent it delegates to, and the supervisor's next step can be
/// scripted as one sequence.
#[derive(Default)]
pub struct Script {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<(String, ProviderRequest)>>,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn factory(self: &Arc<Self>) -> ProviderFactory {
        let script = Arc::clone(self);
        Arc::new(move |model: &LanguageModel, _config: &PlaygroundConfig| {
            Ok(Box::new(ScriptedProvider {
                model_id: model.model_id().to_string(),
                script: Arc::clone(&script),
            }) as Box<dyn ModelProvider>)
        })
    }

    /// Requests seen so far, with the model id that received each.
    pub fn requests(&self) -> Vec<(String, ProviderRequest)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.steps.lock().unwrap().len()
    }
}

struct ScriptedProvider {
    model_id: String,
    script: Arc<Script>,
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn stream_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, PlaygroundError>>, PlaygroundError>
    {
        self.script
            .requests
            .lock()
            .unwrap()
            .push((self.model_id.clone(), request.clone()));
        let step = self
            .script
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PlaygroundError::Stream("script exhausted".into()))?;
        Ok(stream::iter(step.into_iter().map(Ok)).boxed())
    }
}

/// A step answering with `tokens`, one delta each.
pub fn answer(tokens: &[&str]) -> Step {
    let mut step: Step = tokens.iter().map(|t| TextStreamDelta::text(*t)).collect();
    step.push(TextStreamDelta::done(Some(FinishReason::Stop), None));
    step
}

/// A step requesting `calls` as `(id, tool name, arguments)`.
pub fn tool_calls(calls: &[(&str, &str, Value)]) -> Step {
    let mut step: Step = calls
        .iter()
        .map(|(id, name, arguments)| {
            TextStreamDelta::tool_call(AgentToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: arguments.clone(),
            })
        })
        .collect();
    step.push(TextStreamDelta::done(Some(FinishReason::ToolCalls), None));
    step
}

/// A step whose stream breaks after `tokens`.
pub fn broken(tokens: &[&str], message: &str) -> Step {
    let mut step: Step = tokens.iter().map(|t| TextStreamDelta::text(*t)).collect();
    step.push(TextStreamDelta {
        text: message.to_string(),
        event_type: StreamEventType::Error,
        tool_call: None,
        finish_reason: None,
        usage: None,
    });
    step
}

pub fn test_model() -> LanguageModel {
    "openai/gpt-4.1-mini".parse().unwrap()
}

/// An agent with no credentials, driven by `script`.
pub fn scripted_agent(name: &str, script: &Arc<Script>) -> Agent {
    Agent::new(name, test_model())
        .with_config(PlaygroundConfig::new())
        .with_provider_factory(script.factory())
}

/// A factory over the built-in tools, driven by `script`.
pub fn scripted_factory(script: &Arc<Script>) -> AgentFactory {
    AgentFactory::from_config(PlaygroundConfig::new()).with_provider_factory(script.factory())
}

/// A sink that records every event.
pub fn recording_sink() -> (AgentEventSink, Arc<Mutex<Vec<AgentEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let captured = Arc::clone(&events);
    let sink: AgentEventSink = Arc::new(move |event| captured.lock().unwrap().push(event));
    (sink, events)
}

/// Event types in order, e.g. `["on_chain_start", "on_chat_model_stream"]`.
pub fn event_types(events: &[AgentEvent]) -> Vec<&'static str> {
    events.iter().map(AgentEvent::event_type).collect()
}
