//! The `Tool` trait agents call, plus a closure-backed implementation.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::arguments::ToolArguments;
use super::types::AgentToolParameters;
use crate::error::PlaygroundError;
use crate::events::AgentEventSink;
use crate::types::ModelMessage;

/// What the runner knows about the call being executed.
#[derive(Clone, Default)]
pub struct ToolExecutionContext {
    pub tool_call_id: Option<String>,
    /// Conversation of the calling agent, without its system prompt. Ends
    /// with the assistant message that requested this call.
    pub messages: Vec<ModelMessage>,
    /// Sink of the calling run, for tools that run nested agents.
    pub event_sink: Option<AgentEventSink>,
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("tool_call_id", &self.tool_call_id)
            .field("messages", &self.messages.len())
            .field("event_sink", &self.event_sink.is_some())
            .finish()
    }
}

/// A capability an agent can invoke by name.
///
/// Failures of a remote service should come back as `Ok` with a readable
/// message so the model can react; `Err` is for calls that could not be
/// attempted at all, such as a missing argument.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters(&self) -> &AgentToolParameters;

    /// Agent this tool hands control to, if it is a handoff tool.
    ///
    /// At most one handoff runs per model step; later handoff calls in the
    /// same step are answered with an error result.
    fn handoff_target(&self) -> Option<&str> {
        None
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<Value, PlaygroundError>;
}

type BoxedHandler = dyn Fn(ToolArguments, ToolExecutionContext) -> Pin<Box<dyn Future<Output = Result<Value, PlaygroundError>> + Send>>
    + Send
    + Sync;

/// Tool backed by an async closure.
pub struct AgentTool {
    name: String,
    description: String,
    parameters: AgentToolParameters,
    handler: Arc<BoxedHandler>,
}

impl AgentTool {
    pub fn new<F, Fut>(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: AgentToolParameters,
        handler: F,
    ) -> Self
    where
        F: Fn(ToolArguments, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, PlaygroundError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(move |args, ctx| Box::pin(handler(args, ctx))),
        }
    }
}

#[async_trait]
impl Tool for AgentTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<Value, PlaygroundError> {
        (self.handler)(args.clone(), ctx.clone()).await
    }
}

impl fmt::Debug for AgentTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentTool").field("name", &self.name).finish_non_exhaustive()
    }
}
