//! The tool loop: model step, tool calls, tool results, repeat.

use futures::StreamExt;
use serde_json::json;

use crate::error::PlaygroundError;
use crate::events::{AgentEventPayload, EventEmitter};
use crate::provider::{ProviderRequest, ToolDefinition};
use crate::tools::{ToolArguments, ToolExecutionContext};
use crate::types::{AgentToolCall, AgentToolResult, ModelMessage, StreamEventType, Usage};

use super::{Agent, AgentOutput};

/// Run `agent` over `history` until the model answers without tool calls.
pub(crate) async fn run_tool_loop(
    agent: &Agent,
    emitter: &EventEmitter,
    history: Vec<ModelMessage>,
) -> Result<AgentOutput, PlaygroundError> {
    tracing::debug!(
        run_id = %emitter.run_id(),
        agent = %agent.name(),
        model = %agent.model(),
        "agent run start"
    );
    emitter.emit(AgentEventPayload::ChainStart {
        model: agent.model().to_string(),
    });

    let provider = (agent.provider_factory)(agent.model(), &agent.config)?;

    let tool_defs: Option<Vec<ToolDefinition>> = if agent.tools.is_empty() {
        None
    } else {
        Some(
            agent
                .tools
                .iter()
                .map(|t| ToolDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters().schema.clone(),
                })
                .collect(),
        )
    };

    let mut messages = Vec::with_capacity(history.len() + 1);
    if !agent.system_prompt.is_empty() {
        messages.push(ModelMessage::system(agent.system_prompt.clone()));
    }
    let conversation_start = messages.len();
    messages.extend(history);
    let run_start = messages.len();
    let mut usage = Usage::default();

    for iteration in 1..=agent.recursion_limit {
        let request = ProviderRequest {
            messages: messages.clone(),
            settings: agent.settings.clone(),
            tools: tool_defs.clone(),
        };
        let mut stream = provider.stream_text(&request).await?;

        let mut step_text = String::new();
        let mut calls: Vec<AgentToolCall> = Vec::new();
        while let Some(delta) = stream.next().await {
            let delta = delta?;
            match delta.event_type {
                StreamEventType::TextDelta => {
                    if !delta.text.is_empty() {
                        step_text.push_str(&delta.text);
                        emitter.emit(AgentEventPayload::ChatModelStream { chunk: delta.text });
                    }
                }
                StreamEventType::ToolCallDelta => {
                    if let Some(call) = delta.tool_call {
                        match calls.iter_mut().find(|c| c.id == call.id) {
                            Some(existing) => *existing = call,
                            None => calls.push(call),
                        }
                    }
                }
                StreamEventType::Error => {
                    let message = if delta.text.is_empty() {
                        "stream error".to_string()
                    } else {
                        delta.text
                    };
                    return Err(PlaygroundError::Stream(message));
                }
                StreamEventType::Done => {
                    if let Some(step_usage) = delta.usage {
                        usage += step_usage;
                    }
                    break;
                }
            }
        }

        tracing::debug!(
            run_id = %emitter.run_id(),
            iteration,
            tool_calls = calls.len(),
            text_len = step_text.len(),
            "agent step complete"
        );

        if calls.is_empty() {
            messages.push(ModelMessage::assistant(step_text.clone()).with_name(agent.name()));
            let produced = messages.split_off(run_start);
            emitter.emit(AgentEventPayload::ChainEnd {
                messages: produced.clone(),
            });
            tracing::debug!(
                run_id = %emitter.run_id(),
                total_tokens = usage.total_tokens,
                "agent run complete"
            );
            return Ok(AgentOutput {
                text: step_text,
                messages: produced,
                usage,
            });
        }

        messages.push(ModelMessage::assistant_with_calls(step_text, calls.clone()).with_name(agent.name()));

        let mut handed_off = false;
        for call in &calls {
            emitter.emit(AgentEventPayload::ToolStart {
                tool_call_id: call.id.clone(),
                name: call.name.clone(),
                input: call.arguments.clone(),
            });

            let ctx = ToolExecutionContext {
                tool_call_id: Some(call.id.clone()),
                messages: messages[conversation_start..].to_vec(),
                event_sink: emitter.sink(),
            };
            let result = execute_call(agent, emitter, call, &ctx, &mut handed_off).await;

            emitter.emit(AgentEventPayload::ToolEnd {
                tool_call_id: call.id.clone(),
                name: call.name.clone(),
                output: result.result.clone(),
                is_error: result.is_error,
            });
            messages.push(ModelMessage::tool_result(
                result.tool_call_id,
                result.result,
                result.is_error,
            ));
        }
    }

    tracing::debug!(run_id = %emitter.run_id(), "recursion limit reached");
    Err(PlaygroundError::RecursionLimit(agent.recursion_limit))
}

async fn execute_call(
    agent: &Agent,
    emitter: &EventEmitter,
    call: &AgentToolCall,
    ctx: &ToolExecutionContext,
    handed_off: &mut bool,
) -> AgentToolResult {
    let error_result = |message: String| AgentToolResult {
        tool_call_id: call.id.clone(),
        result: json!({ "error": message }),
        is_error: true,
    };

    let Some(tool) = agent.tools.iter().find(|t| t.name() == call.name) else {
        return error_result(format!("Tool '{}' not found", call.name));
    };

    if let Some(target) = tool.handoff_target() {
        if *handed_off {
            return error_result(format!(
                "Only one agent can be called per step; '{target}' was not called"
            ));
        }
        *handed_off = true;
        emitter.emit(AgentEventPayload::Handoff {
            to: target.to_string(),
        });
    }

    let args = ToolArguments::new(call.arguments.clone());
    match tool.execute(&args, ctx).await {
        Ok(value) => AgentToolResult {
            tool_call_id: call.id.clone(),
            result: value,
            is_error: false,
        },
        Err(e) => {
            let err = PlaygroundError::tool(&call.name, e.to_string());
            tracing::warn!(error = %err, "tool failed");
            error_result(err.to_string())
        }
    }
}
