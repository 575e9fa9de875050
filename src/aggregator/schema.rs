//! Event schema adapters: map one event format onto [`EventKind`].

use serde_json::Value;

use crate::events::{AgentEvent, AgentEventPayload};
use crate::types::Role;

/// What an event means to the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    ModelToken {
        text: String,
    },
    ToolStarted {
        name: String,
        input: Value,
        call_id: Option<String>,
    },
    ToolEnded {
        name: String,
        output: Value,
        call_id: Option<String>,
    },
    ChainEnded {
        final_message: Option<String>,
    },
    Other,
}

pub trait EventSchema {
    type Event;

    fn classify(&self, event: &Self::Event) -> EventKind;
}

/// Events emitted by this crate's agents.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeSchema;

impl EventSchema for NativeSchema {
    type Event = AgentEvent;

    fn classify(&self, event: &AgentEvent) -> EventKind {
        match &event.payload {
            AgentEventPayload::ChatModelStream { chunk } => EventKind::ModelToken {
                text: chunk.clone(),
            },
            AgentEventPayload::ToolStart {
                tool_call_id,
                name,
                input,
            } => EventKind::ToolStarted {
                name: name.clone(),
                input: input.clone(),
                call_id: Some(tool_call_id.clone()),
            },
            AgentEventPayload::ToolEnd {
                tool_call_id,
                name,
                output,
                ..
            } => EventKind::ToolEnded {
                name: name.clone(),
                output: output.clone(),
                call_id: Some(tool_call_id.clone()),
            },
            AgentEventPayload::ChainEnd { messages } => EventKind::ChainEnded {
                final_message: messages
                    .last()
                    .filter(|m| m.role == Role::Assistant)
                    .map(|m| m.text())
                    .filter(|text| !text.is_empty()),
            },
            AgentEventPayload::ChainStart { .. } | AgentEventPayload::Handoff { .. } => {
                EventKind::Other
            }
        }
    }
}

/// Recorded LangGraph `astream_events` records:
/// `{"event": "on_tool_start", "name": ..., "run_id": ..., "data": {...}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LangGraphSchema;

impl EventSchema for LangGraphSchema {
    type Event = Value;

    fn classify(&self, event: &Value) -> EventKind {
        let data = event.get("data").unwrap_or(&Value::Null);
        let name = || {
            event
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let run_id = || {
            event
                .get("run_id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        };

        match event.get("event").and_then(Value::as_str) {
            Some("on_chat_model_stream") => match data.get("chunk").map(message_content) {
                Some(text) if !text.is_empty() => EventKind::ModelToken { text },
                _ => EventKind::Other,
            },
            Some("on_tool_start") => EventKind::ToolStarted {
                name: name(),
                input: data.get("input").cloned().unwrap_or(Value::Null),
                call_id: run_id(),
            },
            Some("on_tool_end") => EventKind::ToolEnded {
                name: name(),
                output: data.get("output").cloned().unwrap_or(Value::Null),
                call_id: run_id(),
            },
            Some("on_chain_end") => EventKind::ChainEnded {
                final_message: data
                    .get("output")
                    .and_then(|output| output.get("messages"))
                    .and_then(Value::as_array)
                    .and_then(|messages| messages.last())
                    .filter(|last| is_ai_message(last))
                    .map(message_content)
                    .filter(|text| !text.is_empty()),
            },
            _ => EventKind::Other,
        }
    }
}

/// Text of a serialized message or chunk (`"text"` or `{"content": ...}`).
fn message_content(message: &Value) -> String {
    match message {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("content") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(parts)) => parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect(),
            _ => String::new(),
        },
        _ => String::new(),
    }
}

fn is_ai_message(message: &Value) -> bool {
    let kind = message
        .get("type")
        .or_else(|| message.get("role"))
        .and_then(Value::as_str);
    matches!(kind, Some("ai" | "AIMessage" | "AIMessageChunk" | "assistant"))
}
