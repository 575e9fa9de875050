//! Agent event stream types.
//!
//! Every agent run reports its progress as a sequence of [`AgentEvent`]s. The
//! payload is serialized as `{"event_type": ..., "data": {...}}` so recorded
//! streams stay readable next to other frameworks' event logs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ModelMessage;

/// Identifier of one agent run.
pub type RunId = Uuid;

/// Callback receiving events as they are emitted.
pub type AgentEventSink = Arc<dyn Fn(AgentEvent) + Send + Sync>;

/// Envelope for streamed agent events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentEvent {
    pub run_id: RunId,
    /// Per-run sequence number, starting at 1.
    pub seq: u64,
    /// Display name of the agent that emitted the event.
    pub agent: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: AgentEventPayload,
}

impl AgentEvent {
    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }
}

/// Concrete event payloads emitted by the tool loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event_type", content = "data")]
pub enum AgentEventPayload {
    #[serde(rename = "on_chain_start")]
    ChainStart { model: String },
    #[serde(rename = "on_chat_model_stream")]
    ChatModelStream { chunk: String },
    #[serde(rename = "on_tool_start")]
    ToolStart {
        tool_call_id: String,
        name: String,
        input: serde_json::Value,
    },
    #[serde(rename = "on_tool_end")]
    ToolEnd {
        tool_call_id: String,
        name: String,
        output: serde_json::Value,
        #[serde(default)]
        is_error: bool,
    },
    /// The run finished; carries the messages the run appended.
    #[serde(rename = "on_chain_end")]
    ChainEnd { messages: Vec<ModelMessage> },
    #[serde(rename = "on_handoff")]
    Handoff { to: String },
}

impl AgentEventPayload {
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ChainStart { .. } => "on_chain_start",
            Self::ChatModelStream { .. } => "on_chat_model_stream",
            Self::ToolStart { .. } => "on_tool_start",
            Self::ToolEnd { .. } => "on_tool_end",
            Self::ChainEnd { .. } => "on_chain_end",
            Self::Handoff { .. } => "on_handoff",
        }
    }
}

/// Stamps payloads with run id, sequence and agent name before handing them
/// to the sink.
#[derive(Clone)]
pub struct EventEmitter {
    run_id: RunId,
    agent: String,
    seq: Arc<AtomicU64>,
    sink: Option<AgentEventSink>,
}

impl EventEmitter {
    pub fn new(agent: impl Into<String>, sink: Option<AgentEventSink>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            agent: agent.into(),
            seq: Arc::new(AtomicU64::new(1)),
            sink,
        }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// The sink nested runs should report into.
    pub fn sink(&self) -> Option<AgentEventSink> {
        self.sink.clone()
    }

    pub fn emit(&self, payload: AgentEventPayload) {
        let Some(sink) = &self.sink else { return };
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        (sink)(AgentEvent {
            run_id: self.run_id,
            seq,
            agent: self.agent.clone(),
            timestamp: Utc::now(),
            payload,
        });
    }
}
