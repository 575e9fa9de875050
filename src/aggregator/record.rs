//! Per-turn records of tool activity and the aggregated turn result.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Running,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool_name: String,
    pub arguments: Value,
    pub call_id: String,
    pub status: CallStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResultRecord {
    pub call_id: String,
    pub tool_name: String,
    /// Tool output: JSON, or a plain string for text results.
    pub content: Value,
}

impl ToolResultRecord {
    /// Content as display text.
    pub fn content_text(&self) -> String {
        match &self.content {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub status: TurnStatus,
    pub text: String,
    pub tool_calls: Vec<ToolCallRecord>,
    pub tool_results: Vec<ToolResultRecord>,
}

impl TurnResult {
    /// Result of a turn whose event stream broke.
    pub fn failed(message: impl std::fmt::Display) -> Self {
        Self {
            status: TurnStatus::Failed,
            text: format!("Error: {message}"),
            tool_calls: Vec::new(),
            tool_results: Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == TurnStatus::Failed
    }
}

/// Incremental progress reported while a turn is aggregated.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnUpdate {
    /// All text received so far.
    Text(String),
    ToolCall(ToolCallRecord),
    ToolResult {
        result: ToolResultRecord,
        /// The call this result completed, if one was matched.
        completed: Option<ToolCallRecord>,
    },
}
