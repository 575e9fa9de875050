//! Parameter schemas advertised to the model.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// JSON Schema object describing a tool's arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentToolParameters {
    pub schema: Value,
}

impl AgentToolParameters {
    /// Schema for a tool that takes no arguments, such as a handoff.
    pub fn empty() -> Self {
        Self {
            schema: json!({ "type": "object", "properties": {}, "required": [] }),
        }
    }

    /// Schema with one required string property, the shape every built-in
    /// tool uses.
    pub fn single_string(name: &str, description: &str) -> Self {
        Self {
            schema: json!({
                "type": "object",
                "properties": { name: { "type": "string", "description": description } },
                "required": [name],
            }),
        }
    }
}
