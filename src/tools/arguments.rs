//! Arguments of a tool call as the model sent them.

use serde_json::Value;

use crate::error::PlaygroundError;

#[derive(Debug, Clone)]
pub struct ToolArguments {
    value: Value,
}

impl ToolArguments {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Get the single string argument of a one-argument tool.
    ///
    /// Accepts `{"<key>": "..."}`, a bare JSON string, or an object whose only
    /// value is a string (models occasionally rename the parameter).
    pub fn single_str(&self, key: &str) -> Result<&str, PlaygroundError> {
        let found = match &self.value {
            Value::Object(map) => map
                .get(key)
                .or_else(|| (map.len() == 1).then(|| map.values().next()).flatten())
                .and_then(Value::as_str),
            Value::String(s) => Some(s.as_str()),
            _ => None,
        };
        found.ok_or_else(|| {
            PlaygroundError::InvalidArgument(format!("Missing string argument: {key}"))
        })
    }
}
