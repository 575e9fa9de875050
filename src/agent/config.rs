use bon::Builder;
use serde::{Deserialize, Serialize};

/// Everything needed to build one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct AgentConfig {
    /// `provider/model-name`, e.g. `openai/gpt-4.1-mini`.
    pub model_id: String,
    #[builder(default)]
    pub system_prompt: String,
    /// Registry names, in the order they are offered to the model.
    #[builder(default)]
    pub tool_names: Vec<String>,
    pub display_name: String,
}

impl AgentConfig {
    pub fn new(
        display_name: impl Into<String>,
        model_id: impl Into<String>,
        system_prompt: impl Into<String>,
        tool_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            system_prompt: system_prompt.into(),
            tool_names: tool_names.into_iter().map(Into::into).collect(),
            display_name: display_name.into(),
        }
    }
}
