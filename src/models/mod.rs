//! Model ids as written in team settings: `provider/model-name`.

#[cfg(feature = "openai")]
pub mod openai;
pub mod selector;

pub use selector::ModelSelector;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A chat model together with the service that hosts it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "provider", content = "model")]
pub enum LanguageModel {
    #[cfg(feature = "openai")]
    OpenAi(openai::OpenAiModel),
    /// Any model routed through OpenRouter, e.g. `x-ai/grok-4`.
    #[cfg(feature = "openrouter")]
    OpenRouter(String),
    /// A provider this build has no client for. Never produced by
    /// [`ModelSelector`]; kept so callers can name one explicitly.
    Custom { provider: String, model_id: String },
}

impl LanguageModel {
    /// The id sent to the provider's API.
    pub fn model_id(&self) -> &str {
        self.parts().1
    }

    /// Service name, also the key used for credentials in
    /// [`PlaygroundConfig`](crate::config::PlaygroundConfig).
    pub fn provider_name(&self) -> &str {
        self.parts().0
    }

    fn parts(&self) -> (&str, &str) {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(m) => ("openai", m.as_str()),
            #[cfg(feature = "openrouter")]
            Self::OpenRouter(id) => ("openrouter", id.as_str()),
            Self::Custom { provider, model_id } => (provider.as_str(), model_id.as_str()),
        }
    }
}

impl fmt::Display for LanguageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (provider, model_id) = self.parts();
        write!(f, "{provider}/{model_id}")
    }
}
