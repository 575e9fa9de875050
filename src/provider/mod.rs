//! Model provider trait and implementations.

pub mod http;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "openrouter")]
pub mod openrouter;

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::config::PlaygroundConfig;
use crate::error::PlaygroundError;
use crate::models::LanguageModel;
use crate::types::{GenerationSettings, ModelMessage, TextStreamDelta};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub settings: GenerationSettings,
    pub tools: Option<Vec<ToolDefinition>>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// A chat model endpoint. Agents only ever stream, so a step's text, tool
/// calls and usage all arrive as [`TextStreamDelta`]s.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai", "openrouter").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Start one model step. The stream ends with a `Done` delta, or with an
    /// `Err` if the connection or the provider fails midway.
    async fn stream_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, PlaygroundError>>, PlaygroundError>;
}

/// Creates a provider for a model. Swappable so tests can script responses.
pub type ProviderFactory = Arc<
    dyn Fn(&LanguageModel, &PlaygroundConfig) -> Result<Box<dyn ModelProvider>, PlaygroundError>
        + Send
        + Sync,
>;

/// The factory used unless one is injected: [`create_provider`].
pub fn default_provider_factory() -> ProviderFactory {
    Arc::new(create_provider)
}

/// Create a provider for the given model, using the provided config.
///
/// Credentials are checked here, i.e. on first invocation of an agent, not
/// when the agent is built.
#[allow(unused_variables)]
pub fn create_provider(
    model: &LanguageModel,
    config: &PlaygroundConfig,
) -> Result<Box<dyn ModelProvider>, PlaygroundError> {
    match model {
        #[cfg(feature = "openai")]
        LanguageModel::OpenAi(m) => {
            let api_key = config
                .get_api_key("openai")
                .ok_or_else(|| PlaygroundError::Authentication("Missing OPENAI_API_KEY".into()))?;
            Ok(Box::new(openai::OpenAiProvider::new(
                m.clone(),
                api_key,
                config.get_base_url("openai"),
            )))
        }
        #[cfg(feature = "openrouter")]
        LanguageModel::OpenRouter(model_id) => {
            let api_key = config.get_api_key("openrouter").ok_or_else(|| {
                PlaygroundError::Authentication("Missing OPENROUTER_API_KEY".into())
            })?;
            Ok(Box::new(openrouter::OpenRouterProvider::new(
                model_id.clone(),
                api_key,
                config.get_base_url("openrouter"),
            )))
        }
        LanguageModel::Custom { provider, .. } => Err(PlaygroundError::ModelNotFound(format!(
            "No built-in provider for '{provider}'"
        ))),
    }
}
