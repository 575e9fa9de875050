//! OpenRouter provider (OpenAI-compatible).

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::PlaygroundError;
use crate::models::openai::OpenAiModel;
use crate::types::TextStreamDelta;

use super::openai::OpenAiProvider;
use super::{ModelProvider, ProviderRequest};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub struct OpenRouterProvider {
    inner: OpenAiProvider,
}

impl OpenRouterProvider {
    pub fn new(model_id: String, api_key: String, base_url: Option<String>) -> Self {
        let model = OpenAiModel::Other(model_id);
        Self {
            inner: OpenAiProvider::new(
                model,
                api_key,
                Some(base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string())),
            ),
        }
    }
}

#[async_trait]
impl ModelProvider for OpenRouterProvider {
    fn provider_name(&self) -> &str {
        "openrouter"
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    async fn stream_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, PlaygroundError>>, PlaygroundError>
    {
        self.inner.stream_text(request).await
    }
}
